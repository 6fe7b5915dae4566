use maybe_sync::{MaybeSend, MaybeSync};

/// Connection between map components and the application that renders them. Components call
/// [`Messenger::request_redraw`] when what they show has changed.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Ask the application to render a new frame.
    fn request_redraw(&self);
}

impl<T: Fn() + MaybeSend + MaybeSync> Messenger for T {
    fn request_redraw(&self) {
        self()
    }
}
