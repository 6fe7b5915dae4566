//! Camera events: notifications about changes of the map view.
//!
//! Every change of the [`Map`](crate::Map) view is published as a [`CameraEvent`] through the
//! map's [`CameraEvents`] channel. The channel supports any number of independent subscribers:
//!
//! * [`CameraEvents::subscribe`] registers a [`CameraEventHandler`] that is called synchronously
//!   on the thread that changes the view;
//! * [`CameraEvents::stream`] returns a [`CameraEventStream`] for consumers that prefer to
//!   process events as an async [`Stream`](futures::Stream).
//!
//! Both return a handle that stops the delivery when cancelled or dropped. Subscribing never
//! affects other subscribers of the same channel.

use maybe_sync::{MaybeSend, MaybeSync};

use crate::view::MapView;

mod camera_events;
mod stream;

pub use camera_events::{CameraEvents, Subscription};
pub use stream::CameraEventStream;

/// Notification about a change of the map camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    /// The camera started moving.
    MoveStarted(MoveReason),
    /// The camera moved. Contains the view after the move.
    Move(MapView),
    /// The movement was interrupted before reaching its target, e.g. by a new animation.
    MoveCanceled,
    /// The camera stopped moving. Contains the final view.
    Idle(MapView),
}

impl CameraEvent {
    /// The view snapshot carried by the event, if any.
    pub fn view(&self) -> Option<&MapView> {
        match self {
            CameraEvent::Move(view) | CameraEvent::Idle(view) => Some(view),
            CameraEvent::MoveStarted(_) | CameraEvent::MoveCanceled => None,
        }
    }
}

/// What caused the camera to start moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    /// The user dragged or zoomed the map.
    Gesture,
    /// An animation requested with [`Map::animate_to`](crate::Map::animate_to).
    ApiAnimation,
    /// The view was replaced directly by the application.
    DeveloperAnimation,
}

/// Camera event consumer.
pub trait CameraEventHandler: MaybeSend + MaybeSync {
    /// Handle the event.
    fn handle(&self, event: &CameraEvent);
}

impl<T: for<'a> Fn(&'a CameraEvent)> CameraEventHandler for T
where
    T: MaybeSync + MaybeSend,
{
    fn handle(&self, event: &CameraEvent) {
        self(event)
    }
}
