use std::sync::Arc;

use parking_lot::Mutex;
use web_time::SystemTime;

use crate::control::{CameraEvent, CameraEvents, Subscription};
use crate::error::MapScaleError;
use crate::messenger::Messenger;
use crate::render::Canvas;
use crate::scale_bar::{ScaleBar, ScaleBarConfig};
use crate::view::ScreenProjection;

/// Scale bar that is shown while the camera moves and hides itself once the camera stood still
/// for [`ScaleBarConfig::visibility_timeout`].
///
/// Hiding is not driven by a timer. The application calls
/// [`DisappearingScaleBar::update_visibility`] before rendering a frame, the same way it calls
/// [`Map::animate`](crate::Map::animate).
pub struct DisappearingScaleBar {
    bar: ScaleBar,
    visible: bool,
    last_movement: SystemTime,
    messenger: Option<Box<dyn Messenger>>,
}

impl DisappearingScaleBar {
    /// Creates a new bar. The bar is visible right after creation.
    ///
    /// Fails if the configuration does not pass [`ScaleBarConfig::validate`].
    pub fn new(
        config: ScaleBarConfig,
        initial: &impl ScreenProjection,
    ) -> Result<Self, MapScaleError> {
        Ok(Self {
            bar: ScaleBar::new(config, initial)?,
            visible: true,
            last_movement: SystemTime::now(),
            messenger: None,
        })
    }

    /// The wrapped scale bar.
    pub fn scale_bar(&self) -> &ScaleBar {
        &self.bar
    }

    /// Sets the messenger notified when the bar appears, disappears or its scale changes.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }

    /// Returns true if the bar is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Handles the camera event, see [`DisappearingScaleBar::handle_event_at`].
    pub fn handle_event(&mut self, event: &CameraEvent) -> bool {
        self.handle_event_at(event, SystemTime::now())
    }

    /// Redraws the bar and shows it if the event carries a new view. `now` is the time the
    /// event happened at.
    ///
    /// Returns true if the bar must be redrawn on the screen.
    pub fn handle_event_at(&mut self, event: &CameraEvent, now: SystemTime) -> bool {
        let Some(view) = event.view() else {
            return false;
        };

        let scale_changed = self.bar.redraw(view);
        self.last_movement = now;

        let appeared = !self.visible;
        if appeared {
            self.set_visible(true);
        }

        let needs_redraw = scale_changed || appeared;
        if needs_redraw {
            self.request_redraw();
        }

        needs_redraw
    }

    /// Hides the bar if the visibility timeout has passed since the last camera movement.
    pub fn update_visibility(&mut self) -> bool {
        self.update_visibility_at(SystemTime::now())
    }

    /// Hides the bar if at the moment `now` the visibility timeout has passed since the last
    /// camera movement. Returns true if the bar was hidden by this call.
    pub fn update_visibility_at(&mut self, now: SystemTime) -> bool {
        if !self.visible {
            return false;
        }

        // Clock going backwards counts as no time passed.
        let idle_for = now.duration_since(self.last_movement).unwrap_or_default();
        if idle_for < self.bar.config().visibility_timeout() {
            return false;
        }

        self.set_visible(false);
        self.request_redraw();
        true
    }

    /// Subscribes the shared bar to the camera events.
    pub fn subscribe(
        bar: &Arc<Mutex<DisappearingScaleBar>>,
        events: &CameraEvents,
    ) -> Subscription {
        let bar = bar.clone();
        events.subscribe(move |event: &CameraEvent| {
            bar.lock().handle_event(event);
        })
    }

    /// Draws the bar if it is visible.
    pub fn render(&self, canvas: &mut impl Canvas) {
        if self.visible {
            self.bar.render(canvas);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        log::debug!("{}", if visible { "show" } else { "hide" });
    }

    fn request_redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use mapscale_types::{latlon, Size};

    use super::*;
    use crate::control::MoveReason;
    use crate::scale_bar::sampler::tests::EquatorProjection;
    use crate::scale_bar::tests::RecordingCanvas;
    use crate::view::MapView;
    use crate::Map;

    fn bar() -> DisappearingScaleBar {
        DisappearingScaleBar::new(
            ScaleBarConfig::default().with_visibility_timeout(Duration::from_secs(3)),
            &EquatorProjection {
                meters_per_pixel: 1.04,
            },
        )
        .unwrap()
    }

    fn view() -> MapView {
        MapView::new(&latlon!(10.0, 20.0), 5.0)
            .unwrap()
            .with_size(Size::new(200.0, 100.0))
    }

    #[test]
    fn hides_after_timeout() {
        let mut bar = bar();
        let start = SystemTime::now();
        bar.handle_event_at(&CameraEvent::Idle(view()), start);
        assert!(bar.is_visible());

        assert!(!bar.update_visibility_at(start + Duration::from_millis(2999)));
        assert!(bar.is_visible());

        assert!(bar.update_visibility_at(start + Duration::from_secs(3)));
        assert!(!bar.is_visible());

        assert!(!bar.update_visibility_at(start + Duration::from_secs(10)));
    }

    #[test]
    fn movement_shows_hidden_bar() {
        let mut bar = bar();
        let start = SystemTime::now();
        bar.handle_event_at(&CameraEvent::Move(view()), start);
        bar.update_visibility_at(start + Duration::from_secs(5));
        assert!(!bar.is_visible());

        let moved_at = start + Duration::from_secs(6);
        assert!(bar.handle_event_at(&CameraEvent::Move(view()), moved_at));
        assert!(bar.is_visible());

        assert!(!bar.update_visibility_at(moved_at + Duration::from_secs(2)));
        assert!(bar.is_visible());
    }

    #[test]
    fn events_without_view_do_not_reset_timer() {
        let mut bar = bar();
        let start = SystemTime::now();
        bar.handle_event_at(&CameraEvent::Move(view()), start);

        let later = start + Duration::from_secs(2);
        assert!(!bar.handle_event_at(&CameraEvent::MoveStarted(MoveReason::Gesture), later));
        assert!(!bar.handle_event_at(&CameraEvent::MoveCanceled, later));

        assert!(bar.update_visibility_at(start + Duration::from_secs(3)));
    }

    #[test]
    fn visibility_change_requests_redraw() {
        let redraws = Arc::new(AtomicUsize::new(0));
        let counter = redraws.clone();

        let mut bar = bar();
        bar.set_messenger(Some(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        }));

        let start = SystemTime::now();
        bar.handle_event_at(
            &CameraEvent::Move(MapView::new_projected(Default::default(), 1.0)),
            start,
        );
        let after_move = redraws.load(Ordering::Relaxed);

        bar.update_visibility_at(start + Duration::from_secs(4));
        assert_eq!(redraws.load(Ordering::Relaxed), after_move + 1);
    }

    #[test]
    fn reappearing_with_new_scale_requests_one_redraw() {
        let redraws = Arc::new(AtomicUsize::new(0));
        let counter = redraws.clone();

        let mut bar = bar();
        bar.set_messenger(Some(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        }));

        let start = SystemTime::now() + Duration::from_secs(3600);
        assert!(bar.update_visibility_at(start));
        assert_eq!(redraws.load(Ordering::Relaxed), 1);

        let before = bar.scale_bar().current_display_scale();
        assert!(bar.handle_event_at(&CameraEvent::Move(view()), start + Duration::from_secs(1)));
        assert_ne!(bar.scale_bar().current_display_scale(), before);
        assert!(bar.is_visible());
        assert_eq!(redraws.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn hidden_bar_renders_nothing() {
        let mut bar = bar();
        let start = SystemTime::now();
        bar.handle_event_at(&CameraEvent::Idle(view()), start);

        let mut canvas = RecordingCanvas::default();
        bar.render(&mut canvas);
        assert!(!canvas.calls.is_empty());

        bar.update_visibility_at(start + Duration::from_secs(3));
        let mut canvas = RecordingCanvas::default();
        bar.render(&mut canvas);
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn subscribed_bar_is_shown_by_map_movement() {
        let mut map = Map::new(view(), None);
        let bar = Arc::new(Mutex::new(bar()));
        let _subscription = DisappearingScaleBar::subscribe(&bar, map.camera_events());

        let far_future = SystemTime::now() + Duration::from_secs(3600);
        assert!(bar.lock().update_visibility_at(far_future));

        map.set_view(map.view().with_resolution(50.0));
        assert!(bar.lock().is_visible());
    }
}
