use std::time::Duration;

use mapscale_types::{Point2d, Size};
use web_time::SystemTime;

use crate::control::{CameraEvent, CameraEvents, MoveReason};
use crate::messenger::Messenger;
use crate::view::MapView;

const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Map camera state. Keeps the currently displayed [`MapView`] and publishes every change of it
/// through [`Map::camera_events`].
pub struct Map {
    view: MapView,
    camera_events: CameraEvents,
    messenger: Option<Box<dyn Messenger>>,
    animation: Option<AnimationParameters>,
    gesture_in_progress: bool,
}

struct AnimationParameters {
    start_view: MapView,
    end_view: MapView,
    start_time: SystemTime,
    duration: Duration,
}

impl Map {
    /// Creates a new map.
    pub fn new(view: MapView, messenger: Option<Box<dyn Messenger + 'static>>) -> Self {
        Self {
            view,
            camera_events: CameraEvents::new(),
            messenger,
            animation: None,
            gesture_in_progress: false,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Channel of the camera events of this map.
    pub fn camera_events(&self) -> &CameraEvents {
        &self.camera_events
    }

    /// Changes the view of the map to the given one at once.
    pub fn set_view(&mut self, view: MapView) {
        self.stop_animation();
        self.camera_events
            .emit(CameraEvent::MoveStarted(MoveReason::DeveloperAnimation));
        self.update_view(view);
        self.camera_events.emit(CameraEvent::Idle(self.view));
    }

    /// Set the size of the map viewport.
    pub fn set_size(&mut self, new_size: Size) {
        if self.view.size() == new_size {
            return;
        }

        self.update_view(self.view.with_size(new_size));
        self.camera_events.emit(CameraEvent::Idle(self.view));
    }

    /// Moves the map following a drag gesture from one screen point to another. Call
    /// [`Map::end_gesture`] when the user releases the map.
    pub fn pan_by_pixels(&mut self, from: Point2d, to: Point2d) {
        self.start_gesture();
        self.update_view(self.view.translate_by_pixels(from, to));
    }

    /// Zooms the map around the given screen point following a gesture. Values of `zoom` less
    /// than `1.0` zoom in. Call [`Map::end_gesture`] when the gesture is over.
    pub fn zoom(&mut self, zoom: f64, base_point: Point2d) {
        self.start_gesture();
        self.update_view(self.view.zoom(zoom, base_point));
    }

    /// Finishes the current gesture.
    pub fn end_gesture(&mut self) {
        if std::mem::take(&mut self.gesture_in_progress) {
            self.camera_events.emit(CameraEvent::Idle(self.view));
        }
    }

    /// Request a gradual change of the map view to the specified view. The view is changed by
    /// calls to [`Map::animate`].
    pub fn animate_to(&mut self, target: MapView, duration: Duration) {
        self.stop_animation();
        self.animation = Some(AnimationParameters {
            start_view: self.view,
            end_view: target,
            start_time: SystemTime::now() - FRAME_DURATION,
            duration,
        });
        self.camera_events
            .emit(CameraEvent::MoveStarted(MoveReason::ApiAnimation));
        self.redraw();
    }

    /// Update the view of the map before the rendering in case [`Map::animate_to`] was called.
    pub fn animate(&mut self) {
        let Some(animation) = &self.animation else {
            return;
        };

        let k = SystemTime::now()
            .duration_since(animation.start_time)
            .unwrap_or_default()
            .as_secs_f64()
            / animation.duration.as_secs_f64();

        if k >= 1.0 {
            let end_view = animation.end_view;
            self.animation = None;
            self.update_view(end_view);
            self.camera_events.emit(CameraEvent::Idle(self.view));
        } else {
            let view = animation.start_view.interpolate(&animation.end_view, k);
            self.update_view(view);
        }
    }

    /// Returns true if an animation started with [`Map::animate_to`] is not finished yet.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target view of the current animation.
    pub fn target_view(&self) -> &MapView {
        self.animation
            .as_ref()
            .map(|v| &v.end_view)
            .unwrap_or(&self.view)
    }

    /// Stops the current animation, leaving the view where it is.
    pub fn cancel_animation(&mut self) {
        if self.stop_animation() {
            self.camera_events.emit(CameraEvent::Idle(self.view));
        }
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Sets the new messenger for the map.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }

    fn update_view(&mut self, view: MapView) {
        self.view = view;
        self.camera_events.emit(CameraEvent::Move(view));
        self.redraw();
    }

    fn start_gesture(&mut self) {
        self.stop_animation();
        if !self.gesture_in_progress {
            self.gesture_in_progress = true;
            self.camera_events
                .emit(CameraEvent::MoveStarted(MoveReason::Gesture));
        }
    }

    fn stop_animation(&mut self) -> bool {
        if self.animation.take().is_some() {
            self.camera_events.emit(CameraEvent::MoveCanceled);
            true
        } else {
            false
        }
    }
}

impl Drop for Map {
    fn drop(&mut self) {
        self.camera_events.close();
    }
}
