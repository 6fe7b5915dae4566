//! Scale bar: a ruler showing how much ground a part of the screen covers.
//!
//! On every camera change the [`ScaleBar`]
//!
//! 1. measures the ground length of its ruler with a [`ProjectionSampler`],
//! 2. converts it into labels with [`DisplayScale::from_meters`],
//! 3. asks the [`Messenger`] for a redraw if the labels changed.
//!
//! The bar is drawn with [`ScaleBar::render`]. [`DisappearingScaleBar`] additionally hides the
//! bar while the camera stands still.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use mapscale_types::{Point2d, Vector2d};
use parking_lot::Mutex;

use crate::control::{CameraEvent, CameraEvents, Subscription};
use crate::error::MapScaleError;
use crate::messenger::Messenger;
use crate::render::{
    Canvas, HorizontalAlignment, LinePaint, TextPaint, TextShadow, VerticalAlignment,
};
use crate::view::ScreenProjection;

mod config;
mod disappearing;
mod normalizer;
mod sampler;

pub use config::{ScaleBarConfig, ScaleBarStyle};
pub use disappearing::DisappearingScaleBar;
pub use normalizer::{feet_to_miles, meters_to_feet, DisplayScale, DistanceUnit, Measure};
pub use sampler::{GroundSpan, ProjectionSampler};

/// What the scale bar is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawState {
    /// The last computed scale is displayed.
    Idle,
    /// A new projection is being sampled.
    Recomputing,
}

/// Map scale bar.
///
/// The bar keeps only values derived from the last projection it saw (the ground span and the
/// display scale), never the projection itself.
pub struct ScaleBar {
    config: ScaleBarConfig,
    sampler: ProjectionSampler,
    span: GroundSpan,
    scale: DisplayScale,
    state: RedrawState,
    messenger: Option<Box<dyn Messenger>>,
}

impl std::fmt::Debug for ScaleBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaleBar")
            .field("config", &self.config)
            .field("sampler", &self.sampler)
            .field("span", &self.span)
            .field("scale", &self.scale)
            .field("state", &self.state)
            .field("messenger", &self.messenger.as_ref().map(|_| "..."))
            .finish()
    }
}

impl ScaleBar {
    /// Creates a new scale bar showing the scale of the `initial` projection.
    ///
    /// Fails if the configuration does not pass [`ScaleBarConfig::validate`]. If the initial
    /// projection cannot be sampled, the bar starts with a zero scale.
    pub fn new(
        config: ScaleBarConfig,
        initial: &impl ScreenProjection,
    ) -> Result<Self, MapScaleError> {
        config.validate()?;

        let sampler = sampler_for(&config);
        let span = sampler.sample(initial).unwrap_or_else(|err| {
            log::warn!("Initial scale cannot be computed: {err}");
            GroundSpan::default()
        });

        Ok(Self {
            config,
            sampler,
            span,
            scale: span.display_scale(),
            state: RedrawState::Idle,
            messenger: None,
        })
    }

    /// Configuration of the bar.
    pub fn config(&self) -> &ScaleBarConfig {
        &self.config
    }

    /// Replaces the configuration. The new geometry is applied on the next redraw. An invalid
    /// configuration is rejected and the current one is kept.
    pub fn set_config(&mut self, config: ScaleBarConfig) -> Result<(), MapScaleError> {
        config.validate()?;

        self.sampler = sampler_for(&config);
        self.config = config;
        Ok(())
    }

    /// Sets the messenger notified when the displayed scale changes.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }

    /// Scale currently displayed.
    pub fn current_display_scale(&self) -> DisplayScale {
        self.scale
    }

    /// Ground length of the ruler as last measured.
    pub fn ground_span(&self) -> GroundSpan {
        self.span
    }

    /// Current state of the bar.
    pub fn state(&self) -> RedrawState {
        self.state
    }

    /// Recomputes the scale for the new projection.
    ///
    /// If the projection cannot be sampled, the previous scale stays displayed. Returns true if
    /// the displayed scale changed.
    pub fn redraw(&mut self, projection: &impl ScreenProjection) -> bool {
        self.state = RedrawState::Recomputing;
        let changed = match self.sampler.sample(projection) {
            Ok(span) => {
                self.span = span;
                let scale = span.display_scale();
                log::trace!("Scale bar span is {} m, showing {scale}", span.meters());

                std::mem::replace(&mut self.scale, scale) != scale
            }
            Err(err) => {
                log::warn!("Scale bar keeps the previous scale: {err}");
                false
            }
        };
        self.state = RedrawState::Idle;

        if changed {
            if let Some(messenger) = &self.messenger {
                messenger.request_redraw();
            }
        }

        changed
    }

    /// Redraws the bar if the event carries a new view. Returns true if the displayed scale
    /// changed.
    pub fn handle_event(&mut self, event: &CameraEvent) -> bool {
        match event.view() {
            Some(view) => self.redraw(view),
            None => false,
        }
    }

    /// Subscribes the shared bar to the camera events. The bar is redrawn on every event
    /// carrying a view until the returned subscription is cancelled or dropped.
    pub fn subscribe(bar: &Arc<Mutex<ScaleBar>>, events: &CameraEvents) -> Subscription {
        let bar = bar.clone();
        events.subscribe(move |event: &CameraEvent| {
            bar.lock().handle_event(event);
        })
    }

    /// Redraws the bar for every event of the stream until the stream ends.
    pub async fn follow(&mut self, mut events: impl Stream<Item = CameraEvent> + Unpin) {
        while let Some(event) = events.next().await {
            self.handle_event(&event);
        }

        log::debug!("Camera event stream ended, scale bar stops following it");
    }

    /// Draws the ruler and both labels.
    pub fn render(&self, canvas: &mut impl Canvas) {
        let style = self.config.style();
        let size = self.config.size();
        let anchor = self.config.anchor();
        let at = |x: f64, y: f64| anchor + Vector2d::new(x, y);

        let width = size.width();
        let height = size.height();
        let start_x = width * (1.0 - self.config.measure_fraction());
        let mid_y = height / 2.0;

        let segments: [(Point2d, Point2d); 3] = [
            (at(start_x, mid_y), at(width, mid_y)),
            (at(start_x, height / 3.0), at(start_x, mid_y)),
            (at(start_x, mid_y), at(start_x, height * 2.0 / 3.0)),
        ];

        if !style.shadow_color.is_transparent() {
            let shadow = LinePaint {
                color: style.shadow_color,
                width: style.stroke_width + style.shadow_extra_width,
                line_cap: style.line_cap,
            };
            for (start, end) in segments {
                canvas.draw_line(start, end, shadow);
            }
        }

        let line = LinePaint {
            color: style.line_color,
            width: style.stroke_width,
            line_cap: style.line_cap,
        };
        for (start, end) in segments {
            canvas.draw_line(start, end, line);
        }

        let text_paint = TextPaint {
            font_size: style.font_size,
            color: style.text_color,
            horizontal_alignment: HorizontalAlignment::Right,
            vertical_alignment: VerticalAlignment::Middle,
            shadow: (!style.shadow_color.is_transparent()).then_some(TextShadow {
                color: style.shadow_color,
                offset: style.shadow_offset,
                blur_radius: style.shadow_blur,
            }),
        };

        canvas.draw_text(
            &self.scale.imperial.to_string(),
            at(width, height / 4.0),
            &text_paint,
        );
        canvas.draw_text(
            &self.scale.metric.to_string(),
            at(width, height * 3.0 / 4.0),
            &text_paint,
        );
    }
}

fn sampler_for(config: &ScaleBarConfig) -> ProjectionSampler {
    ProjectionSampler::new(
        config.anchor(),
        config.size().width(),
        config.measure_fraction(),
    )
}
