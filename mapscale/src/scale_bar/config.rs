use std::time::Duration;

use mapscale_types::{Point2d, Size, Vector2d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MapScaleError;
use crate::render::LineCap;
use crate::Color;

const DEFAULT_WIDTH: f64 = 65.0;
const DEFAULT_HEIGHT: f64 = 50.0;
const DEFAULT_MEASURE_FRACTION: f64 = 8.0 / 9.0;
const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_millis(3000);

/// Configuration of a [`ScaleBar`](super::ScaleBar).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScaleBarConfig {
    size: Size,
    anchor: Point2d,
    measure_fraction: f64,
    style: ScaleBarStyle,
    visibility_timeout: Duration,
}

impl Default for ScaleBarConfig {
    fn default() -> Self {
        Self {
            size: Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            anchor: Point2d::origin(),
            measure_fraction: DEFAULT_MEASURE_FRACTION,
            style: ScaleBarStyle::default(),
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
        }
    }
}

impl ScaleBarConfig {
    /// Size of the widget in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets size of the widget in pixels.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets size of the widget in pixels.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Position of the top-left corner of the widget on the screen.
    ///
    /// The ground distance is measured along the top edge of the widget, so the anchor also
    /// defines which part of the map the scale applies to.
    pub fn anchor(&self) -> Point2d {
        self.anchor
    }

    /// Sets position of the top-left corner of the widget on the screen.
    pub fn with_anchor(mut self, anchor: Point2d) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets position of the top-left corner of the widget on the screen.
    pub fn set_anchor(&mut self, anchor: Point2d) {
        self.anchor = anchor;
    }

    /// Part of the widget width occupied by the ruler, counted from the right edge.
    ///
    /// Default value is `8/9`.
    pub fn measure_fraction(&self) -> f64 {
        self.measure_fraction
    }

    /// Sets part of the widget width occupied by the ruler, counted from the right edge.
    pub fn with_measure_fraction(mut self, fraction: f64) -> Self {
        self.measure_fraction = fraction;
        self
    }

    /// Sets part of the widget width occupied by the ruler, counted from the right edge.
    pub fn set_measure_fraction(&mut self, fraction: f64) {
        self.measure_fraction = fraction;
    }

    /// Colors and line widths.
    pub fn style(&self) -> &ScaleBarStyle {
        &self.style
    }

    /// Sets colors and line widths.
    pub fn with_style(mut self, style: ScaleBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets colors and line widths.
    pub fn set_style(&mut self, style: ScaleBarStyle) {
        self.style = style;
    }

    /// How long a disappearing scale bar stays visible after the last camera movement.
    pub fn visibility_timeout(&self) -> Duration {
        self.visibility_timeout
    }

    /// Sets how long a disappearing scale bar stays visible after the last camera movement.
    pub fn with_visibility_timeout(mut self, timeout: Duration) -> Self {
        self.visibility_timeout = timeout;
        self
    }

    /// Sets how long a disappearing scale bar stays visible after the last camera movement.
    pub fn set_visibility_timeout(&mut self, timeout: Duration) {
        self.visibility_timeout = timeout;
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> Result<(), MapScaleError> {
        if !(self.measure_fraction > 0.0 && self.measure_fraction <= 1.0) {
            return Err(MapScaleError::InvalidConfiguration(format!(
                "measure fraction must be in (0, 1], got {}",
                self.measure_fraction
            )));
        }

        let size_is_finite = self.size.width().is_finite() && self.size.height().is_finite();
        if self.size.is_negative() || !size_is_finite {
            return Err(MapScaleError::InvalidConfiguration(format!(
                "scale bar size must be finite and non-negative, got {}x{}",
                self.size.width(),
                self.size.height()
            )));
        }

        if !self.anchor.x.is_finite() || !self.anchor.y.is_finite() {
            return Err(MapScaleError::InvalidConfiguration(
                "scale bar anchor must be finite".into(),
            ));
        }

        Ok(())
    }
}

/// Colors and sizes of the scale bar elements.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScaleBarStyle {
    /// Color of the labels.
    pub text_color: Color,
    /// Color of the ruler.
    pub line_color: Color,
    /// Color of the outline drawn under the ruler and of the label shadows. Set to a
    /// transparent color to disable them.
    pub shadow_color: Color,
    /// Width of the ruler lines in pixels.
    pub stroke_width: f64,
    /// Shape of the ruler line ends.
    pub line_cap: LineCap,
    /// How much wider the ruler outline is than the ruler itself, in pixels.
    pub shadow_extra_width: f64,
    /// Font size of the labels in pixels.
    pub font_size: f64,
    /// Offset of the label shadows in pixels.
    pub shadow_offset: Vector2d,
    /// Blur radius of the label shadows in pixels.
    pub shadow_blur: f64,
}

impl Default for ScaleBarStyle {
    fn default() -> Self {
        Self {
            text_color: Color::DARK_GRAY,
            line_color: Color::DARK_GRAY,
            shadow_color: Color::WHITE,
            stroke_width: 4.0,
            line_cap: LineCap::Round,
            shadow_extra_width: 3.0,
            font_size: 12.0,
            shadow_offset: Vector2d::new(2.0, 2.0),
            shadow_blur: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScaleBarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size(), Size::new(65.0, 50.0));
        assert_eq!(config.visibility_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn builder_methods() {
        let mut config = ScaleBarConfig::default()
            .with_anchor(Point2d::new(10.0, 500.0))
            .with_measure_fraction(0.5)
            .with_visibility_timeout(Duration::from_millis(100));
        config.set_size(Size::new(100.0, 40.0));

        assert_eq!(config.anchor(), Point2d::new(10.0, 500.0));
        assert_eq!(config.measure_fraction(), 0.5);
        assert_eq!(config.size(), Size::new(100.0, 40.0));
        assert_eq!(config.visibility_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn invalid_measure_fraction() {
        for fraction in [0.0, -0.5, 1.5, f64::NAN] {
            let config = ScaleBarConfig::default().with_measure_fraction(fraction);
            assert_matches!(
                config.validate(),
                Err(MapScaleError::InvalidConfiguration(_))
            );
        }
    }

    #[test]
    fn invalid_size() {
        let config = ScaleBarConfig::default().with_size(Size::new(-1.0, 50.0));
        assert_matches!(
            config.validate(),
            Err(MapScaleError::InvalidConfiguration(_))
        );

        let config = ScaleBarConfig::default().with_size(Size::new(f64::INFINITY, 50.0));
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_config() {
        let config: ScaleBarConfig = serde_json::from_str(
            r##"{
                "measure_fraction": 0.75,
                "style": { "line_color": "#FF0000", "stroke_width": 2.0, "line_cap": "Butt" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.measure_fraction(), 0.75);
        assert_eq!(config.style().line_color, Color::rgba(255, 0, 0, 255));
        assert_eq!(config.style().stroke_width, 2.0);
        assert_eq!(config.style().line_cap, LineCap::Butt);
        assert_eq!(config.style().text_color, Color::DARK_GRAY);
        assert_eq!(config.size(), Size::new(65.0, 50.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_survives_serialization() {
        let config = ScaleBarConfig::default().with_anchor(Point2d::new(12.0, 34.0));
        let json = serde_json::to_string(&config).unwrap();
        let restored: ScaleBarConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, config);
    }
}
