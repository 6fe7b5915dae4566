use mapscale_types::geo::{Datum, GeoPoint};
use mapscale_types::{Point2d, Vector2d};

use crate::error::MapScaleError;
use crate::scale_bar::normalizer::DisplayScale;
use crate::view::ScreenProjection;

/// Ground distance covered by the scale bar ruler, in meters.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct GroundSpan {
    meters: f64,
}

impl GroundSpan {
    /// Creates a span of the given length.
    pub fn new(meters: f64) -> Self {
        Self { meters }
    }

    /// Length in meters.
    pub fn meters(&self) -> f64 {
        self.meters
    }

    /// Length in display units.
    pub fn display_scale(&self) -> DisplayScale {
        DisplayScale::from_meters(self.meters)
    }
}

/// Measures how much ground a horizontal strip of the screen covers.
///
/// The strip starts at `anchor` and is `width` pixels long. Only `measure_fraction` of it is
/// counted, as the ruler occupies the right part of the widget and leaves space for its
/// left tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSampler {
    anchor: Point2d,
    width: f64,
    measure_fraction: f64,
    datum: Datum,
}

impl ProjectionSampler {
    /// Creates a new sampler measuring on the WGS84 mean sphere.
    pub fn new(anchor: Point2d, width: f64, measure_fraction: f64) -> Self {
        Self {
            anchor,
            width,
            measure_fraction,
            datum: Datum::WGS84,
        }
    }

    /// Returns the sampler using another datum for distance calculation.
    pub fn with_datum(self, datum: Datum) -> Self {
        Self { datum, ..self }
    }

    /// Screen points the distance is measured between.
    pub fn anchors(&self) -> (Point2d, Point2d) {
        (self.anchor, self.anchor + Vector2d::new(self.width, 0.0))
    }

    /// Converts both ends of the strip into geographic points and returns the great-circle
    /// distance between them multiplied by the measure fraction.
    pub fn sample(&self, projection: &impl ScreenProjection) -> Result<GroundSpan, MapScaleError> {
        let (left, right) = self.anchors();
        let left_geo = projection
            .screen_to_geo(left)
            .ok_or(MapScaleError::Unprojectable(left))?;
        let right_geo = projection
            .screen_to_geo(right)
            .ok_or(MapScaleError::Unprojectable(right))?;

        let width_meters = left_geo.distance(&right_geo, &self.datum);
        Ok(GroundSpan::new(width_meters * self.measure_fraction))
    }
}
