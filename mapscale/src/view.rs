use mapscale_types::error::MapScaleTypesError;
use mapscale_types::geo::{GeoPoint, GeoPoint2d, Projection, WebMercator};
use mapscale_types::{Point2d, Size, Vector2d};
use nalgebra::Rotation2;

use crate::error::MapScaleError;

/// Conversion from screen pixels into geographic coordinates, as provided by the view the user
/// currently looks at.
pub trait ScreenProjection {
    /// Converts the position on the screen (in pixels from the top-left corner) into a geographic
    /// point. Returns `None` if the pixel does not correspond to any point on the globe.
    fn screen_to_geo(&self, px_position: Point2d) -> Option<GeoPoint2d>;
}

/// Immutable snapshot of the map camera: what part of the web mercator plane is shown, at what
/// resolution and rotation, in a viewport of what size.
///
/// Every change of the camera produces a new `MapView`, so a value received with a camera event
/// never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    position: Point2d,
    resolution: f64,
    rotation_z: f64,
    size: Size,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            position: Point2d::origin(),
            resolution: 1.0,
            rotation_z: 0.0,
            size: Size::new(0.0, 0.0),
        }
    }
}

impl MapView {
    /// Creates a view centered at the given geographic point. `resolution` is the number of
    /// projected meters in one screen pixel.
    ///
    /// Fails if the center is not a valid geographic point or cannot be projected (for example,
    /// a pole).
    pub fn new(center: &impl GeoPoint<Num = f64>, resolution: f64) -> Result<Self, MapScaleError> {
        let center = GeoPoint2d::try_latlon(center.lat(), center.lon())?;
        let projection: WebMercator<GeoPoint2d, Point2d> = WebMercator::default();
        let position = projection.project(&center).ok_or_else(|| {
            MapScaleTypesError::Conversion(format!(
                "point ({}, {}) cannot be projected into web mercator",
                center.lat(),
                center.lon()
            ))
        })?;

        Ok(Self::new_projected(position, resolution))
    }

    /// Creates a view centered at the given point in projected coordinates.
    pub fn new_projected(position: Point2d, resolution: f64) -> Self {
        Self {
            position,
            resolution,
            ..Default::default()
        }
    }

    /// Center of the view in projected coordinates.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// Center of the view in geographic coordinates.
    pub fn center(&self) -> Option<GeoPoint2d> {
        WebMercator::<GeoPoint2d, Point2d>::default().unproject(&self.position)
    }

    /// Number of projected meters in one screen pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns a copy of the view with the given resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Size of the viewport in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy of the view with the given viewport size.
    pub fn with_size(&self, new_size: Size) -> Self {
        Self {
            size: new_size,
            ..*self
        }
    }

    /// Rotation of the map around the view center in radians, counterclockwise.
    pub fn rotation_z(&self) -> f64 {
        self.rotation_z
    }

    /// Returns a copy of the view with the given rotation.
    pub fn with_rotation_z(&self, rotation_z: f64) -> Self {
        Self {
            rotation_z,
            ..*self
        }
    }

    /// Converts a screen position (pixels from the top-left corner) into projected coordinates.
    pub fn screen_to_map(&self, px_position: Point2d) -> Point2d {
        let x0 = (px_position.x - self.size.half_width()) * self.resolution;
        let y0 = (self.size.half_height() - px_position.y) * self.resolution;

        let rotation = Rotation2::new(-self.rotation_z);
        self.position + rotation * Vector2d::new(x0, y0)
    }

    /// Returns the view moved so that the map point under `from` ends up under `to`.
    pub fn translate_by_pixels(&self, from: Point2d, to: Point2d) -> Self {
        let delta = self.screen_to_map(to) - self.screen_to_map(from);
        self.translate(delta)
    }

    /// Returns the view with the content moved by `delta` projected meters.
    pub fn translate(&self, delta: Vector2d) -> Self {
        Self {
            position: self.position - delta,
            ..*self
        }
    }

    /// Returns the view with the resolution multiplied by `zoom`, keeping the map point under
    /// `base_point` in place.
    pub fn zoom(&self, zoom: f64, base_point: Point2d) -> Self {
        let base_point = self.screen_to_map(base_point);
        Self {
            position: base_point + (self.position - base_point) * zoom,
            resolution: self.resolution * zoom,
            ..*self
        }
    }

    /// Linear interpolation between two views, `k` being in `[0, 1]`.
    pub fn interpolate(&self, target: &MapView, k: f64) -> Self {
        Self {
            position: self.position + (target.position - self.position) * k,
            resolution: self.resolution + (target.resolution - self.resolution) * k,
            rotation_z: self.rotation_z + (target.rotation_z - self.rotation_z) * k,
            ..*self
        }
    }
}

impl ScreenProjection for MapView {
    fn screen_to_geo(&self, px_position: Point2d) -> Option<GeoPoint2d> {
        let projection: WebMercator<GeoPoint2d, Point2d> = WebMercator::default();
        projection.unproject(&self.screen_to_map(px_position))
    }
}
