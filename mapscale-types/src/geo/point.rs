use num_traits::{Float, One};
use serde::{Deserialize, Serialize};

use crate::error::MapScaleTypesError;
use crate::geo::datum::Datum;

/// Point on the surface of a celestial body, given by its latitude and longitude in degrees.
pub trait GeoPoint {
    /// Numeric type of the coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }

    /// Great-circle distance to the `other` point in meters, measured on a sphere with the mean
    /// radius of the `datum`.
    ///
    /// Uses the haversine formula, which stays accurate for the short distances a scale bar
    /// usually covers.
    fn distance(&self, other: &impl GeoPoint<Num = Self::Num>, datum: &Datum) -> Self::Num {
        let one = Self::Num::one();
        let two = one + one;

        let d_lat = other.lat_rad() - self.lat_rad();
        let d_lon = other.lon_rad() - self.lon_rad();

        let hav = (d_lat / two).sin().powi(2)
            + self.lat_rad().cos() * other.lat_rad().cos() * (d_lon / two).sin().powi(2);
        let hav = hav.min(one);
        let central_angle = two * hav.sqrt().atan2((one - hav).sqrt());

        let radius: Self::Num =
            num_traits::cast(datum.mean_radius()).unwrap_or_else(Self::Num::nan);
        central_angle * radius
    }
}

/// Geo point that can be constructed from its coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude in degrees.
    fn latlon(lat: N, lon: N) -> Self;

    /// Creates a point from longitude and latitude in degrees.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// 2d point on the surface of a celestial body.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a point, checking that the latitude is within `[-90, 90]` and the longitude is
    /// finite.
    pub fn try_latlon(lat: f64, lon: f64) -> Result<Self, MapScaleTypesError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MapScaleTypesError::Conversion(format!(
                "latitude {lat} is outside of [-90, 90]"
            )));
        }

        if !lon.is_finite() {
            return Err(MapScaleTypesError::Conversion(format!(
                "longitude {lon} is not a finite number"
            )));
        }

        Ok(Self { lat, lon })
    }
}

/// Total great-circle length of the path going through the `points` in order, in meters.
///
/// Returns `0.0` for an empty path or a path with a single point.
pub fn spherical_path_length(points: &[impl GeoPoint<Num = f64>], datum: &Datum) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1], datum))
        .sum()
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use mapscale_types::geo::GeoPoint;
/// use mapscale_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <::mapscale_types::geo::GeoPoint2d as ::mapscale_types::geo::NewGeoPoint<f64>>::latlon(
            $lat, $lon,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn radius() -> f64 {
        Datum::WGS84.mean_radius()
    }

    #[test]
    fn distance_between_poles() {
        let up = GeoPoint2d::latlon(90.0, 0.0);
        let down = GeoPoint2d::latlon(-90.0, 0.0);

        assert_abs_diff_eq!(
            up.distance(&down, &Datum::WGS84),
            std::f64::consts::PI * radius(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn distance_along_equator() {
        let a = GeoPoint2d::latlon(0.0, 0.0);
        let b = GeoPoint2d::latlon(0.0, 1.0);

        assert_abs_diff_eq!(
            a.distance(&b, &Datum::WGS84),
            1f64.to_radians() * radius(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn distance_is_symmetric_and_zero_for_same_point() {
        let a = GeoPoint2d::latlon(55.75, 37.62);
        let b = GeoPoint2d::latlon(59.94, 30.31);

        assert_eq!(a.distance(&a, &Datum::WGS84), 0.0);
        assert_abs_diff_eq!(
            a.distance(&b, &Datum::WGS84),
            b.distance(&a, &Datum::WGS84),
            epsilon = 1e-6
        );
        // Moscow - Saint Petersburg is roughly 634 km
        assert_abs_diff_eq!(a.distance(&b, &Datum::WGS84), 634_000.0, epsilon = 5_000.0);
    }

    #[test]
    fn path_length() {
        let empty: Vec<GeoPoint2d> = vec![];
        assert_eq!(spherical_path_length(&empty, &Datum::WGS84), 0.0);

        let path = [GeoPoint2d::latlon(0.0, 0.0), GeoPoint2d::latlon(0.1, 0.1)];
        let expected = radius() * 2f64.sqrt() * 0.1f64.to_radians();
        assert_abs_diff_eq!(
            spherical_path_length(&path, &Datum::WGS84),
            expected,
            epsilon = 1e-1
        );
    }

    #[test]
    fn try_latlon_checks_ranges() {
        assert!(GeoPoint2d::try_latlon(45.0, 10.0).is_ok());
        assert_matches!(
            GeoPoint2d::try_latlon(91.0, 10.0),
            Err(MapScaleTypesError::Conversion(_))
        );
        assert_matches!(
            GeoPoint2d::try_latlon(f64::NAN, 10.0),
            Err(MapScaleTypesError::Conversion(_))
        );
        assert_matches!(
            GeoPoint2d::try_latlon(0.0, f64::INFINITY),
            Err(MapScaleTypesError::Conversion(_))
        );
    }
}
