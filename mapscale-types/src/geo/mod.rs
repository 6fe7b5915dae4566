//! Points in geographic coordinates (latitude and longitude) (see [`GeoPoint`]), distances on the
//! surface of the Earth and projections from geographic to cartesian coordinates (see
//! [`Projection`]).

mod datum;
mod point;
pub mod projection;

pub use datum::Datum;
pub use point::{spherical_path_length, GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::{Projection, WebMercator};
