//! Geometry primitives for the `mapscale` crate.
//!
//! Two coordinate spaces are used:
//!
//! * cartesian space ([`cartesian`]) for screen pixels and projected map coordinates;
//! * geographic space ([`geo`]) for latitude/longitude points on the surface of the Earth,
//!   including great-circle distances and projections between the two spaces.

pub mod cartesian;
pub mod error;
pub mod geo;

pub use cartesian::{CartesianPoint2d, NewCartesianPoint2d, Point2d, Size, Vector2d};
