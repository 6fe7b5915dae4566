//! Types and functions on points in cartesian coordinates.

mod point;
mod size;

pub use point::{CartesianPoint2d, NewCartesianPoint2d, Point2d, Vector2d};
pub use size::Size;
