use nalgebra::{Point2, Scalar, Vector2};
use num_traits::Float;

/// Point in 2d cartesian space with `f64` coordinates. Used both for screen pixels and for
/// projected map coordinates.
pub type Point2d = Point2<f64>;

/// Vector in 2d cartesian space with `f64` coordinates.
pub type Vector2d = Vector2<f64>;

/// Point in 2d cartesian coordinate space.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Float + Scalar;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Vector from `other` to `self`.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance between the points.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let v = self.sub(other);
        v.x * v.x + v.y * v.y
    }

    /// Euclidean distance between the points.
    fn distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        self.distance_sq(other).sqrt()
    }
}

/// Cartesian point that can be constructed from its coordinates.
pub trait NewCartesianPoint2d<Num = f64>: CartesianPoint2d<Num = Num> {
    /// Creates a new point.
    fn new(x: Num, y: Num) -> Self;
}

impl<Num: Float + Scalar> CartesianPoint2d for Point2<Num> {
    type Num = Num;

    fn x(&self) -> Num {
        self.x
    }

    fn y(&self) -> Num {
        self.y
    }
}

impl<Num: Float + Scalar> NewCartesianPoint2d<Num> for Point2<Num> {
    fn new(x: Num, y: Num) -> Self {
        Point2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let a = Point2d::new(1.0, 1.0);
        let b = Point2d::new(4.0, 5.0);

        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.sub(&a), Vector2d::new(3.0, 4.0));
    }
}
