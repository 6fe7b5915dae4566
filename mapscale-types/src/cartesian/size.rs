use num_traits::{FromPrimitive, NumCast};
use serde::{Deserialize, Serialize};

/// Size of a rectangular area, e.g. the map viewport or a widget, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy + PartialEq = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + FromPrimitive + PartialOrd + Copy + NumCast> Size<Num> {
    /// Creates a new size.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Half of the width.
    pub fn half_width(&self) -> Num {
        self.width / (Num::one() + Num::one())
    }

    /// Height.
    pub fn height(&self) -> Num {
        self.height
    }

    /// Half of the height.
    pub fn half_height(&self) -> Num {
        self.height / (Num::one() + Num::one())
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }

    /// Returns true if either of the dimensions is negative.
    pub fn is_negative(&self) -> bool {
        self.width < Num::zero() || self.height < Num::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves() {
        let size = Size::new(65.0, 50.0);
        assert_eq!(size.half_width(), 32.5);
        assert_eq!(size.half_height(), 25.0);

        let size = Size::new(7u32, 3u32);
        assert_eq!(size.half_width(), 3);
    }

    #[test]
    fn zero_and_negative() {
        assert!(Size::new(0.0, 10.0).is_zero());
        assert!(!Size::new(1.0, 10.0).is_zero());
        assert!(Size::new(-1.0, 10.0).is_negative());
        assert!(!Size::new(1.0, 10.0).is_negative());
    }
}
