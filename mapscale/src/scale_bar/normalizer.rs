use std::fmt::{Display, Formatter};

const METERS_IN_KILOMETER: u64 = 1000;
const FEET_IN_MILE: f64 = 5280.0;
const MILLIMETERS_IN_INCH: f64 = 25.4;
const INCHES_IN_FOOT: f64 = 12.0;

/// Converts meters into feet using the international inch (25.4 mm).
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * 1000.0 / MILLIMETERS_IN_INCH / INCHES_IN_FOOT
}

/// Converts feet into miles.
pub fn feet_to_miles(feet: f64) -> f64 {
    feet / FEET_IN_MILE
}

/// Unit of a displayed distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    /// Meters (`m`).
    Meters,
    /// Kilometers (`km`).
    Kilometers,
    /// Feet (`ft`).
    Feet,
    /// Miles (`mi`).
    Miles,
}

impl DistanceUnit {
    /// Short label of the unit.
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Miles => "mi",
        }
    }
}

/// A whole number of units, as shown in a scale bar label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Measure {
    /// Number of units.
    pub magnitude: u64,
    /// The unit.
    pub unit: DistanceUnit,
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit.symbol())
    }
}

/// Length of the scale bar ruler on the ground, in metric and imperial units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayScale {
    /// Meters or kilometers.
    pub metric: Measure,
    /// Feet or miles.
    pub imperial: Measure,
}

impl DisplayScale {
    /// Chooses units and magnitudes for the given ground distance.
    ///
    /// The distance is truncated to whole meters first. Both axes are computed from that value
    /// independently:
    ///
    /// * metric: kilometers when the distance is strictly greater than 1000 m, meters otherwise;
    /// * imperial: miles when the distance is strictly greater than 5280 ft, feet otherwise.
    ///
    /// Magnitudes are truncated, not rounded, so 1999 m is shown as `1 km`.
    pub fn from_meters(meters: f64) -> Self {
        // `as` saturates: negative and NaN values become 0.
        let meters = meters as u64;

        Self {
            metric: metric_measure(meters),
            imperial: imperial_measure(meters_to_feet(meters as f64)),
        }
    }
}

impl Display for DisplayScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.imperial, self.metric)
    }
}

fn metric_measure(meters: u64) -> Measure {
    if meters > METERS_IN_KILOMETER {
        Measure {
            magnitude: meters / METERS_IN_KILOMETER,
            unit: DistanceUnit::Kilometers,
        }
    } else {
        Measure {
            magnitude: meters,
            unit: DistanceUnit::Meters,
        }
    }
}

fn imperial_measure(feet: f64) -> Measure {
    if feet > FEET_IN_MILE {
        Measure {
            magnitude: feet_to_miles(feet) as u64,
            unit: DistanceUnit::Miles,
        }
    } else {
        Measure {
            magnitude: feet as u64,
            unit: DistanceUnit::Feet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use insta::assert_snapshot;

    const DELTA: f64 = 0.0000001;

    #[test]
    fn unit_conversions() {
        assert_abs_diff_eq!(meters_to_feet(1.0), 3.280839895, epsilon = DELTA);

        let mile = feet_to_miles(5280.0);
        assert_eq!(mile, 1.0);
        assert!(feet_to_miles(5279.999999) < 1.0);
    }

    #[test]
    fn meters_up_to_kilometer_are_exact() {
        for meters in [0, 1, 10, 999, 1000] {
            let scale = DisplayScale::from_meters(meters as f64);
            assert_eq!(
                scale.metric,
                Measure {
                    magnitude: meters,
                    unit: DistanceUnit::Meters
                }
            );
        }
    }

    #[test]
    fn kilometers_are_truncated() {
        for (meters, km) in [(1001.0, 1), (1999.9, 1), (2000.0, 2), (123_456.0, 123)] {
            let scale = DisplayScale::from_meters(meters);
            assert_eq!(scale.metric.unit, DistanceUnit::Kilometers);
            assert_eq!(scale.metric.magnitude, km);
            assert!(scale.metric.magnitude >= 1);
        }
    }

    #[test]
    fn crossover_is_strict() {
        let scale = DisplayScale::from_meters(1000.0);
        assert_eq!(scale.metric.unit, DistanceUnit::Meters);
        assert_eq!(scale.metric.magnitude, 1000);

        // 1609 m is 5278.87 ft, 1610 m is 5282.15 ft
        let scale = DisplayScale::from_meters(1609.0);
        assert_eq!(scale.imperial.unit, DistanceUnit::Feet);
        let scale = DisplayScale::from_meters(1610.0);
        assert_eq!(scale.imperial.unit, DistanceUnit::Miles);
        assert_eq!(scale.imperial.magnitude, 1);

        assert_eq!(
            imperial_measure(5280.0),
            Measure {
                magnitude: 5280,
                unit: DistanceUnit::Feet
            }
        );
        assert_eq!(imperial_measure(5280.5).unit, DistanceUnit::Miles);
    }

    #[test]
    fn mile_scale() {
        let scale = DisplayScale::from_meters(1609.0);
        assert_snapshot!(scale.metric, @"1 km");
        assert_snapshot!(scale.imperial, @"5278 ft");

        let scale = DisplayScale::from_meters(10.0);
        assert_snapshot!(scale.metric, @"10 m");
        assert_snapshot!(scale.imperial, @"32 ft");

        let scale = DisplayScale::from_meters(50_000.0);
        assert_snapshot!(scale, @"31 mi / 50 km");
    }

    #[test]
    fn zero_and_invalid_distances() {
        for meters in [0.0, 0.9, -5.0, f64::NAN] {
            let scale = DisplayScale::from_meters(meters);
            assert_eq!(scale.to_string(), "0 ft / 0 m", "distance {meters}");
        }
    }

    #[test]
    fn recomputation_is_idempotent() {
        let first = DisplayScale::from_meters(4321.5);
        let second = DisplayScale::from_meters(4321.5);
        assert_eq!(first, second);
    }
}
