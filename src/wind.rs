//! Wind resolution against runway headings
//!
//! Splits the reported wind into components along and across a runway.
//! Steady wind and gust are resolved independently with the same transform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{RunwayEnd, WeatherObservation};

/// Wind resolved against one heading, in knots.
///
/// `headwind_kt` is negative for a tailwind. `crosswind_kt` is positive when
/// the wind comes from the right of the runway heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindComponents {
    pub headwind_kt: f64,
    pub crosswind_kt: f64,
}

/// Which side of the runway the crosswind blows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrosswindSide {
    Left,
    Right,
    None,
}

/// Crosswind as shown to a pilot: non-negative magnitude plus a side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crosswind {
    pub magnitude_kt: f64,
    pub side: CrosswindSide,
}

impl WindComponents {
    /// Resolve `speed_kt` from `direction_deg` against `heading_deg`
    #[must_use]
    pub fn resolve(speed_kt: f64, direction_deg: f64, heading_deg: f64) -> Self {
        let angle = (direction_deg - heading_deg).to_radians();
        Self {
            headwind_kt: speed_kt * angle.cos(),
            crosswind_kt: speed_kt * angle.sin(),
        }
    }

    /// Both components truncated toward zero to whole knots
    #[must_use]
    pub fn truncated(&self) -> Self {
        Self {
            headwind_kt: self.headwind_kt.trunc(),
            crosswind_kt: self.crosswind_kt.trunc(),
        }
    }

    /// Headwind fed to the distance models: whole knots times `factor`
    #[must_use]
    pub fn effective_headwind(&self, factor: f64) -> f64 {
        self.headwind_kt.trunc() * factor
    }

    #[must_use]
    pub fn crosswind(&self) -> Crosswind {
        let side = if self.crosswind_kt > 0.0 {
            CrosswindSide::Right
        } else if self.crosswind_kt < 0.0 {
            CrosswindSide::Left
        } else {
            CrosswindSide::None
        };
        Crosswind {
            magnitude_kt: self.crosswind_kt.abs(),
            side,
        }
    }
}

impl fmt::Display for CrosswindSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrosswindSide::Left => write!(f, "L"),
            CrosswindSide::Right => write!(f, "R"),
            CrosswindSide::None => Ok(()),
        }
    }
}

/// `7R`, `3L` or `0`, whole knots
impl fmt::Display for Crosswind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let knots = self.magnitude_kt.trunc();
        if knots == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{knots}{}", self.side)
        }
    }
}

/// Steady and gust components for one heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunwayWind {
    pub heading_deg: f64,
    pub steady: WindComponents,
    pub gust: WindComponents,
}

/// Resolves one observation against any number of headings
#[derive(Debug, Clone, Copy)]
pub struct WindResolver<'a> {
    observation: &'a WeatherObservation,
}

impl<'a> WindResolver<'a> {
    #[must_use]
    pub fn new(observation: &'a WeatherObservation) -> Self {
        Self { observation }
    }

    #[must_use]
    pub fn resolve(&self, heading_deg: f64) -> RunwayWind {
        let direction = f64::from(self.observation.wind_direction_deg);
        RunwayWind {
            heading_deg,
            steady: WindComponents::resolve(
                f64::from(self.observation.wind_speed_kt),
                direction,
                heading_deg,
            ),
            gust: WindComponents::resolve(
                f64::from(self.observation.wind_gust_kt),
                direction,
                heading_deg,
            ),
        }
    }

    #[must_use]
    pub fn for_runway_end(&self, end: &RunwayEnd) -> RunwayWind {
        self.resolve(end.heading_deg)
    }

    /// Magnetic runway number, e.g. 14 resolves against 140°
    #[must_use]
    pub fn for_runway_number(&self, number: u8) -> RunwayWind {
        self.resolve(f64::from(number) * 10.0)
    }
}

/// Designator of the opposite runway end.
///
/// The runway number gains 18 modulo 36, with 0 written as 36, and is always
/// written with two digits. `L` and `R` swap; any other suffix is kept.
/// Returns `None` when the designator does not start with a runway number.
#[must_use]
pub fn reciprocal_designator(designator: &str) -> Option<String> {
    let designator = designator.trim();
    let digits = designator
        .chars()
        .take(2)
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }

    let (number, suffix) = designator.split_at(digits);
    let number: u32 = number.parse().ok()?;
    if number > 36 {
        return None;
    }

    let reciprocal = match (number + 18) % 36 {
        0 => 36,
        n => n,
    };
    let suffix = match suffix {
        "L" => "R",
        "R" => "L",
        other => other,
    };

    Some(format!("{reciprocal:02}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case("09L", "27R")]
    #[case("27R", "09L")]
    #[case("36", "18")]
    #[case("18", "36")]
    #[case("01", "19")]
    #[case("18C", "36C")]
    #[case("04", "22")]
    fn test_reciprocal_designator(#[case] designator: &str, #[case] expected: &str) {
        assert_eq!(reciprocal_designator(designator).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("H1")]
    #[case("N")]
    #[case("45")]
    fn test_reciprocal_of_non_runway_number(#[case] designator: &str) {
        assert!(reciprocal_designator(designator).is_none());
    }

    #[rstest]
    #[case("09L")]
    #[case("36")]
    #[case("13R")]
    #[case("18C")]
    fn test_reciprocal_designator_is_involution(#[case] designator: &str) {
        let back = reciprocal_designator(designator).and_then(|r| reciprocal_designator(&r));
        assert_eq!(back.as_deref(), Some(designator));
    }

    #[test]
    fn test_wind_straight_down_the_runway() {
        let components = WindComponents::resolve(12.0, 140.0, 140.0);
        assert_abs_diff_eq!(components.headwind_kt, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(components.crosswind_kt, 0.0, epsilon = 1e-9);

        let tail = WindComponents::resolve(12.0, 140.0, 320.0);
        assert_abs_diff_eq!(tail.headwind_kt, -12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_crosswind_side() {
        // wind from 90° right of the heading
        let right = WindComponents::resolve(10.0, 230.0, 140.0);
        assert_eq!(right.crosswind().side, CrosswindSide::Right);
        assert_abs_diff_eq!(right.crosswind().magnitude_kt, 10.0, epsilon = 1e-9);
        assert_eq!(right.crosswind().to_string(), "10R");

        let left = WindComponents::resolve(10.0, 60.0, 140.0);
        assert_eq!(left.crosswind().side, CrosswindSide::Left);
        assert!(left.crosswind().magnitude_kt >= 0.0);
        assert_eq!(left.truncated().crosswind().to_string(), "9L");

        let calm = WindComponents::resolve(0.0, 0.0, 140.0);
        assert_eq!(calm.crosswind().side, CrosswindSide::None);
        assert_eq!(calm.crosswind().to_string(), "0");
    }

    #[rstest]
    fn test_components_preserve_magnitude(
        #[values(0.0, 5.0, 18.0, 35.0)] speed: f64,
        #[values(0.0, 45.0, 140.0, 359.0)] direction: f64,
        #[values(10.0, 92.0, 272.0, 360.0)] heading: f64,
    ) {
        let c = WindComponents::resolve(speed, direction, heading);
        assert_abs_diff_eq!(
            c.headwind_kt.powi(2) + c.crosswind_kt.powi(2),
            speed * speed,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_effective_headwind_truncates_then_scales() {
        let components = WindComponents {
            headwind_kt: 9.9,
            crosswind_kt: 0.0,
        };
        assert_abs_diff_eq!(components.effective_headwind(1.15), 9.0 * 1.15);

        let tail = WindComponents {
            headwind_kt: -4.6,
            crosswind_kt: 0.0,
        };
        assert_abs_diff_eq!(tail.effective_headwind(1.15), -4.0 * 1.15);
    }

    #[test]
    fn test_resolver_uses_gust_separately() {
        let observation = WeatherObservation {
            wind_direction_deg: 140,
            wind_speed_kt: 12,
            wind_gust_kt: 18,
            ..WeatherObservation::default()
        };
        let resolver = WindResolver::new(&observation);

        let wind = resolver.for_runway_number(14);
        assert_abs_diff_eq!(wind.steady.headwind_kt, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wind.gust.headwind_kt, 18.0, epsilon = 1e-9);

        let end = RunwayEnd::new("32", 320.0, 4000);
        let wind = resolver.for_runway_end(&end);
        assert_abs_diff_eq!(wind.steady.headwind_kt, -12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wind.gust.headwind_kt, -18.0, epsilon = 1e-9);
    }
}
