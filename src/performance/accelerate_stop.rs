//! Accelerate-stop distance
//!
//! No chart exists for this regime, so the distance is a multiplicative
//! model around an 1800 ft baseline at 59 °F, sea level, 4400 lb and no wind.
//! Every factor and correction term is exactly 1 at those conditions.

use super::domain::AccelerateStopDomain;

const BASELINE_FT: f64 = 1800.0;
const STANDARD_TEMPERATURE_F: f64 = 59.0;
const STANDARD_WEIGHT_LB: f64 = 4400.0;
const RANKINE_OFFSET: f64 = 459.67;

/// Top of the troposphere; above it the altitude factor is a fixed penalty
const TROPOPAUSE_FT: f64 = 36_089.0;
const TROPOPAUSE_FACTOR: f64 = 4.0;

const MIN_DISTANCE_FT: f64 = 600.0;
const MAX_DISTANCE_FT: f64 = 8000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelerateStopModel {
    domain: AccelerateStopDomain,
}

impl AccelerateStopModel {
    #[must_use]
    pub fn new(domain: AccelerateStopDomain) -> Self {
        Self { domain }
    }

    #[must_use]
    pub fn domain(&self) -> &AccelerateStopDomain {
        &self.domain
    }

    /// Distance in whole feet, always within [600, 8000].
    ///
    /// Inputs are saturated into the operating domain first; nothing is
    /// rejected.
    #[must_use]
    pub fn distance(
        &self,
        temperature_f: f64,
        pressure_altitude_ft: f64,
        weight_lb: f64,
        headwind_mph: f64,
    ) -> i32 {
        let temperature = self.domain.temperature_f.saturate("temperature", temperature_f);
        let altitude = self
            .domain
            .pressure_altitude_ft
            .saturate("pressure altitude", pressure_altitude_ft);
        let weight = self.domain.weight_lb.saturate("weight", weight_lb);
        let headwind = self.domain.headwind_mph.saturate("headwind", headwind_mph);

        let distance = BASELINE_FT
            * temperature_factor(temperature)
            * altitude_factor(altitude)
            * weight_factor(weight)
            * headwind_factor(headwind)
            * temperature_correction(temperature)
            * altitude_correction(altitude)
            * weight_correction(weight);

        // clamped into a small positive range, so the cast cannot overflow
        distance.clamp(MIN_DISTANCE_FT, MAX_DISTANCE_FT).round() as i32
    }
}

/// Ideal-gas density ratio
fn temperature_factor(temperature_f: f64) -> f64 {
    (temperature_f + RANKINE_OFFSET) / (STANDARD_TEMPERATURE_F + RANKINE_OFFSET)
}

/// Power-law density ratio, with a bonus below sea level and a fixed
/// penalty above the tropopause
pub(crate) fn altitude_factor(pressure_altitude_ft: f64) -> f64 {
    if pressure_altitude_ft > TROPOPAUSE_FT {
        return TROPOPAUSE_FACTOR;
    }

    let ratio = (1.0 - 6.8756e-6 * pressure_altitude_ft).clamp(0.1, 1.5);
    let factor = ratio.powf(-4.2561);

    if pressure_altitude_ft < 0.0 {
        let bonus = pressure_altitude_ft.abs() / 10_000.0;
        (factor * (1.0 - bonus * 0.1)).max(0.5)
    } else {
        factor
    }
}

fn weight_factor(weight_lb: f64) -> f64 {
    weight_lb / STANDARD_WEIGHT_LB
}

/// 2.5 % shorter per mph, never below 40 %
fn headwind_factor(headwind_mph: f64) -> f64 {
    (1.0 - headwind_mph * 0.025).clamp(0.4, 1.0)
}

fn temperature_correction(temperature_f: f64) -> f64 {
    let deviation = (temperature_f - STANDARD_TEMPERATURE_F) / 80.0;
    1.0 + deviation.powi(2) * 0.08
}

fn altitude_correction(pressure_altitude_ft: f64) -> f64 {
    if pressure_altitude_ft >= 0.0 {
        1.0 + (pressure_altitude_ft / 8000.0).powf(1.2) * 0.12
    } else {
        (1.0 - (pressure_altitude_ft.abs() / 8000.0).powf(0.8) * 0.08).max(0.7)
    }
}

fn weight_correction(weight_lb: f64) -> f64 {
    let deviation = (weight_lb - STANDARD_WEIGHT_LB) / 1000.0;
    1.0 + deviation.powi(2) * 0.05
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn model() -> AccelerateStopModel {
        AccelerateStopModel::default()
    }

    #[test]
    fn test_standard_conditions_give_baseline() {
        assert_eq!(model().distance(59.0, 0.0, 4400.0, 0.0), 1800);
    }

    #[test]
    fn test_hot_day() {
        // 32 °C, PA 880 ft, default loading
        let calm = model().distance(89.6, 880.0, 4469.95, 0.0);
        let windy = model().distance(89.6, 880.0, 4469.95, 13.8);
        assert!((calm - 2028).abs() <= 1, "calm was {calm}");
        assert!((windy - 1328).abs() <= 1, "windy was {windy}");
    }

    #[rstest]
    #[case(59.0, 0.0)]
    #[case(100.0, 5000.0)]
    #[case(-20.0, -1500.0)]
    #[case(140.0, 15_000.0)]
    fn test_monotonic_in_weight(#[case] temperature: f64, #[case] altitude: f64) {
        let distances: Vec<i32> = (3000..=5600)
            .step_by(100)
            .map(|weight| model().distance(temperature, altitude, f64::from(weight), 5.0))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[rstest]
    #[case(3000.0)]
    #[case(4400.0)]
    #[case(5600.0)]
    fn test_monotonic_in_headwind(#[case] weight: f64) {
        let distances: Vec<i32> = (0..=30)
            .map(|mph| model().distance(75.0, 2000.0, weight, f64::from(mph)))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[rstest]
    #[case(140.0, 15_000.0, 5600.0, 0.0)]
    #[case(-60.0, -2000.0, 3000.0, 25.0)]
    #[case(1e9, 1e9, 1e9, -5.0)]
    #[case(-1e9, -1e9, -1e9, 1e9)]
    #[case(f64::NAN, f64::NAN, f64::NAN, f64::NAN)]
    fn test_always_within_bounds(
        #[case] temperature: f64,
        #[case] altitude: f64,
        #[case] weight: f64,
        #[case] headwind: f64,
    ) {
        let distance = model().distance(temperature, altitude, weight, headwind);
        assert!((600..=8000).contains(&distance), "distance was {distance}");
    }

    #[test]
    fn test_extremes_saturate() {
        assert_eq!(
            model().distance(1e9, 1e9, 1e9, -5.0),
            model().distance(140.0, 15_000.0, 5600.0, 0.0)
        );
        assert_eq!(model().distance(-60.0, -2000.0, 3000.0, 25.0), 600);
    }

    #[test]
    fn test_altitude_factor_branches() {
        assert_relative_eq!(altitude_factor(0.0), 1.0);
        assert_relative_eq!(altitude_factor(40_000.0), 4.0);
        assert!(altitude_factor(-1000.0) < 1.0);
        assert!(altitude_factor(5000.0) > 1.0);
        assert!(altitude_factor(-1_000_000.0) >= 0.5);
    }
}
