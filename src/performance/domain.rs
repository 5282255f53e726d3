//! Input normalisation for the performance models
//!
//! Each model declares the operating range of every input once, here.
//! Inputs outside a range are saturated to its nearest bound; nothing is
//! ever rejected.

use tracing::debug;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Saturate `value` into the range, logging when it had to move.
    /// NaN saturates to the lower bound.
    #[must_use]
    pub fn saturate(&self, name: &str, value: f64) -> f64 {
        if self.contains(value) {
            return value;
        }
        let clamped = if value > self.max { self.max } else { self.min };
        debug!(
            "{} {} outside [{}, {}], using {}",
            name, value, self.min, self.max, clamped
        );
        clamped
    }
}

/// Operating ranges for the no-wind and wind-adjusted distance models
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputDomain {
    /// Gross weight in pounds
    pub weight_lb: Range,
    /// Density altitude in feet
    pub density_altitude_ft: Range,
    /// Headwind in knots; negative is tailwind
    pub headwind_kt: Range,
    /// No-wind reference distance in feet
    pub no_wind_distance_ft: Range,
}

impl InputDomain {
    pub const DISTANCE: Self = Self {
        weight_lb: Range::new(3000.0, 5600.0),
        density_altitude_ft: Range::new(-2000.0, 15_000.0),
        headwind_kt: Range::new(-10.0, 30.0),
        no_wind_distance_ft: Range::new(0.0, 8000.0),
    };

    /// Weight and density altitude for a no-wind lookup
    #[must_use]
    pub fn normalize_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> (f64, f64) {
        (
            self.weight_lb.saturate("weight", weight_lb),
            self.density_altitude_ft
                .saturate("density altitude", density_altitude_ft),
        )
    }

    /// A no-wind distance as reported and as fed to the wind adjustment.
    /// Both go through this bound so they always agree.
    #[must_use]
    pub fn bound_no_wind(&self, name: &str, no_wind_ft: f64) -> f64 {
        self.no_wind_distance_ft.saturate(name, no_wind_ft)
    }

    /// Headwind and no-wind distance for a wind adjustment
    #[must_use]
    pub fn normalize_wind(&self, headwind_kt: f64, no_wind_ft: f64) -> (f64, f64) {
        (
            self.headwind_kt.saturate("headwind", headwind_kt),
            self.bound_no_wind("no-wind distance", no_wind_ft),
        )
    }
}

impl Default for InputDomain {
    fn default() -> Self {
        Self::DISTANCE
    }
}

/// Operating ranges for the accelerate-stop model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerateStopDomain {
    pub temperature_f: Range,
    pub pressure_altitude_ft: Range,
    pub weight_lb: Range,
    pub headwind_mph: Range,
}

impl AccelerateStopDomain {
    pub const OPERATING: Self = Self {
        temperature_f: Range::new(-60.0, 140.0),
        pressure_altitude_ft: Range::new(-2000.0, 15_000.0),
        weight_lb: Range::new(3000.0, 5600.0),
        headwind_mph: Range::new(0.0, 25.0),
    };
}

impl Default for AccelerateStopDomain {
    fn default() -> Self {
        Self::OPERATING
    }
}
