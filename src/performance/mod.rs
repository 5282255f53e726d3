//! Distance models for takeoff, landing and accelerate-stop
//!
//! Takeoff and landing distances come from an interchangeable
//! [`DistanceStrategy`]: closed-form polynomials or chart interpolation.
//! Accelerate-stop always uses the multiplicative model in
//! [`accelerate_stop`]. Every input passes through the model's
//! [`InputDomain`] before evaluation.

pub mod accelerate_stop;
pub mod domain;
pub mod regression;
pub mod table;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PerformanceConfig;
use crate::error::PreflightError;

pub use accelerate_stop::AccelerateStopModel;
pub use domain::{AccelerateStopDomain, InputDomain, Range};
pub use regression::{BivariateCubic, RegressionStrategy};
pub use table::{BilinearTable, TableDataset, TableStrategy};

/// Source of no-wind and wind-adjusted distances in feet.
///
/// Implementations receive inputs already normalised by the
/// [`PerformanceModel`].
pub trait DistanceStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Takeoff over a 50 ft obstacle in calm wind
    fn takeoff_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> f64;

    /// Landing over a 50 ft obstacle in calm wind
    fn landing_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> f64;

    /// Takeoff distance corrected for a headwind (negative for tailwind)
    fn takeoff_with_headwind(&self, headwind_kt: f64, no_wind_ft: f64) -> f64;

    /// Landing distance corrected for a headwind (negative for tailwind)
    fn landing_with_headwind(&self, headwind_kt: f64, no_wind_ft: f64) -> f64;
}

/// Configured choice of [`DistanceStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Regression,
    Table,
}

impl StrategyKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Regression => "regression",
            StrategyKind::Table => "table",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calm-wind reference distances for one weight and density altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoWindDistances {
    pub takeoff_ft: i32,
    pub landing_ft: i32,
}

/// Strategy plus input normalisation.
///
/// Distances are whole feet truncated toward zero; accelerate-stop is
/// rounded to the nearest foot.
#[derive(Debug)]
pub struct PerformanceModel {
    strategy: Box<dyn DistanceStrategy>,
    domain: InputDomain,
    accelerate_stop: AccelerateStopModel,
}

impl PerformanceModel {
    #[must_use]
    pub fn new(strategy: Box<dyn DistanceStrategy>) -> Self {
        Self {
            strategy,
            domain: InputDomain::default(),
            accelerate_stop: AccelerateStopModel::default(),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: InputDomain) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_accelerate_stop(mut self, accelerate_stop: AccelerateStopModel) -> Self {
        self.accelerate_stop = accelerate_stop;
        self
    }

    /// Build the configured strategy. Chart tables are validated here.
    pub fn from_config(config: &PerformanceConfig) -> Result<Self, PreflightError> {
        let strategy: Box<dyn DistanceStrategy> = match config.strategy {
            StrategyKind::Regression => Box::new(RegressionStrategy::default()),
            StrategyKind::Table => Box::new(TableStrategy::for_dataset(config.table_dataset)?),
        };

        info!(
            "Using {} performance strategy{}",
            strategy.name(),
            match config.strategy {
                StrategyKind::Table => format!(" ({} takeoff data)", config.table_dataset.as_str()),
                StrategyKind::Regression => String::new(),
            }
        );

        Ok(Self::new(strategy))
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    #[must_use]
    pub fn domain(&self) -> &InputDomain {
        &self.domain
    }

    /// No-wind takeoff, bounded to the range the wind adjustment accepts
    #[must_use]
    pub fn takeoff_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> i32 {
        let (weight, altitude) = self.domain.normalize_no_wind(weight_lb, density_altitude_ft);
        let distance = self.strategy.takeoff_no_wind(weight, altitude);
        whole_feet(self.domain.bound_no_wind("no-wind takeoff", distance))
    }

    /// No-wind landing, bounded to the range the wind adjustment accepts
    #[must_use]
    pub fn landing_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> i32 {
        let (weight, altitude) = self.domain.normalize_no_wind(weight_lb, density_altitude_ft);
        let distance = self.strategy.landing_no_wind(weight, altitude);
        whole_feet(self.domain.bound_no_wind("no-wind landing", distance))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> NoWindDistances {
        let distances = NoWindDistances {
            takeoff_ft: self.takeoff_no_wind(weight_lb, density_altitude_ft),
            landing_ft: self.landing_no_wind(weight_lb, density_altitude_ft),
        };
        debug!(
            "No-wind takeoff {} ft, landing {} ft",
            distances.takeoff_ft, distances.landing_ft
        );
        distances
    }

    #[must_use]
    pub fn takeoff_with_headwind(&self, headwind_kt: f64, no_wind_ft: i32) -> i32 {
        self.wind_adjusted(headwind_kt, no_wind_ft, |headwind, distance| {
            self.strategy.takeoff_with_headwind(headwind, distance)
        })
    }

    #[must_use]
    pub fn landing_with_headwind(&self, headwind_kt: f64, no_wind_ft: i32) -> i32 {
        self.wind_adjusted(headwind_kt, no_wind_ft, |headwind, distance| {
            self.strategy.landing_with_headwind(headwind, distance)
        })
    }

    /// The wind chart is read as a correction against its own calm value,
    /// so a calm wind gives back exactly the no-wind distance.
    fn wind_adjusted(
        &self,
        headwind_kt: f64,
        no_wind_ft: i32,
        chart: impl Fn(f64, f64) -> f64,
    ) -> i32 {
        let (headwind, distance) = self.domain.normalize_wind(headwind_kt, f64::from(no_wind_ft));
        let correction = chart(headwind, distance) - chart(0.0, distance);
        whole_feet(distance + correction)
    }

    #[must_use]
    pub fn accelerate_stop(
        &self,
        temperature_f: f64,
        pressure_altitude_ft: f64,
        weight_lb: f64,
        headwind_mph: f64,
    ) -> i32 {
        self.accelerate_stop
            .distance(temperature_f, pressure_altitude_ft, weight_lb, headwind_mph)
    }
}

impl Default for PerformanceModel {
    fn default() -> Self {
        Self::new(Box::new(RegressionStrategy::default()))
    }
}

fn whole_feet(distance: f64) -> i32 {
    distance.trunc() as i32
}
