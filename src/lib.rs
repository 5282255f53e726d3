//! `preflight` - takeoff, landing and accelerate-stop estimates for a
//! PA-23-250 from the current METAR
//!
//! The library decodes the weather report, derives pressure and density
//! altitude, evaluates the distance models and resolves the wind against
//! every runway end of the airport.

pub mod atmosphere;
pub mod config;
pub mod error;
pub mod logging;
pub mod metar;
pub mod models;
pub mod performance;
pub mod reference;
pub mod report;
pub mod weather;
pub mod weight_balance;
pub mod wind;

// Re-export core types for public API
pub use config::PreflightConfig;
pub use error::PreflightError;
pub use models::{
    AircraftWeightState, Airport, AirportContext, LoadingInputs, RunwayEnd, WeatherObservation,
};
pub use performance::{DistanceStrategy, PerformanceModel, StrategyKind, TableDataset};
pub use reference::AirportDirectory;
pub use report::{Estimate, PerformanceReport, PerformanceReportAssembler, PerformanceResult};
pub use weather::{MetarClient, ReportSource};
pub use wind::{WindComponents, WindResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PreflightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
