//! Data models for the preflight tool
//!
//! This module contains the domain models organized by concern:
//! - Weather: the decoded METAR observation
//! - Airport: field elevation, runway ends and derived altitudes
//! - Aircraft: loading inputs and weight-and-balance state

pub mod aircraft;
pub mod airport;
pub mod weather;

// Re-export all public types for convenient access
pub use aircraft::{AircraftWeightState, LoadingInputs};
pub use airport::{Airport, AirportContext, RunwayEnd};
pub use weather::{ObservationTime, VariableWind, WeatherObservation, celsius_to_fahrenheit};
