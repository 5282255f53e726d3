//! Aircraft loading and weight-and-balance state

use serde::{Deserialize, Serialize};

/// Loading inputs for one flight
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LoadingInputs {
    /// Front seat occupants in pounds
    #[serde(default = "default_front")]
    pub front_lb: f64,
    /// Middle seat occupants in pounds
    #[serde(default)]
    pub middle_lb: f64,
    /// Rear seat occupants in pounds
    #[serde(default)]
    pub rear_lb: f64,
    /// Main tank fuel in US gallons
    #[serde(default = "default_main_fuel")]
    pub main_fuel_gal: f64,
    /// Auxiliary (tip) tank fuel in US gallons
    #[serde(default = "default_aux_fuel")]
    pub aux_fuel_gal: f64,
    /// Forward baggage in pounds
    #[serde(default = "default_baggage")]
    pub forward_baggage_lb: f64,
    /// Rear baggage in pounds
    #[serde(default = "default_baggage")]
    pub rear_baggage_lb: f64,
}

fn default_front() -> f64 {
    200.0
}

fn default_main_fuel() -> f64 {
    140.0
}

fn default_aux_fuel() -> f64 {
    36.0
}

fn default_baggage() -> f64 {
    10.0
}

impl Default for LoadingInputs {
    fn default() -> Self {
        Self {
            front_lb: default_front(),
            middle_lb: 0.0,
            rear_lb: 0.0,
            main_fuel_gal: default_main_fuel(),
            aux_fuel_gal: default_aux_fuel(),
            forward_baggage_lb: default_baggage(),
            rear_baggage_lb: default_baggage(),
        }
    }
}

/// Gross weight, moment and center of gravity, computed once per run
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct AircraftWeightState {
    /// Gross weight in pounds
    pub weight_lb: f64,
    /// Longitudinal moment in pound-inches
    pub moment_lb_in: f64,
    /// Center of gravity in inches aft of datum
    pub cg_in: f64,
}

impl AircraftWeightState {
    /// Build from weight and moment; the CG follows
    #[must_use]
    pub fn from_weight_and_moment(weight_lb: f64, moment_lb_in: f64) -> Self {
        let cg_in = if weight_lb > 0.0 {
            moment_lb_in / weight_lb
        } else {
            0.0
        };
        Self {
            weight_lb,
            moment_lb_in,
            cg_in,
        }
    }
}
