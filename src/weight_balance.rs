//! Weight and balance for the PA-23-250
//!
//! Station arms are inches aft of the datum; fuel is avgas at 6 lb/gal.

use tracing::debug;

use crate::models::{AircraftWeightState, LoadingInputs};

const EMPTY_WEIGHT_LB: f64 = 3193.95;
const EMPTY_MOMENT_LB_IN: f64 = 290_084.0;
const FUEL_LB_PER_GAL: f64 = 6.0;

const FRONT_ARM_IN: f64 = 89.0;
const MIDDLE_ARM_IN: f64 = 126.0;
const REAR_ARM_IN: f64 = 157.0;
const MAIN_FUEL_ARM_IN: f64 = 113.0;
const AUX_FUEL_ARM_IN: f64 = 116.0;
const FORWARD_BAGGAGE_ARM_IN: f64 = 10.0;
const REAR_BAGGAGE_ARM_IN: f64 = 183.0;

/// Compute gross weight, moment and CG from the loading inputs
#[must_use]
pub fn compute(loading: &LoadingInputs) -> AircraftWeightState {
    let main_fuel_lb = loading.main_fuel_gal * FUEL_LB_PER_GAL;
    let aux_fuel_lb = loading.aux_fuel_gal * FUEL_LB_PER_GAL;

    let stations = [
        (loading.front_lb, FRONT_ARM_IN),
        (loading.middle_lb, MIDDLE_ARM_IN),
        (loading.rear_lb, REAR_ARM_IN),
        (main_fuel_lb, MAIN_FUEL_ARM_IN),
        (aux_fuel_lb, AUX_FUEL_ARM_IN),
        (loading.forward_baggage_lb, FORWARD_BAGGAGE_ARM_IN),
        (loading.rear_baggage_lb, REAR_BAGGAGE_ARM_IN),
    ];

    let (weight, moment) = stations.iter().fold(
        (EMPTY_WEIGHT_LB, EMPTY_MOMENT_LB_IN),
        |(weight, moment), &(load, arm)| (weight + load, moment + load * arm),
    );

    let state = AircraftWeightState::from_weight_and_moment(weight, moment);
    debug!(
        "Weight and balance: {:.1} lb, moment {:.0} lb-in, CG {:.2} in",
        state.weight_lb, state.moment_lb_in, state.cg_in
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_aircraft() {
        let loading = LoadingInputs {
            front_lb: 0.0,
            middle_lb: 0.0,
            rear_lb: 0.0,
            main_fuel_gal: 0.0,
            aux_fuel_gal: 0.0,
            forward_baggage_lb: 0.0,
            rear_baggage_lb: 0.0,
        };
        let state = compute(&loading);
        assert_relative_eq!(state.weight_lb, 3193.95);
        assert_relative_eq!(state.moment_lb_in, 290_084.0);
        assert_relative_eq!(state.cg_in, 290_084.0 / 3193.95);
    }

    #[test]
    fn test_default_loading() {
        let state = compute(&LoadingInputs::default());
        // 3193.95 + 200 + 140*6 + 36*6 + 10 + 10
        assert_relative_eq!(state.weight_lb, 4469.95, epsilon = 1e-9);
        // 290084 + 89*200 + 113*840 + 116*216 + 10*10 + 183*10
        assert_relative_eq!(state.moment_lb_in, 429_790.0, epsilon = 1e-6);
        assert_relative_eq!(state.cg_in, 429_790.0 / 4469.95, epsilon = 1e-9);
    }

    #[test]
    fn test_rear_load_moves_cg_aft() {
        let base = compute(&LoadingInputs::default());
        let loaded = compute(&LoadingInputs {
            rear_lb: 170.0,
            ..LoadingInputs::default()
        });
        assert!(loaded.cg_in > base.cg_in);
        assert_relative_eq!(loaded.weight_lb - base.weight_lb, 170.0, epsilon = 1e-9);
    }
}
