//! Pressure and density altitude
//!
//! Rule-of-thumb formulas: 1000 ft per inch of mercury, a 2 °C per 1000 ft
//! standard lapse rate, and 120 ft of density altitude per degree Celsius of
//! deviation from standard. Results are truncated toward zero and never
//! clamped; below-sea-level and very high fields pass straight through.

use tracing::warn;

use crate::models::{AirportContext, WeatherObservation};

/// Standard altimeter setting in inches of mercury
pub const STANDARD_ALTIMETER_INHG: f64 = 29.92;

/// Standard sea-level temperature in Celsius
pub const STANDARD_TEMPERATURE_C: f64 = 15.0;

const FEET_PER_INHG: f64 = 1000.0;
const LAPSE_RATE_C_PER_1000_FT: f64 = 2.0;
const DENSITY_FEET_PER_DEGREE_C: f64 = 120.0;

/// Pressure altitude in feet
#[must_use]
pub fn pressure_altitude(elevation_ft: f64, altimeter_inhg: f64) -> i32 {
    truncate_feet(elevation_ft + FEET_PER_INHG * (STANDARD_ALTIMETER_INHG - altimeter_inhg))
}

/// ISA temperature expected at `elevation_ft`
#[must_use]
pub fn standard_temperature_c(elevation_ft: f64) -> f64 {
    STANDARD_TEMPERATURE_C - elevation_ft / 1000.0 * LAPSE_RATE_C_PER_1000_FT
}

/// Density altitude in feet
#[must_use]
pub fn density_altitude(elevation_ft: f64, altimeter_inhg: f64, temperature_c: f64) -> i32 {
    let pressure_altitude = f64::from(pressure_altitude(elevation_ft, altimeter_inhg));
    let deviation = temperature_c - standard_temperature_c(elevation_ft);
    truncate_feet(pressure_altitude + deviation * DENSITY_FEET_PER_DEGREE_C)
}

fn truncate_feet(feet: f64) -> i32 {
    // `as` truncates toward zero and saturates at the i32 bounds
    feet.trunc() as i32
}

impl AirportContext {
    /// Derive pressure and density altitude for a field.
    ///
    /// A report without an altimeter group is treated as standard pressure,
    /// and one without a temperature group as standard temperature, so the
    /// run continues on degraded inputs.
    #[must_use]
    pub fn derive(elevation_ft: f64, observation: &WeatherObservation) -> Self {
        let altimeter = observation.altimeter_inhg.unwrap_or_else(|| {
            warn!(
                "No altimeter setting in report, assuming {} inHg",
                STANDARD_ALTIMETER_INHG
            );
            STANDARD_ALTIMETER_INHG
        });

        let temperature = observation.temperature_c.map_or_else(
            || {
                let standard = standard_temperature_c(elevation_ft);
                warn!(
                    "No temperature in report, assuming standard {:.1} °C",
                    standard
                );
                standard
            },
            f64::from,
        );

        Self {
            elevation_ft,
            pressure_altitude_ft: pressure_altitude(elevation_ft, altimeter),
            density_altitude_ft: density_altitude(elevation_ft, altimeter, temperature),
        }
    }
}
