//! Per-runway-end performance rows
//!
//! For every eligible runway end the assembler emits the forward end and
//! then its reciprocal, in the order the reference data lists them. Each
//! result carries calm, steady-wind and gust distances for takeoff, landing
//! and accelerate-stop.

use serde::Serialize;
use tracing::{debug, warn};

use crate::Result;
use crate::atmosphere::standard_temperature_c;
use crate::config::PerformanceConfig;
use crate::metar;
use crate::models::{
    Airport, AircraftWeightState, AirportContext, LoadingInputs, RunwayEnd, WeatherObservation,
};
use crate::performance::{NoWindDistances, PerformanceModel};
use crate::weather::ReportSource;
use crate::weight_balance;
use crate::wind::{Crosswind, RunwayWind, WindComponents, WindResolver};

/// Distances in feet for calm, steady wind and gust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistanceRow {
    pub calm_ft: i32,
    pub steady_ft: i32,
    pub gust_ft: i32,
}

/// Everything shown for one runway end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceResult {
    pub designator: String,
    pub heading_deg: f64,
    pub length_ft: u32,
    /// Whole-knot components of the steady wind
    pub steady_wind: WindComponents,
    /// Whole-knot components of the gust
    pub gust_wind: WindComponents,
    pub takeoff: DistanceRow,
    pub landing: DistanceRow,
    pub accelerate_stop: DistanceRow,
}

impl PerformanceResult {
    #[must_use]
    pub fn crosswind(&self) -> Crosswind {
        self.steady_wind.crosswind()
    }

    /// True when any distance is longer than the runway
    #[must_use]
    pub fn exceeds_length(&self) -> bool {
        let length = i64::from(self.length_ft);
        [self.takeoff, self.landing, self.accelerate_stop]
            .iter()
            .flat_map(|row| [row.calm_ft, row.steady_ft, row.gust_ft])
            .any(|distance| i64::from(distance) > length)
    }
}

/// Wind on the runway the pilot asked about by number
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectedRunway {
    pub number: u8,
    pub steady: WindComponents,
    pub gust: WindComponents,
}

/// Complete output of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub airport_ident: String,
    pub airport_name: String,
    pub strategy: String,
    pub observation: WeatherObservation,
    pub context: AirportContext,
    pub aircraft: AircraftWeightState,
    pub no_wind: NoWindDistances,
    pub selected_runway: Option<SelectedRunway>,
    pub results: Vec<PerformanceResult>,
}

/// Combines the observation, altitudes, weight and runway list into rows.
///
/// Each eligible runway end gives a forward row followed by a reciprocal
/// row. An end whose designator has no runway number, such as a helipad
/// `H1`, has no reciprocal and gives only its forward row.
#[derive(Debug)]
pub struct PerformanceReportAssembler<'a> {
    model: &'a PerformanceModel,
    headwind_factor: f64,
}

impl<'a> PerformanceReportAssembler<'a> {
    /// `headwind_factor` scales whole-knot headwind before the wind
    /// corrections and the accelerate-stop model
    #[must_use]
    pub fn new(model: &'a PerformanceModel, headwind_factor: f64) -> Self {
        Self {
            model,
            headwind_factor,
        }
    }

    #[tracing::instrument(skip_all, fields(airport = %airport.ident))]
    pub fn assemble(
        &self,
        airport: &Airport,
        observation: &WeatherObservation,
        aircraft: &AircraftWeightState,
        selected_runway: Option<u8>,
    ) -> PerformanceReport {
        let context = AirportContext::derive(airport.elevation_ft, observation);
        let no_wind = self
            .model
            .no_wind(aircraft.weight_lb, f64::from(context.density_altitude_ft));
        let resolver = WindResolver::new(observation);

        let selected_runway = selected_runway.map(|number| {
            let wind = resolver.for_runway_number(number);
            SelectedRunway {
                number,
                steady: wind.steady.truncated(),
                gust: wind.gust.truncated(),
            }
        });

        let results = self.results(
            &airport.runways,
            observation,
            &context,
            aircraft,
            no_wind,
        );

        PerformanceReport {
            airport_ident: airport.ident.clone(),
            airport_name: airport.name.clone(),
            strategy: self.model.strategy_name().to_string(),
            observation: observation.clone(),
            context,
            aircraft: *aircraft,
            no_wind,
            selected_runway,
            results,
        }
    }

    /// Forward and reciprocal rows for each eligible end; forward only when
    /// the designator has no runway number
    pub fn results(
        &self,
        runways: &[RunwayEnd],
        observation: &WeatherObservation,
        context: &AirportContext,
        aircraft: &AircraftWeightState,
        no_wind: NoWindDistances,
    ) -> Vec<PerformanceResult> {
        let resolver = WindResolver::new(observation);
        let temperature_f = observation
            .temperature_f()
            .unwrap_or_else(|| standard_temperature_c(context.elevation_ft) * 9.0 / 5.0 + 32.0);
        let conditions = Conditions {
            temperature_f,
            pressure_altitude_ft: f64::from(context.pressure_altitude_ft),
            weight_lb: aircraft.weight_lb,
            no_wind,
        };

        let mut results = Vec::with_capacity(runways.len() * 2);
        for end in runways {
            if !end.is_eligible() {
                debug!("Skipping runway {} (closed or water)", end.designator);
                continue;
            }

            results.push(self.result_for(end, &resolver.for_runway_end(end), &conditions));

            match end.reciprocal() {
                Some(reciprocal) => {
                    let wind = resolver.for_runway_end(&reciprocal);
                    results.push(self.result_for(&reciprocal, &wind, &conditions));
                }
                None => warn!("Runway {} has no reciprocal designator", end.designator),
            }
        }
        results
    }

    fn result_for(
        &self,
        end: &RunwayEnd,
        wind: &RunwayWind,
        conditions: &Conditions,
    ) -> PerformanceResult {
        let steady = wind.steady.effective_headwind(self.headwind_factor);
        let gust = wind.gust.effective_headwind(self.headwind_factor);
        let no_wind = conditions.no_wind;

        let takeoff = DistanceRow {
            calm_ft: no_wind.takeoff_ft,
            steady_ft: self.model.takeoff_with_headwind(steady, no_wind.takeoff_ft),
            gust_ft: self.model.takeoff_with_headwind(gust, no_wind.takeoff_ft),
        };
        let landing = DistanceRow {
            calm_ft: no_wind.landing_ft,
            steady_ft: self.model.landing_with_headwind(steady, no_wind.landing_ft),
            gust_ft: self.model.landing_with_headwind(gust, no_wind.landing_ft),
        };
        let accelerate_stop = DistanceRow {
            calm_ft: conditions.accelerate_stop(self.model, 0.0),
            steady_ft: conditions.accelerate_stop(self.model, steady),
            gust_ft: conditions.accelerate_stop(self.model, gust),
        };

        PerformanceResult {
            designator: end.designator.clone(),
            heading_deg: end.heading_deg,
            length_ft: end.length_ft,
            steady_wind: wind.steady.truncated(),
            gust_wind: wind.gust.truncated(),
            takeoff,
            landing,
            accelerate_stop,
        }
    }
}

/// Report plus the METAR it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub metar: String,
    #[serde(flatten)]
    pub report: PerformanceReport,
}

/// Fetch the current METAR for `station` and assemble the report for
/// `airport`. A failed fetch ends the run with no partial output.
pub fn estimate(
    source: &dyn ReportSource,
    station: &str,
    airport: &Airport,
    loading: &LoadingInputs,
    performance: &PerformanceConfig,
    selected_runway: Option<u8>,
) -> Result<Estimate> {
    let model = PerformanceModel::from_config(performance)?;
    let raw = source.fetch_report(station)?;
    let observation = metar::parse(&raw);
    let aircraft = weight_balance::compute(loading);

    let report = PerformanceReportAssembler::new(&model, performance.headwind_factor).assemble(
        airport,
        &observation,
        &aircraft,
        selected_runway,
    );

    Ok(Estimate { metar: raw, report })
}

/// Inputs shared by every runway end of one run
struct Conditions {
    temperature_f: f64,
    pressure_altitude_ft: f64,
    weight_lb: f64,
    no_wind: NoWindDistances,
}

impl Conditions {
    fn accelerate_stop(&self, model: &PerformanceModel, headwind: f64) -> i32 {
        model.accelerate_stop(
            self.temperature_f,
            self.pressure_altitude_ft,
            self.weight_lb,
            headwind,
        )
    }
}
