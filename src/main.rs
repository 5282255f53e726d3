//! preflight CLI
//!
//! Looks up the airport, fetches its METAR and prints weather, loading and
//! per-runway performance tables, or the whole report as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::debug;

use preflight::models::LoadingInputs;
use preflight::report::{Estimate, PerformanceResult};
use preflight::{
    AirportDirectory, MetarClient, PreflightConfig, PreflightError, StrategyKind, TableDataset,
    logging, report,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Fitted polynomials
    Regression,
    /// Chart interpolation
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DatasetArg {
    /// No-wind rows of the headwind chart, the same at every weight
    ChartLadder,
    /// Takeoff polynomial sampled on the landing chart grid
    RegressionSampled,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Regression => StrategyKind::Regression,
            StrategyArg::Table => StrategyKind::Table,
        }
    }
}

impl From<DatasetArg> for TableDataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::ChartLadder => TableDataset::ChartLadder,
            DatasetArg::RegressionSampled => TableDataset::RegressionSampled,
        }
    }
}

#[derive(Parser)]
#[command(name = "preflight", version)]
#[command(about = "Takeoff, landing and accelerate-stop distances from the current METAR", long_about = None)]
struct Args {
    /// ICAO airport identifier
    ident: String,

    /// Runway in use, by number (e.g. 14 for runway 14)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=36))]
    runway: Option<u8>,

    /// Front seat occupants in lbs
    #[arg(short = 'f', default_value_t = 200.0)]
    front: f64,

    /// Middle seat occupants in lbs
    #[arg(short = 'm', default_value_t = 0.0)]
    middle: f64,

    /// Rear seat occupants in lbs
    #[arg(short = 'r', default_value_t = 0.0)]
    rear: f64,

    /// Main fuel in US gallons
    #[arg(short = 'g', default_value_t = 140.0)]
    main_fuel: f64,

    /// Auxiliary fuel in US gallons
    #[arg(short = 'G', default_value_t = 36.0)]
    aux_fuel: f64,

    /// Rear baggage in lbs
    #[arg(short = 'b', default_value_t = 10.0)]
    rear_baggage: f64,

    /// Forward baggage in lbs
    #[arg(short = 'B', default_value_t = 10.0)]
    forward_baggage: f64,

    /// Distance model, overriding the configuration
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Takeoff chart for the table model, overriding the configuration
    #[arg(long, value_enum)]
    table_dataset: Option<DatasetArg>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn loading(&self) -> LoadingInputs {
        LoadingInputs {
            front_lb: self.front,
            middle_lb: self.middle,
            rear_lb: self.rear,
            main_fuel_gal: self.main_fuel,
            aux_fuel_gal: self.aux_fuel,
            forward_baggage_lb: self.forward_baggage,
            rear_baggage_lb: self.rear_baggage,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PreflightError>() {
                Some(preflight_error) => eprintln!("{}", preflight_error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = PreflightConfig::load_from_path(args.config.clone())?;
    logging::init_logging(&config.logging, args.verbose)?;

    if let Some(strategy) = args.strategy {
        config.performance.strategy = strategy.into();
    }
    if let Some(dataset) = args.table_dataset {
        config.performance.table_dataset = dataset.into();
    }
    debug!("Configuration: {:?}", config);

    let station = args.ident.trim().to_uppercase();
    let airport = AirportDirectory::from_config(&config.reference).lookup(&station)?;
    let client = MetarClient::new(&config.weather)?;

    let estimate = report::estimate(
        &client,
        &station,
        &airport,
        &args.loading(),
        &config.performance,
        args.runway,
    )?;

    if args.json {
        let json = serde_json::to_string_pretty(&estimate).context("Failed to encode report")?;
        println!("{json}");
    } else {
        print_estimate(&station, &estimate);
    }
    Ok(())
}

fn print_estimate(station: &str, estimate: &Estimate) {
    let report = &estimate.report;
    let observation = &report.observation;

    println!("METAR: {}", estimate.metar);
    if let Some(observed) = observation.time.and_then(|time| time.resolve(Utc::now())) {
        let age = Utc::now().signed_duration_since(observed);
        println!("Observed {} ({} min ago)", observed.format("%Y-%m-%d %H:%MZ"), age.num_minutes());
    }

    println!();
    println!("{:20} {:10} Value", "Weather", "Unit");
    println!("{} {} {}", "-".repeat(20), "-".repeat(10), "-".repeat(8));
    println!("{:20} {:10} {}", format!("{station} elevation"), "ft", report.context.elevation_ft);
    println!("{:20} {:10} {}", "Wind", "", observation.format_wind());
    println!("{:20} {:10} {}", "Wind direction", "deg", observation.wind_direction_deg);
    println!("{:20} {:10} {}", "Wind speed", "kt", observation.wind_speed_kt);
    println!("{:20} {:10} {}", "Wind gust", "kt", observation.wind_gust_kt);
    println!("{:20} {:10} {}", "Temperature", "°C", optional(observation.temperature_c));
    println!("{:20} {:10} {}", "Dew point", "°C", optional(observation.dewpoint_c));
    println!(
        "{:20} {:10} {}",
        "Altimeter",
        "inHg",
        observation
            .altimeter_inhg
            .map_or_else(|| "-".to_string(), |inhg| format!("{inhg:.2}"))
    );
    println!("{:20} {:10} {}", "Pressure altitude", "ft", report.context.pressure_altitude_ft);
    println!("{:20} {:10} {}", "Density altitude", "ft", report.context.density_altitude_ft);

    if let Some(selected) = &report.selected_runway {
        println!("{:20} {:10} {}", format!("Headwind rwy {:02}", selected.number), "kt", selected.steady.headwind_kt);
        let crosswind = selected.steady.crosswind();
        println!("{:20} {:10} {}", "Crosswind", "kt", crosswind);
    }

    println!();
    println!("{:20} {:10} Value", "Airplane", "Unit");
    println!("{} {} {}", "-".repeat(20), "-".repeat(10), "-".repeat(8));
    println!("{:20} {:10} {:>8}", "Weight", "lbs", thousands(report.aircraft.weight_lb.round() as i64));
    println!("{:20} {:10} {:>8}", "Moment", "in*lbs", thousands(report.aircraft.moment_lb_in.round() as i64));
    println!("{:20} {:10} {:>8.1}", "Center of gravity", "in", report.aircraft.cg_in);

    println!();
    println!("Performance ({}): {:>6} {:>6} {:>6}", report.strategy, "Calm", "Wind", "Gusts");
    println!("{}", "─".repeat(36));
    for result in &report.results {
        print_result(result);
    }
}

fn print_result(result: &PerformanceResult) {
    println!("RW  HW  CW  Length");
    println!(
        "{:3} {:>3} {:>3} {:>6}{}",
        result.designator,
        result.steady_wind.headwind_kt,
        result.crosswind().to_string(),
        result.length_ft,
        if result.exceeds_length() { " !" } else { "" }
    );
    for (label, row) in [
        ("Takeoff", &result.takeoff),
        ("Landing", &result.landing),
        ("Accelerate-stop", &result.accelerate_stop),
    ] {
        println!(
            "{:15} {:>6} {:>6} {:>6}",
            label,
            thousands(i64::from(row.calm_ft)),
            thousands(i64::from(row.steady_ft)),
            thousands(i64::from(row.gust_ft))
        );
    }
    println!("{}", "─".repeat(36));
}

fn optional(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// `12345` as `12,345`
fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
