//! Configuration management for preflight
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::error::PreflightError;
use crate::performance::{StrategyKind, TableDataset};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreflightConfig {
    /// METAR service configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Airport and runway reference data
    #[serde(default)]
    pub reference: ReferenceConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Performance model selection
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// METAR service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the aviation weather data API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Locations of the OurAirports CSV extracts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_airports_path")]
    pub airports_path: PathBuf,
    #[serde(default = "default_runways_path")]
    pub runways_path: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Performance model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// `regression` or `table`
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Takeoff chart used by the table strategy
    #[serde(default)]
    pub table_dataset: TableDataset,
    /// Multiplier applied to whole-knot headwind before the wind correction
    #[serde(default = "default_headwind_factor")]
    pub headwind_factor: f64,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://aviationweather.gov/api/data".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_airports_path() -> PathBuf {
    PathBuf::from("airports.csv")
}

fn default_runways_path() -> PathBuf {
    PathBuf::from("runways.csv")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_headwind_factor() -> f64 {
    1.15
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            airports_path: default_airports_path(),
            runways_path: default_runways_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            table_dataset: TableDataset::default(),
            headwind_factor: default_headwind_factor(),
        }
    }
}

impl PreflightConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // PREFLIGHT_PERFORMANCE__STRATEGY=table
        builder = builder.add_source(
            Environment::with_prefix("PREFLIGHT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PreflightConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("preflight").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.reference.airports_path.as_os_str().is_empty() {
            self.reference.airports_path = default_airports_path();
        }
        if self.reference.runways_path.as_os_str().is_empty() {
            self.reference.runways_path = default_runways_path();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(PreflightError::config("Weather timeout cannot exceed 300 seconds").into());
        }

        let factor = self.performance.headwind_factor;
        if !(factor > 0.0 && factor <= 3.0) {
            return Err(PreflightError::config(format!(
                "Headwind factor {factor} must be greater than 0 and at most 3"
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PreflightError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PreflightError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(
                PreflightError::config("Weather base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
