//! Error types and handling for the preflight performance tool

use thiserror::Error;

/// Main error type for the preflight tool
#[derive(Error, Debug)]
pub enum PreflightError {
    /// Configuration-related errors, including invalid reference tables
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The weather report could not be retrieved
    #[error("Weather unavailable: {message}")]
    WeatherUnavailable { message: String },

    /// No airport record matched the requested identifier
    #[error("Airport not found: {ident}")]
    AirportNotFound { ident: String },

    /// Reference data (airports/runways) could not be read or is incomplete
    #[error("Reference data error: {message}")]
    Reference { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PreflightError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new weather-unavailable error
    pub fn weather_unavailable<S: Into<String>>(message: S) -> Self {
        Self::WeatherUnavailable {
            message: message.into(),
        }
    }

    /// Create a new airport-not-found error
    pub fn airport_not_found<S: Into<String>>(ident: S) -> Self {
        Self::AirportNotFound {
            ident: ident.into(),
        }
    }

    /// Create a new reference data error
    pub fn reference<S: Into<String>>(message: S) -> Self {
        Self::Reference {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PreflightError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            PreflightError::WeatherUnavailable { .. } => {
                "Failed to fetch METAR. Please check the station identifier and your internet connection."
                    .to_string()
            }
            PreflightError::AirportNotFound { ident } => {
                format!("No airport record for '{ident}' in the reference data.")
            }
            PreflightError::Reference { message } => {
                format!("Reference data problem: {message}")
            }
            PreflightError::Io { .. } => {
                "File operation failed. Please check file paths and permissions.".to_string()
            }
        }
    }
}

impl From<csv::Error> for PreflightError {
    fn from(err: csv::Error) -> Self {
        PreflightError::reference(err.to_string())
    }
}

impl From<reqwest::Error> for PreflightError {
    fn from(err: reqwest::Error) -> Self {
        PreflightError::weather_unavailable(err.to_string())
    }
}
