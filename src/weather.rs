//! METAR retrieval
//!
//! One blocking request per run. A failed or empty fetch is terminal for
//! the run; nothing here retries.

use std::time::Duration;

use tracing::{debug, info};

use crate::Result;
use crate::config::WeatherConfig;
use crate::error::PreflightError;

/// Anything that can produce the latest raw METAR for a station
pub trait ReportSource {
    fn fetch_report(&self, station: &str) -> Result<String>;
}

/// Client for the aviation weather data API
#[derive(Debug, Clone)]
pub struct MetarClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl MetarClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("preflight/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Most recent report only, newest first
    #[must_use]
    pub fn report_url(&self, station: &str) -> String {
        format!(
            "{}/metar?ids={}&hours=0&order=id%2C-obs&sep=true",
            self.base_url,
            urlencoding::encode(station)
        )
    }
}

impl ReportSource for MetarClient {
    #[tracing::instrument(skip(self))]
    fn fetch_report(&self, station: &str) -> Result<String> {
        let url = self.report_url(station);
        debug!("Requesting {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PreflightError::weather_unavailable(format!(
                "METAR request for {station} returned {status}"
            )));
        }

        let body = response.text()?;
        let report = first_report(&body).ok_or_else(|| {
            PreflightError::weather_unavailable(format!("No METAR available for {station}"))
        })?;

        info!("METAR: {}", report);
        Ok(report)
    }
}

/// First non-blank line of a response body
fn first_report(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
