//! Weather observation model decoded from a METAR line

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Observation time as reported in the METAR (`DDHHMMZ`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ObservationTime {
    /// Day of month
    pub day: u32,
    /// Hour (UTC)
    pub hour: u32,
    /// Minute
    pub minute: u32,
}

impl ObservationTime {
    /// Place the observation on the calendar relative to `reference`.
    ///
    /// A METAR only carries the day of month, so the month and year are taken
    /// from `reference`. A day later than the reference day belongs to the
    /// previous month (a report fetched just after midnight on the 1st).
    #[must_use]
    pub fn resolve(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let month_start = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?;
        let month_start = if self.day > reference.day() {
            month_start.checked_sub_months(Months::new(1))?
        } else {
            month_start
        };

        month_start
            .with_day(self.day)?
            .and_hms_opt(self.hour, self.minute, 0)
            .map(|dt| dt.and_utc())
    }
}

/// Variable wind direction range (`180V240`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct VariableWind {
    pub from_deg: u16,
    pub to_deg: u16,
}

/// Structured weather observation.
///
/// Fields the parser could not find keep their defaults: wind direction and
/// speeds are zero, everything optional is `None`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeatherObservation {
    /// Station identifier (first token of the report)
    pub station: Option<String>,
    /// Observation time
    pub time: Option<ObservationTime>,
    /// Wind direction in degrees true, 0 for calm or variable
    pub wind_direction_deg: u16,
    /// Steady wind speed in knots
    pub wind_speed_kt: u16,
    /// Gust speed in knots, equal to the steady speed without a gust group
    pub wind_gust_kt: u16,
    /// Variable wind direction range
    pub variable_wind: Option<VariableWind>,
    /// Temperature in Celsius
    pub temperature_c: Option<i32>,
    /// Dew point in Celsius
    pub dewpoint_c: Option<i32>,
    /// Altimeter setting in inches of mercury
    pub altimeter_inhg: Option<f64>,
    /// Remarks section after `RMK`
    pub remarks: Option<String>,
}

impl WeatherObservation {
    /// True when no usable wind direction was reported
    #[must_use]
    pub fn is_calm(&self) -> bool {
        self.wind_direction_deg == 0 || self.wind_speed_kt == 0
    }

    /// Temperature in Fahrenheit, if reported
    #[must_use]
    pub fn temperature_f(&self) -> Option<f64> {
        self.temperature_c.map(celsius_to_fahrenheit)
    }

    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        if self.is_calm() {
            return "calm/variable".to_string();
        }
        let direction = Self::wind_direction_to_cardinal(self.wind_direction_deg);
        if self.wind_gust_kt > self.wind_speed_kt {
            format!(
                "{:03}° ({}) {} kt gusting {} kt",
                self.wind_direction_deg, direction, self.wind_speed_kt, self.wind_gust_kt
            )
        } else {
            format!(
                "{:03}° ({}) {} kt",
                self.wind_direction_deg, direction, self.wind_speed_kt
            )
        }
    }
}

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: i32) -> f64 {
    f64::from(celsius) * 9.0 / 5.0 + 32.0
}
