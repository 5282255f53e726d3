//! METAR decoding
//!
//! Every field is located by its own pattern anywhere in the report rather
//! than by walking tokens in order, so a report with a missing or garbled
//! group still yields all the groups that are intact. The parser never
//! fails: fields that are not found keep the defaults of
//! [`WeatherObservation`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::models::{ObservationTime, VariableWind, WeatherObservation};

static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{2})(\d{2})(\d{2})Z\b").expect("valid time pattern"));

static WIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{3}|VRB)(\d{2})(G\d{2})?KT\b").expect("valid wind pattern")
});

static VARIABLE_WIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{3})V(\d{3})\b").expect("valid variable wind pattern"));

static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(M?\d{2})/(M?\d{2})\b").expect("valid temperature pattern"));

static ALTIMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bA(\d{2})(\d{2})\b").expect("valid altimeter pattern"));

static REMARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bRMK\s+(.*)").expect("valid remarks pattern"));

const VARIABLE_DIRECTION: &str = "VRB";
const MAX_DIRECTION_DEG: u16 = 360;

/// Decode a raw METAR line into a [`WeatherObservation`]
#[must_use]
pub fn parse(report: &str) -> WeatherObservation {
    let mut observation = WeatherObservation {
        station: report.split_whitespace().next().map(str::to_string),
        ..WeatherObservation::default()
    };

    observation.time = parse_time(report);
    if observation.time.is_none() {
        debug!("No observation time group in report");
    }

    if let Some((direction, speed, gust)) = parse_wind(report) {
        observation.wind_direction_deg = direction;
        observation.wind_speed_kt = speed;
        observation.wind_gust_kt = gust;
    } else {
        debug!("No wind group in report");
    }

    observation.variable_wind = parse_variable_wind(report);

    if let Some((temperature, dewpoint)) = parse_temperature(report) {
        observation.temperature_c = Some(temperature);
        observation.dewpoint_c = Some(dewpoint);
    } else {
        debug!("No temperature/dew point group in report");
    }

    observation.altimeter_inhg = parse_altimeter(report);
    if observation.altimeter_inhg.is_none() {
        debug!("No altimeter group in report");
    }

    observation.remarks = REMARKS
        .captures(report)
        .map(|caps| caps[1].trim().to_string());

    observation
}

fn parse_time(report: &str) -> Option<ObservationTime> {
    let caps = TIME.captures(report)?;
    Some(ObservationTime {
        day: caps[1].parse().ok()?,
        hour: caps[2].parse().ok()?,
        minute: caps[3].parse().ok()?,
    })
}

/// Returns direction, speed and gust in knots.
///
/// A variable direction is reported as direction 0 and speed 0, whatever
/// speed the group carries. Without a gust group the gust equals the speed.
/// A direction past 360 is unusable and left at 0; a gust below the speed
/// is raised to the speed.
fn parse_wind(report: &str) -> Option<(u16, u16, u16)> {
    let caps = WIND.captures(report)?;

    let (direction, speed) = if &caps[1] == VARIABLE_DIRECTION {
        (0, 0)
    } else {
        let direction: u16 = caps[1].parse().ok()?;
        let speed = caps[2].parse().ok()?;
        if direction > MAX_DIRECTION_DEG {
            warn!("Wind direction {} out of range, ignoring it", direction);
            (0, speed)
        } else {
            (direction, speed)
        }
    };

    let gust = match caps.get(3) {
        Some(group) => group.as_str()[1..].parse().ok()?,
        None => speed,
    };
    if gust < speed {
        warn!("Gust {} kt below wind speed {} kt, using the wind speed", gust, speed);
    }

    Some((direction, speed, gust.max(speed)))
}

fn parse_variable_wind(report: &str) -> Option<VariableWind> {
    let caps = VARIABLE_WIND.captures(report)?;
    Some(VariableWind {
        from_deg: caps[1].parse().ok()?,
        to_deg: caps[2].parse().ok()?,
    })
}

fn parse_temperature(report: &str) -> Option<(i32, i32)> {
    let caps = TEMPERATURE.captures(report)?;
    Some((signed_celsius(&caps[1])?, signed_celsius(&caps[2])?))
}

/// `M` marks a negative value
fn signed_celsius(group: &str) -> Option<i32> {
    match group.strip_prefix('M') {
        Some(digits) => digits.parse::<i32>().ok().map(|value| -value),
        None => group.parse().ok(),
    }
}

/// `A3004` is 30.04 inHg
fn parse_altimeter(report: &str) -> Option<f64> {
    let caps = ALTIMETER.captures(report)?;
    let whole: u32 = caps[1].parse().ok()?;
    let hundredths: u32 = caps[2].parse().ok()?;
    Some(f64::from(whole) + f64::from(hundredths) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_full_report() {
        let observation = parse("KXYZ 311956Z 14012G18KT 32/26 A3004");

        assert_eq!(observation.station.as_deref(), Some("KXYZ"));
        assert_eq!(
            observation.time,
            Some(ObservationTime { day: 31, hour: 19, minute: 56 })
        );
        assert_eq!(observation.wind_direction_deg, 140);
        assert_eq!(observation.wind_speed_kt, 12);
        assert_eq!(observation.wind_gust_kt, 18);
        assert_eq!(observation.temperature_c, Some(32));
        assert_eq!(observation.dewpoint_c, Some(26));
        assert_relative_eq!(observation.altimeter_inhg.unwrap(), 30.04);
        assert!(observation.remarks.is_none());
        assert!(observation.variable_wind.is_none());
    }

    #[test]
    fn test_variable_wind_quirk() {
        let observation = parse("KXYZ 311956Z VRB05KT A2992");

        assert_eq!(observation.wind_direction_deg, 0);
        assert_eq!(observation.wind_speed_kt, 0);
        assert_eq!(observation.wind_gust_kt, 0);
        assert_relative_eq!(observation.altimeter_inhg.unwrap(), 29.92);
        assert!(observation.temperature_c.is_none());
    }

    #[test]
    fn test_gust_defaults_to_speed() {
        let observation = parse("KABC 011200Z 27008KT 10SM CLR 15/05 A2992");
        assert_eq!(observation.wind_speed_kt, 8);
        assert_eq!(observation.wind_gust_kt, 8);
    }

    #[test]
    fn test_variable_direction_range_and_remarks() {
        let observation = parse(
            "KSFO 121756Z 28014G22KT 250V310 10SM FEW008 M02/M07 A3012 RMK AO2 SLP201 T10221072 ",
        );
        assert_eq!(
            observation.variable_wind,
            Some(VariableWind { from_deg: 250, to_deg: 310 })
        );
        assert_eq!(observation.temperature_c, Some(-2));
        assert_eq!(observation.dewpoint_c, Some(-7));
        assert_eq!(observation.remarks.as_deref(), Some("AO2 SLP201 T10221072"));
    }

    #[rstest]
    #[case("00000KT", 0, 0, 0)]
    #[case("36010KT", 360, 10, 10)]
    #[case("09005G15KT", 90, 5, 15)]
    #[case("VRB03G12KT", 0, 0, 12)]
    fn test_wind_groups(
        #[case] group: &str,
        #[case] direction: u16,
        #[case] speed: u16,
        #[case] gust: u16,
    ) {
        let observation = parse(&format!("KTST 010000Z {group} A2992"));
        assert_eq!(observation.wind_direction_deg, direction);
        assert_eq!(observation.wind_speed_kt, speed);
        assert_eq!(observation.wind_gust_kt, gust);
    }

    #[test]
    fn test_empty_report_yields_defaults() {
        let observation = parse("");
        assert_eq!(observation, WeatherObservation::default());
    }

    #[test]
    fn test_garbled_report_keeps_intact_fields() {
        let observation = parse("KXYZ 31195 1401xKT 32/26 A3004");
        assert_eq!(observation.station.as_deref(), Some("KXYZ"));
        assert!(observation.time.is_none());
        assert_eq!(observation.wind_speed_kt, 0);
        assert_eq!(observation.temperature_c, Some(32));
        assert!(observation.altimeter_inhg.is_some());
    }

    #[test]
    fn test_wind_speed_not_above_gust() {
        for report in [
            "KXYZ 311956Z 14012G18KT 32/26 A3004",
            "KXYZ 311956Z VRB05KT A2992",
            "KXYZ 311956Z 27015KT A2992",
        ] {
            let observation = parse(report);
            assert!(observation.wind_speed_kt <= observation.wind_gust_kt);
        }
    }

    #[test]
    fn test_gust_below_speed_is_raised() {
        let observation = parse("KXYZ 311956Z 14020G15KT 32/26 A3004");
        assert_eq!(observation.wind_direction_deg, 140);
        assert_eq!(observation.wind_speed_kt, 20);
        assert_eq!(observation.wind_gust_kt, 20);
    }

    #[test]
    fn test_direction_past_360_keeps_default() {
        let observation = parse("KXYZ 311956Z 45010KT 32/26 A3004");
        assert_eq!(observation.wind_direction_deg, 0);
        assert_eq!(observation.wind_speed_kt, 10);
        assert_eq!(observation.wind_gust_kt, 10);
        assert_eq!(observation.temperature_c, Some(32));
    }
}
