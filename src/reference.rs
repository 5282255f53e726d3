//! Airport and runway lookup in the OurAirports CSV extracts
//!
//! Only the columns used here are read; any others are ignored. Empty or
//! malformed numeric cells are treated as absent.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::ReferenceConfig;
use crate::error::PreflightError;
use crate::models::{Airport, RunwayEnd};

#[derive(Debug, Deserialize)]
struct AirportRecord {
    ident: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    elevation_ft: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RunwayRecord {
    airport_ident: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    length_ft: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    closed: Option<u8>,
    #[serde(default)]
    le_ident: String,
    #[serde(rename = "le_heading_degT", default, deserialize_with = "csv::invalid_option")]
    le_heading_deg: Option<f64>,
    #[serde(rename = "he_heading_degT", default, deserialize_with = "csv::invalid_option")]
    he_heading_deg: Option<f64>,
}

impl RunwayRecord {
    /// Low end of the runway. Each end keeps its own heading; when the low
    /// end heading is missing it is derived from the high end, then from the
    /// runway number.
    fn into_runway_end(self) -> Option<RunwayEnd> {
        let designator = self.le_ident.trim().to_string();
        if designator.is_empty() {
            return None;
        }

        let heading = self
            .le_heading_deg
            .or_else(|| self.he_heading_deg.map(|he| (he - 180.0).rem_euclid(360.0)))
            .or_else(|| runway_number(&designator).map(|n| f64::from(n) * 10.0));

        let Some(heading_deg) = heading else {
            warn!("Runway {} has no usable heading, skipping", designator);
            return None;
        };

        Some(RunwayEnd {
            designator,
            heading_deg,
            length_ft: self.length_ft.map_or(0, |length| length.max(0.0) as u32),
            closed: self.closed == Some(1),
        })
    }
}

fn runway_number(designator: &str) -> Option<u32> {
    let digits: String = designator
        .chars()
        .take_while(char::is_ascii_digit)
        .take(2)
        .collect();
    digits.parse().ok()
}

/// Find `ident` and its runways in CSV readers.
///
/// The ident is matched case-insensitively; when it is not found the lookup
/// is retried without its first character, so `K1B1` finds `1B1`.
pub fn find_airport<A: Read, R: Read>(airports: A, runways: R, ident: &str) -> Result<Airport> {
    let ident = ident.trim().to_uppercase();
    let records = read_airports(airports)?;

    let record = find_record(&records, &ident)
        .or_else(|| {
            let mut chars = ident.chars();
            chars.next();
            let shortened = chars.as_str();
            if shortened.is_empty() {
                return None;
            }
            debug!("{} not found, trying {}", ident, shortened);
            find_record(&records, shortened)
        })
        .ok_or_else(|| PreflightError::airport_not_found(&ident))?;

    let elevation_ft = record.elevation_ft.ok_or_else(|| {
        PreflightError::reference(format!("Airport {} has no elevation", record.ident))
    })?;

    let runways = read_runways(runways, &record.ident)?;
    info!(
        "Found {} ({}) at {} ft with {} runways",
        record.ident,
        record.name,
        elevation_ft,
        runways.len()
    );

    Ok(Airport {
        ident: record.ident.clone(),
        name: record.name.clone(),
        elevation_ft,
        runways,
    })
}

fn read_airports<A: Read>(airports: A) -> Result<Vec<AirportRecord>> {
    let mut reader = csv::Reader::from_reader(airports);
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

fn find_record<'a>(records: &'a [AirportRecord], ident: &str) -> Option<&'a AirportRecord> {
    records
        .iter()
        .find(|record| record.ident.eq_ignore_ascii_case(ident))
}

fn read_runways<R: Read>(runways: R, airport_ident: &str) -> Result<Vec<RunwayEnd>> {
    let mut reader = csv::Reader::from_reader(runways);
    let mut ends = Vec::new();
    for record in reader.deserialize::<RunwayRecord>() {
        let record = record?;
        if !record.airport_ident.eq_ignore_ascii_case(airport_ident) {
            continue;
        }
        if let Some(end) = record.into_runway_end() {
            ends.push(end);
        }
    }
    Ok(ends)
}

/// Reference data on disk
#[derive(Debug, Clone)]
pub struct AirportDirectory {
    airports_path: PathBuf,
    runways_path: PathBuf,
}

impl AirportDirectory {
    #[must_use]
    pub fn new(airports_path: impl Into<PathBuf>, runways_path: impl Into<PathBuf>) -> Self {
        Self {
            airports_path: airports_path.into(),
            runways_path: runways_path.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ReferenceConfig) -> Self {
        Self::new(&config.airports_path, &config.runways_path)
    }

    #[tracing::instrument(skip(self))]
    pub fn lookup(&self, ident: &str) -> Result<Airport> {
        let airports = open(&self.airports_path)?;
        let runways = open(&self.runways_path)?;
        find_airport(airports, runways, ident)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        PreflightError::reference(format!("Cannot open {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const AIRPORTS: &str = "\
\"id\",\"ident\",\"type\",\"name\",\"latitude_deg\",\"longitude_deg\",\"elevation_ft\"
1,\"KXYZ\",\"small_airport\",\"Test Field\",40.0,-75.0,1000
2,\"1B1\",\"small_airport\",\"Short Strip\",42.0,-73.0,235
3,\"XNOE\",\"heliport\",\"No Elevation\",41.0,-74.0,
";

    const RUNWAYS: &str = "\
\"id\",\"airport_ref\",\"airport_ident\",\"length_ft\",\"width_ft\",\"surface\",\"lighted\",\"closed\",\"le_ident\",\"le_heading_degT\",\"he_ident\",\"he_heading_degT\"
10,1,\"KXYZ\",5000,100,\"ASP\",1,0,\"09L\",92,\"27R\",272
11,1,\"KXYZ\",3000,75,\"ASP\",0,1,\"14\",,\"32\",
12,1,\"KXYZ\",4000,0,\"WATER\",0,0,\"18W\",,\"36W\",1
13,2,\"1B1\",2200,60,\"TURF\",0,0,\"04\",,\"22\",
14,3,\"OTHER\",9000,150,\"ASP\",1,0,\"01\",10,\"19\",190
";

    #[test]
    fn test_find_airport_with_runways() {
        let airport = find_airport(AIRPORTS.as_bytes(), RUNWAYS.as_bytes(), "kxyz").unwrap();
        assert_eq!(airport.ident, "KXYZ");
        assert_eq!(airport.name, "Test Field");
        assert_eq!(airport.elevation_ft, 1000.0);
        assert_eq!(airport.runways.len(), 3);

        let first = &airport.runways[0];
        assert_eq!(first.designator, "09L");
        assert_eq!(first.heading_deg, 92.0);
        assert_eq!(first.length_ft, 5000);
        assert!(!first.closed);

        // heading from the runway number, closed flag kept
        let second = &airport.runways[1];
        assert_eq!(second.heading_deg, 140.0);
        assert!(second.closed);

        // heading from the high end
        let water = &airport.runways[2];
        assert_eq!(water.heading_deg, 181.0);
        assert!(!water.is_eligible());
    }

    #[test]
    fn test_ident_fallback_drops_first_character() {
        let airport = find_airport(AIRPORTS.as_bytes(), RUNWAYS.as_bytes(), "K1B1").unwrap();
        assert_eq!(airport.ident, "1B1");
        assert_eq!(airport.runways.len(), 1);
        assert_eq!(airport.runways[0].heading_deg, 40.0);
    }

    #[test]
    fn test_unknown_airport() {
        let err = find_airport(AIRPORTS.as_bytes(), RUNWAYS.as_bytes(), "ZZZZ").unwrap_err();
        assert!(matches!(err, PreflightError::AirportNotFound { ident } if ident == "ZZZZ"));
    }

    #[test]
    fn test_missing_elevation_is_reference_error() {
        let err = find_airport(AIRPORTS.as_bytes(), RUNWAYS.as_bytes(), "XNOE").unwrap_err();
        assert!(matches!(err, PreflightError::Reference { .. }));
    }

    #[test]
    fn test_directory_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let airports_path = dir.path().join("airports.csv");
        let runways_path = dir.path().join("runways.csv");
        File::create(&airports_path)
            .unwrap()
            .write_all(AIRPORTS.as_bytes())
            .unwrap();
        File::create(&runways_path)
            .unwrap()
            .write_all(RUNWAYS.as_bytes())
            .unwrap();

        let directory = AirportDirectory::new(&airports_path, &runways_path);
        assert_eq!(directory.lookup("KXYZ").unwrap().runways.len(), 3);

        let missing = AirportDirectory::new(dir.path().join("nope.csv"), &runways_path);
        assert!(matches!(
            missing.lookup("KXYZ").unwrap_err(),
            PreflightError::Reference { .. }
        ));
    }

    #[test]
    fn test_runway_number() {
        assert_eq!(runway_number("09L"), Some(9));
        assert_eq!(runway_number("36"), Some(36));
        assert_eq!(runway_number("H1"), None);
    }
}
