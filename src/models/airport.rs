//! Airport, runway end and derived altitude models

use serde::{Deserialize, Serialize};

use crate::wind::reciprocal_designator;

/// Airport as resolved from the reference data
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Airport {
    /// Identifier as found in the reference data
    pub ident: String,
    /// Airport name
    pub name: String,
    /// Field elevation in feet (may be negative)
    pub elevation_ft: f64,
    /// One record per physical runway, keyed by its low end
    pub runways: Vec<RunwayEnd>,
}

/// Altitudes derived once per run from the field elevation and the observation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct AirportContext {
    /// Field elevation in feet
    pub elevation_ft: f64,
    /// Pressure altitude in feet
    pub pressure_altitude_ft: i32,
    /// Density altitude in feet
    pub density_altitude_ft: i32,
}

/// One end of a runway
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunwayEnd {
    /// Designator such as `09L`, `36` or `18W`
    pub designator: String,
    /// True heading in degrees
    pub heading_deg: f64,
    /// Physical length in feet
    pub length_ft: u32,
    /// Runway is closed
    pub closed: bool,
}

impl RunwayEnd {
    #[must_use]
    pub fn new(designator: impl Into<String>, heading_deg: f64, length_ft: u32) -> Self {
        Self {
            designator: designator.into(),
            heading_deg,
            length_ft,
            closed: false,
        }
    }

    /// Water runways carry a trailing `W`
    #[must_use]
    pub fn is_water(&self) -> bool {
        self.designator.trim_end().ends_with(['W', 'w'])
    }

    /// Closed and water runways are not evaluated
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.closed && !self.is_water()
    }

    /// The opposite end of the same runway.
    ///
    /// Returns `None` when the designator has no runway number to turn around.
    #[must_use]
    pub fn reciprocal(&self) -> Option<Self> {
        let designator = reciprocal_designator(&self.designator)?;
        Some(Self {
            designator,
            heading_deg: (self.heading_deg + 180.0).rem_euclid(360.0),
            length_ft: self.length_ft,
            closed: self.closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reciprocal_runway_end() {
        let end = RunwayEnd::new("09L", 92.0, 5000);
        let reciprocal = end.reciprocal().unwrap();
        assert_eq!(reciprocal.designator, "27R");
        assert_eq!(reciprocal.heading_deg, 272.0);
        assert_eq!(reciprocal.length_ft, 5000);
    }

    #[test]
    fn test_reciprocal_is_involution() {
        for (designator, heading) in [("09L", 92.0), ("36", 358.5), ("18C", 181.0), ("01R", 7.0)] {
            let end = RunwayEnd::new(designator, heading, 4000);
            let back = end.reciprocal().and_then(|r| r.reciprocal()).unwrap();
            assert_eq!(back.designator, end.designator);
            assert!((back.heading_deg - end.heading_deg).abs() < 1e-9);
        }
    }

    #[test]
    fn test_eligibility() {
        let mut end = RunwayEnd::new("14", 140.0, 3000);
        assert!(end.is_eligible());

        end.closed = true;
        assert!(!end.is_eligible());

        let water = RunwayEnd::new("18W", 180.0, 4000);
        assert!(water.is_water());
        assert!(!water.is_eligible());
    }

    #[test]
    fn test_non_numeric_designator_has_no_reciprocal() {
        let end = RunwayEnd::new("H1", 0.0, 60);
        assert!(end.reciprocal().is_none());
    }
}
