//! Chart lookup by bilinear interpolation
//!
//! Values between breakpoints are interpolated bilinearly. Outside the
//! breakpoint envelope the nearest edge cell is extended linearly, so a
//! lookup never fails.

use serde::{Deserialize, Serialize};

use super::DistanceStrategy;
use crate::error::PreflightError;

/// Weight breakpoints shared by the no-wind charts (lb)
pub const WEIGHT_LB: [f64; 4] = [4000.0, 4400.0, 4800.0, 5200.0];

/// Density altitude breakpoints of the landing chart (ft)
pub const LANDING_DENSITY_ALTITUDE_FT: [f64; 9] = [
    0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0, 8000.0,
];

/// Landing over 50 ft, rows by [`WEIGHT_LB`], columns by
/// [`LANDING_DENSITY_ALTITUDE_FT`]
pub const LANDING_DISTANCE_FT: [[f64; 9]; 4] = [
    [1380.0, 1407.0, 1437.0, 1470.0, 1505.0, 1540.0, 1575.0, 1615.0, 1655.0],
    [1480.0, 1510.0, 1540.0, 1575.0, 1610.0, 1650.0, 1690.0, 1730.0, 1775.0],
    [1580.0, 1610.0, 1645.0, 1685.0, 1725.0, 1770.0, 1810.0, 1855.0, 1900.0],
    [1680.0, 1715.0, 1750.0, 1790.0, 1835.0, 1880.0, 1925.0, 1975.0, 2025.0],
];

/// Takeoff over 50 ft sampled from the takeoff polynomial on the landing
/// chart's breakpoints
const SAMPLED_TAKEOFF_FT: [[f64; 9]; 4] = [
    [1341.0, 1528.0, 1637.0, 1693.0, 1721.0, 1749.0, 1801.0, 1903.0, 2083.0],
    [1284.0, 1456.0, 1565.0, 1638.0, 1702.0, 1782.0, 1903.0, 2092.0, 2375.0],
    [1302.0, 1431.0, 1515.0, 1581.0, 1654.0, 1760.0, 1925.0, 2176.0, 2537.0],
    [1420.0, 1481.0, 1515.0, 1547.0, 1604.0, 1711.0, 1895.0, 2180.0, 2594.0],
];

/// No-wind row axis of the headwind correction chart (ft)
pub const NO_WIND_LADDER_FT: [f64; 8] = [980.0, 1170.0, 1390.0, 1650.0, 1920.0, 2280.0, 2950.0, 3810.0];

// Single row, so the weight value only labels it
const LADDER_WEIGHT_LB: [f64; 1] = [5200.0];

// Assumed spacing of the ladder; the chart itself gives no altitudes
const LADDER_DENSITY_ALTITUDE_FT: [f64; 8] =
    [0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0];

/// Headwind breakpoints of the correction chart (kt)
pub const HEADWIND_KT: [f64; 4] = [0.0, 5.0, 10.0, 15.0];

/// Wind-corrected distance, rows by [`NO_WIND_LADDER_FT`], columns by
/// [`HEADWIND_KT`]
pub const HEADWIND_CORRECTED_FT: [[f64; 4]; 8] = [
    [980.0, 870.0, 770.0, 670.0],
    [1170.0, 1050.0, 940.0, 820.0],
    [1390.0, 1240.0, 1110.0, 980.0],
    [1650.0, 1490.0, 1340.0, 1190.0],
    [1920.0, 1750.0, 1590.0, 1450.0],
    [2280.0, 2060.0, 1860.0, 1690.0],
    [2950.0, 2650.0, 2420.0, 2200.0],
    [3810.0, 3480.0, 3190.0, 2950.0],
];

/// Which takeoff chart the table strategy uses.
///
/// Both sets share the landing chart and the headwind chart; they disagree
/// on takeoff and neither is known to be authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableDataset {
    /// The no-wind rows of the headwind chart laid out one per 1000 ft of
    /// density altitude. There is no weight dimension: takeoff from this
    /// dataset is the same at every weight.
    ChartLadder,
    /// Takeoff polynomial sampled on the landing breakpoints, weight by
    /// density altitude
    #[default]
    RegressionSampled,
}

impl TableDataset {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TableDataset::ChartLadder => "chart_ladder",
            TableDataset::RegressionSampled => "regression_sampled",
        }
    }
}

/// Regular grid over two strictly increasing axes
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearTable {
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
    /// Row-major, one row per x breakpoint
    values: Vec<f64>,
}

impl BilinearTable {
    /// Build a table, checking the axes and the shape of `rows`
    pub fn new<R: AsRef<[f64]>>(
        x_axis: &[f64],
        y_axis: &[f64],
        rows: &[R],
    ) -> Result<Self, PreflightError> {
        validate_axis("x", x_axis)?;
        validate_axis("y", y_axis)?;

        if rows.len() != x_axis.len() {
            return Err(PreflightError::config(format!(
                "table has {} rows but {} x breakpoints",
                rows.len(),
                x_axis.len()
            )));
        }

        let mut values = Vec::with_capacity(x_axis.len() * y_axis.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != y_axis.len() {
                return Err(PreflightError::config(format!(
                    "table row {} has {} values but {} y breakpoints",
                    index,
                    row.len(),
                    y_axis.len()
                )));
            }
            if row.iter().any(|value| !value.is_finite()) {
                return Err(PreflightError::config(format!(
                    "table row {index} contains a non-finite value"
                )));
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            x_axis: x_axis.to_vec(),
            y_axis: y_axis.to_vec(),
            values,
        })
    }

    fn value(&self, xi: usize, yi: usize) -> f64 {
        self.values[xi * self.y_axis.len() + yi]
    }

    /// Interpolate at `(x, y)`, extrapolating linearly outside the grid
    #[must_use]
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let (x0, x1, tx) = bracket(&self.x_axis, x);
        let (y0, y1, ty) = bracket(&self.y_axis, y);

        self.value(x0, y0) * (1.0 - tx) * (1.0 - ty)
            + self.value(x1, y0) * tx * (1.0 - ty)
            + self.value(x0, y1) * (1.0 - tx) * ty
            + self.value(x1, y1) * tx * ty
    }
}

fn validate_axis(name: &str, axis: &[f64]) -> Result<(), PreflightError> {
    if axis.is_empty() {
        return Err(PreflightError::config(format!("{name} axis is empty")));
    }
    if axis.iter().any(|value| !value.is_finite()) {
        return Err(PreflightError::config(format!(
            "{name} axis contains a non-finite breakpoint"
        )));
    }
    if axis.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(PreflightError::config(format!(
            "{name} axis is not strictly increasing"
        )));
    }
    Ok(())
}

/// Cell indices and fractional position of `value` on `axis`.
///
/// Outside the axis the edge cell is used and the fraction leaves [0, 1].
/// A single-breakpoint axis is constant along that direction.
fn bracket(axis: &[f64], value: f64) -> (usize, usize, f64) {
    if axis.len() < 2 {
        return (0, 0, 0.0);
    }
    let below = axis.partition_point(|&breakpoint| breakpoint <= value);
    let lower = below.saturating_sub(1).min(axis.len() - 2);
    let upper = lower + 1;
    let fraction = (value - axis[lower]) / (axis[upper] - axis[lower]);
    (lower, upper, fraction)
}

/// Table strategy: takeoff and landing charts plus the headwind chart
#[derive(Debug, Clone, PartialEq)]
pub struct TableStrategy {
    dataset: TableDataset,
    takeoff: BilinearTable,
    landing: BilinearTable,
    headwind: BilinearTable,
}

impl TableStrategy {
    /// Build the strategy for one of the named takeoff datasets
    pub fn for_dataset(dataset: TableDataset) -> Result<Self, PreflightError> {
        let takeoff = match dataset {
            TableDataset::ChartLadder => BilinearTable::new(
                &LADDER_WEIGHT_LB,
                &LADDER_DENSITY_ALTITUDE_FT,
                &[NO_WIND_LADDER_FT],
            )?,
            TableDataset::RegressionSampled => {
                BilinearTable::new(&WEIGHT_LB, &LANDING_DENSITY_ALTITUDE_FT, &SAMPLED_TAKEOFF_FT)?
            }
        };
        let landing =
            BilinearTable::new(&WEIGHT_LB, &LANDING_DENSITY_ALTITUDE_FT, &LANDING_DISTANCE_FT)?;
        let headwind = BilinearTable::new(&NO_WIND_LADDER_FT, &HEADWIND_KT, &HEADWIND_CORRECTED_FT)?;

        Ok(Self {
            dataset,
            takeoff,
            landing,
            headwind,
        })
    }

    #[must_use]
    pub fn dataset(&self) -> TableDataset {
        self.dataset
    }
}

impl DistanceStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn takeoff_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> f64 {
        self.takeoff.interpolate(weight_lb, density_altitude_ft)
    }

    fn landing_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> f64 {
        self.landing.interpolate(weight_lb, density_altitude_ft)
    }

    fn takeoff_with_headwind(&self, headwind_kt: f64, no_wind_ft: f64) -> f64 {
        self.headwind.interpolate(no_wind_ft, headwind_kt)
    }

    // The charts only carry one headwind correction; landing uses it too.
    fn landing_with_headwind(&self, headwind_kt: f64, no_wind_ft: f64) -> f64 {
        self.headwind.interpolate(no_wind_ft, headwind_kt)
    }
}
