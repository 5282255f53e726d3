//! Closed-form polynomial distance model
//!
//! Every output is a third-order bivariate polynomial fitted to the
//! reference charts.

use super::DistanceStrategy;

/// `c0 + c1 x + c2 y + c3 x² + c4 xy + c5 y² + c6 x³ + c7 x²y + c8 xy² + c9 y³`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BivariateCubic {
    coefficients: [f64; 10],
}

impl BivariateCubic {
    #[must_use]
    pub const fn new(coefficients: [f64; 10]) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let c = &self.coefficients;
        let terms = [
            1.0,
            x,
            y,
            x * x,
            x * y,
            y * y,
            x * x * x,
            x * x * y,
            x * y * y,
            y * y * y,
        ];
        c.iter().zip(terms).map(|(ci, term)| ci * term).sum()
    }
}

/// No-wind takeoff over 50 ft; x = density altitude (ft), y = weight (lb)
pub const TAKEOFF_NO_WIND: BivariateCubic = BivariateCubic::new([
    1.317919e-03,
    -9.248807e-01,
    2.010712e+00,
    -1.382750e-04,
    6.107982e-04,
    -7.011730e-04,
    4.315973e-09,
    2.147113e-08,
    -8.016888e-08,
    7.058259e-08,
]);

/// No-wind landing over 50 ft; x = density altitude (ft), y = weight (lb).
/// Least-squares fit of the landing reference grid.
pub const LANDING_NO_WIND: BivariateCubic = BivariateCubic::new([
    2.309846465e+03,
    1.582474747e-02,
    -1.017713384e+00,
    7.030303030e-07,
    -2.025162338e-07,
    2.762152778e-04,
    -5.997474747e-11,
    2.167207792e-10,
    6.510416667e-10,
    -1.996527778e-08,
]);

/// Wind-adjusted takeoff; x = no-wind distance (ft), y = headwind (kt)
pub const TAKEOFF_HEADWIND: BivariateCubic = BivariateCubic::new([
    -1.345024e+02,
    1.212677e+00,
    -1.580498e+00,
    -1.001003e-04,
    -2.179669e-02,
    1.770352e-02,
    1.417450e-08,
    7.076594e-07,
    3.379797e-04,
    -1.500000e-02,
]);

/// Wind-adjusted landing; x = no-wind distance (ft), y = headwind (kt)
pub const LANDING_HEADWIND: BivariateCubic = BivariateCubic::new([
    -7.384758e+02,
    2.398023e+00,
    -4.749474e-01,
    -8.651134e-04,
    -1.528699e-02,
    -3.277356e-02,
    1.751042e-07,
    2.111363e-06,
    3.409930e-06,
    2.424242e-03,
]);

/// Polynomial strategy.
///
/// The headwind polynomials are used exactly as fitted. Their behaviour
/// toward the heavy, high end of the takeoff chart has not been checked
/// against the printed chart and should not be corrected without it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionStrategy {
    takeoff_no_wind: BivariateCubic,
    landing_no_wind: BivariateCubic,
    takeoff_headwind: BivariateCubic,
    landing_headwind: BivariateCubic,
}

impl RegressionStrategy {
    #[must_use]
    pub fn new(
        takeoff_no_wind: BivariateCubic,
        landing_no_wind: BivariateCubic,
        takeoff_headwind: BivariateCubic,
        landing_headwind: BivariateCubic,
    ) -> Self {
        Self {
            takeoff_no_wind,
            landing_no_wind,
            takeoff_headwind,
            landing_headwind,
        }
    }
}

impl Default for RegressionStrategy {
    fn default() -> Self {
        Self::new(
            TAKEOFF_NO_WIND,
            LANDING_NO_WIND,
            TAKEOFF_HEADWIND,
            LANDING_HEADWIND,
        )
    }
}

impl DistanceStrategy for RegressionStrategy {
    fn name(&self) -> &'static str {
        "regression"
    }

    fn takeoff_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> f64 {
        self.takeoff_no_wind.evaluate(density_altitude_ft, weight_lb)
    }

    fn landing_no_wind(&self, weight_lb: f64, density_altitude_ft: f64) -> f64 {
        self.landing_no_wind.evaluate(density_altitude_ft, weight_lb)
    }

    fn takeoff_with_headwind(&self, headwind_kt: f64, no_wind_ft: f64) -> f64 {
        self.takeoff_headwind.evaluate(no_wind_ft, headwind_kt)
    }

    fn landing_with_headwind(&self, headwind_kt: f64, no_wind_ft: f64) -> f64 {
        self.landing_headwind.evaluate(no_wind_ft, headwind_kt)
    }
}
