//! Helper functions for integration tests

use hh_rs::models::HodgkinHuxleyModel;
use hh_rs::physics::ChannelConfig;
use hh_rs::solver::Scenario;

/// Scenario with the default Hodgkin-Huxley parameters
pub fn default_scenario() -> Scenario {
    let model = HodgkinHuxleyModel::new(ChannelConfig::default())
        .expect("default channel configuration is valid");
    Scenario::new(Box::new(model))
}

/// Largest absolute pointwise difference between two equal-length series
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "series length mismatch");
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Relative error of `approx` against a non-zero `exact`
pub fn relative_error(approx: f64, exact: f64) -> f64 {
    (approx - exact).abs() / exact.abs()
}
