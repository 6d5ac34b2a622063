//! Numerical solvers for membrane dynamics
//!
//! # Architecture
//!
//! The solver layer separates three concerns:
//!
//! - **WHAT to solve**: [`Scenario`] (a model plus its initial state)
//! - **HOW to solve**: [`SolverConfiguration`] (time grid parameters)
//! - **The method**: each [`Solver`] implementation walks the grid its
//!   own way and returns a uniform [`SimulationResult`]
//!
//! # Quick Start
//!
//! ```rust
//! use hh_rs::models::HodgkinHuxleyModel;
//! use hh_rs::physics::ChannelConfig;
//! use hh_rs::solver::{solve, Method};
//!
//! let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
//! let result = solve(Method::RK4, Box::new(model), 25.0).unwrap();
//!
//! let (times, voltages) = result.series();
//! assert_eq!(times.len(), voltages.len());
//! ```

pub mod methods;
pub mod scenario;
pub mod traits;

pub use methods::{
    AdamsBashforthSolver, AdaptiveIntegrator, DormandPrince45, EulerSolver, MultistepOrder,
    RK4Solver, ReferenceSolver, DEFAULT_ADAMS_BASHFORTH_STEP, DEFAULT_EULER_STEP,
    DEFAULT_REFERENCE_SAMPLES, DEFAULT_RK4_STEP,
};
pub use scenario::Scenario;
pub use traits::{
    SimulationResult, Solver, SolverConfiguration, SolverType, REST_DISPLAY_OFFSET,
};

use crate::error::SimulationError;
use crate::physics::{MembraneState, NeuronModel};

/// Abort the solve when a step produced a non-finite component
///
/// Runs after every accepted state so a blown-up trajectory fails fast
/// instead of filling the result with NaN samples.
pub(crate) fn validate_state(
    state: &MembraneState,
    step: usize,
    time: f64,
) -> Result<(), SimulationError> {
    if state.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::Divergence { step, time })
    }
}

// =================================================================================================
// Method selection
// =================================================================================================

/// Numerical method selector for the convenience entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Forward Euler at step size [`DEFAULT_EULER_STEP`]
    Euler,
    /// Classical Runge-Kutta at step size [`DEFAULT_RK4_STEP`]
    RK4,
    /// Adams-Bashforth at step size [`DEFAULT_ADAMS_BASHFORTH_STEP`]
    AdamsBashforth(MultistepOrder),
    /// Adaptive reference solution on a [`DEFAULT_REFERENCE_SAMPLES`]-point grid
    Reference,
}

/// Run one simulation with a method's default time grid
///
/// Convenience wrapper over the [`Solver`] trait for callers that do
/// not need custom step sizes.
pub fn solve(
    method: Method,
    model: Box<dyn NeuronModel>,
    total_time: f64,
) -> Result<SimulationResult, SimulationError> {
    let scenario = Scenario::new(model);

    match method {
        Method::Euler => {
            let config = SolverConfiguration::fixed_step(total_time, DEFAULT_EULER_STEP);
            EulerSolver::new().solve(&scenario, &config)
        }
        Method::RK4 => {
            let config = SolverConfiguration::fixed_step(total_time, DEFAULT_RK4_STEP);
            RK4Solver::new().solve(&scenario, &config)
        }
        Method::AdamsBashforth(order) => {
            let config =
                SolverConfiguration::fixed_step(total_time, DEFAULT_ADAMS_BASHFORTH_STEP);
            AdamsBashforthSolver::new(order).solve(&scenario, &config)
        }
        Method::Reference => {
            let config = SolverConfiguration::sampled(total_time, DEFAULT_REFERENCE_SAMPLES);
            ReferenceSolver::default().solve(&scenario, &config)
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HodgkinHuxleyModel;
    use crate::physics::ChannelConfig;

    #[test]
    fn test_validate_state() {
        let good = MembraneState::new(0.0, 0.3, 0.05, 0.6);
        assert!(validate_state(&good, 1, 0.01).is_ok());

        let bad = MembraneState::new(f64::INFINITY, 0.3, 0.05, 0.6);
        match validate_state(&bad, 7, 0.07) {
            Err(SimulationError::Divergence { step, time }) => {
                assert_eq!(step, 7);
                assert!((time - 0.07).abs() < 1e-12);
            }
            other => panic!("expected Divergence, got {:?}", other),
        }
    }

    #[test]
    fn test_convenience_solve_fixed_step_methods() {
        for method in [
            Method::Euler,
            Method::RK4,
            Method::AdamsBashforth(MultistepOrder::Three),
        ] {
            let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
            let result = solve(method, Box::new(model), 5.0).unwrap();
            assert!(!result.is_empty());
            assert!(*result.time_points.last().unwrap() >= 5.0);
        }
    }

    #[test]
    fn test_convenience_solve_reference_grid() {
        let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
        let result = solve(Method::Reference, Box::new(model), 1.0).unwrap();
        assert_eq!(result.len(), DEFAULT_REFERENCE_SAMPLES);
    }
}
