//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method combines four slope
//! estimates per step:
//!
//! ```text
//! k1 = f(y_n, t_n)
//! k2 = f(y_n + h/2 * k1, t_n + h/2)
//! k3 = f(y_n + h/2 * k2, t_n + h/2)
//! k4 = f(y_n + h * k3,   t_n + h)
//!
//! y_{n+1} = y_n + h/6 * (k1 + 2*k2 + 2*k3 + k4)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: fourth-order accurate (global error ~ O(h⁴))
//! - **Stability**: larger stability region than Euler
//! - **Complexity**: 4 function evaluations per step
//! - **Memory**: O(1) working state (the four stage slopes)
//!
//! The weights (1, 2, 2, 1)/6 come from Simpson's quadrature rule.
//! Default step size 0.01 resolves the fast sodium upstroke of the
//! action potential.

use crate::error::SimulationError;
use crate::solver::validate_state;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

/// Default step size for [`RK4Solver`]
pub const DEFAULT_RK4_STEP: f64 = 0.01;

/// Classical fourth-order Runge-Kutta solver
///
/// # Example
///
/// ```rust
/// use hh_rs::models::HodgkinHuxleyModel;
/// use hh_rs::physics::ChannelConfig;
/// use hh_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
///
/// let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
/// let scenario = Scenario::new(Box::new(model));
/// let config = SolverConfiguration::fixed_step(5.0, 0.01);
///
/// let result = RK4Solver::new().solve(&scenario, &config).unwrap();
/// assert_eq!(result.time_points.len(), result.voltages.len());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, SimulationError> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (total_time, dt) = match &config.solver_type {
            SolverType::FixedStep {
                total_time,
                step_size,
            } => (*total_time, *step_size),
            other => {
                return Err(SimulationError::Unsupported(format!(
                    "RK4Solver only supports FixedStep configuration, got {}",
                    other.name()
                )));
            }
        };

        log::debug!(
            "RK4: model = {}, total_time = {}, dt = {}",
            scenario.model_name(),
            total_time,
            dt
        );

        // ====== Step 2: Setup ======

        let mut state = scenario.initial_state();

        let capacity = (total_time / dt).ceil() as usize + 2;
        let mut time_points = Vec::with_capacity(capacity);
        let mut state_trajectory = Vec::with_capacity(capacity);

        time_points.push(0.0);
        state_trajectory.push(state);

        // ====== Step 3: Time Integration ======

        let mut step: usize = 0;
        while (step as f64) * dt < total_time {
            let t = (step as f64) * dt;

            // ====== RK4 Stages ======

            // Stage 1: slope at the beginning of the interval
            let k1 = scenario.model.evaluate(&state, t);

            // Stage 2: slope at the midpoint using an Euler prediction with k1
            let k2 = scenario
                .model
                .evaluate(&(state + k1 * (dt / 2.0)), t + dt / 2.0);

            // Stage 3: slope at the midpoint using an Euler prediction with k2
            let k3 = scenario
                .model
                .evaluate(&(state + k2 * (dt / 2.0)), t + dt / 2.0);

            // Stage 4: slope at the end using an Euler prediction with k3
            let k4 = scenario.model.evaluate(&(state + k3 * dt), t + dt);

            // ====== RK4 Update ======

            // Simpson weights: endpoints 1/6, midpoints 2/6
            let weighted_slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
            state = state + weighted_slope * (dt / 6.0);

            step += 1;
            time_points.push((step as f64) * dt);
            state_trajectory.push(state);

            validate_state(&state, step, (step as f64) * dt)?;
        }

        // ====== Step 4: Build Result ======

        let final_state = state;
        let mut result = SimulationResult::new(time_points, state_trajectory, final_state);

        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("function evaluations", &(4 * step).to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Runge-Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
