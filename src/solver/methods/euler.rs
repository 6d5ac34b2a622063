//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! The Forward Euler method is the simplest explicit time-stepping
//! scheme for solving ordinary differential equations:
//!
//! ```text
//! y_{n+1} = y_n + h * f(y_n, t_n)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: first-order accurate (error ~ O(h))
//! - **Stability**: conditionally stable (requires small steps)
//! - **Complexity**: 1 function evaluation per step
//! - **Memory**: O(1) working state
//!
//! It is also the degenerate case of the Adams-Bashforth family with
//! history length 1: for identical step size and configuration the two
//! produce numerically identical trajectories.

use crate::error::SimulationError;
use crate::solver::validate_state;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

/// Default step size for [`EulerSolver`]
pub const DEFAULT_EULER_STEP: f64 = 0.01;

/// Forward Euler time-stepping solver
///
/// # Algorithm
///
/// 1. Start with the scenario's initial state y_0 at t = 0
/// 2. While accumulated time < total_time:
///    - slope = f(y_n, t_n)
///    - y_{n+1} = y_n + h * slope
///    - record (t_{n+1}, y_{n+1}); fail on a non-finite component
/// 3. Return the complete trajectory
///
/// The loop invariant means the final time point is ≥ `total_time` and
/// overshoots it by less than one step.
///
/// # Example
///
/// ```rust
/// use hh_rs::models::HodgkinHuxleyModel;
/// use hh_rs::physics::ChannelConfig;
/// use hh_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration};
///
/// let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
/// let scenario = Scenario::new(Box::new(model));
/// let config = SolverConfiguration::fixed_step(5.0, 0.01);
///
/// let result = EulerSolver::new().solve(&scenario, &config).unwrap();
/// assert!(*result.time_points.last().unwrap() >= 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Forward Euler solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
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
                    "EulerSolver only supports FixedStep configuration, got {}",
                    other.name()
                )));
            }
        };

        log::debug!(
            "Forward Euler: model = {}, total_time = {}, dt = {}",
            scenario.model_name(),
            total_time,
            dt
        );

        // ====== Step 2: Setup ======

        let mut state = scenario.initial_state();

        // Reserve exact capacity to avoid reallocation during integration
        let capacity = (total_time / dt).ceil() as usize + 2;
        let mut time_points = Vec::with_capacity(capacity);
        let mut state_trajectory = Vec::with_capacity(capacity);

        time_points.push(0.0);
        state_trajectory.push(state);

        // ====== Step 3: Time Integration ======

        // Time points are derived from the step index ((step + 1) * dt)
        // rather than accumulated with t += dt, so floating-point
        // rounding does not pile up over long runs.
        let mut step: usize = 0;
        while (step as f64) * dt < total_time {
            let t = (step as f64) * dt;

            let slope = scenario.model.evaluate(&state, t);
            state = state + slope * dt;

            step += 1;
            time_points.push((step as f64) * dt);
            state_trajectory.push(state);

            validate_state(&state, step, (step as f64) * dt)?;
        }

        // ====== Step 4: Build Result ======

        let final_state = state;
        let mut result = SimulationResult::new(time_points, state_trajectory, final_state);

        result.add_metadata("solver", "Forward Euler");
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("function evaluations", &step.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
