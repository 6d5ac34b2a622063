//! Adams-Bashforth multistep solver (orders 1-4)
//!
//! # Mathematical Background
//!
//! Adams-Bashforth is a family of explicit linear multistep methods: the
//! order-k formula advances the newest state using the derivative at the
//! last k states:
//!
//! ```text
//! order 1:  y_{n+1} = y_n + h * f(y_n)
//! order 2:  y_{n+1} = y_n + h * (3/2 f(y_n) - 1/2 f(y_{n-1}))
//! order 3:  y_{n+1} = y_n + h * (23/12 f(y_n) - 16/12 f(y_{n-1}) + 5/12 f(y_{n-2}))
//! order 4:  y_{n+1} = y_n + h * (55/24 f(y_n) - 59/24 f(y_{n-1}) + 37/24 f(y_{n-2}) - 9/24 f(y_{n-3}))
//! ```
//!
//! # Macro-step semantics
//!
//! The method is not self-starting for k > 1. This solver bootstraps
//! every macro step from scratch: one accepted state advance consists of
//! `s` sub-steps of increasing order 1, 2, ..., s, each taken at the
//! outer step size `h` and each consuming the bounded history of the
//! sub-states produced so far. Only the final combined state is
//! accepted, and simulation time advances by `h * s` per macro step.
//!
//! This is deliberately NOT the textbook multistep time-stepping (which
//! bootstraps once and then reuses a sliding derivative history). The
//! macro-step accounting — `s` derivative histories consumed per
//! accepted state, time advancing by `h * s` — is the contract this
//! solver reproduces; see the divergence check below, which runs once
//! per accepted macro state.
//!
//! # Divergence
//!
//! After every macro step the accepted state is checked for non-finite
//! components; a hit aborts the solve with
//! [`SimulationError::Divergence`] and no partial trajectory is
//! returned.

use crate::error::SimulationError;
use crate::physics::{MembraneState, NeuronModel};
use crate::solver::validate_state;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

/// Default step size for [`AdamsBashforthSolver`]
pub const DEFAULT_ADAMS_BASHFORTH_STEP: f64 = 0.02;

// =================================================================================================
// Multistep order
// =================================================================================================

/// History depth of the Adams-Bashforth family
///
/// Tagged-variant dispatch over the per-order stepping formulas: each
/// variant knows its own coefficient row, so no variable-arity argument
/// plumbing is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultistepOrder {
    /// Order 1 (identical to Forward Euler)
    One,
    /// Order 2
    Two,
    /// Order 3
    Three,
    /// Order 4
    Four,
}

impl MultistepOrder {
    /// Number of history states the full-order formula consumes
    pub fn steps(self) -> usize {
        match self {
            MultistepOrder::One => 1,
            MultistepOrder::Two => 2,
            MultistepOrder::Three => 3,
            MultistepOrder::Four => 4,
        }
    }

    /// Map a requested history depth to an order
    pub fn from_steps(steps: usize) -> Option<Self> {
        match steps {
            1 => Some(MultistepOrder::One),
            2 => Some(MultistepOrder::Two),
            3 => Some(MultistepOrder::Three),
            4 => Some(MultistepOrder::Four),
            _ => None,
        }
    }

    /// Coefficient row, newest state first
    ///
    /// `coefficients()[j]` multiplies `f(y_{n-j})`.
    pub fn coefficients(self) -> &'static [f64] {
        match self {
            MultistepOrder::One => &[1.0],
            MultistepOrder::Two => &[3.0 / 2.0, -1.0 / 2.0],
            MultistepOrder::Three => &[23.0 / 12.0, -16.0 / 12.0, 5.0 / 12.0],
            MultistepOrder::Four => &[55.0 / 24.0, -59.0 / 24.0, 37.0 / 24.0, -9.0 / 24.0],
        }
    }
}

// =================================================================================================
// Adams-Bashforth solver
// =================================================================================================

/// Adams-Bashforth solver with per-macro-step bootstrap
///
/// # Example
///
/// ```rust
/// use hh_rs::models::HodgkinHuxleyModel;
/// use hh_rs::physics::ChannelConfig;
/// use hh_rs::solver::{
///     AdamsBashforthSolver, MultistepOrder, Scenario, Solver, SolverConfiguration,
/// };
///
/// let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
/// let scenario = Scenario::new(Box::new(model));
/// let solver = AdamsBashforthSolver::new(MultistepOrder::Three);
/// let config = SolverConfiguration::fixed_step(5.0, 0.02);
///
/// let result = solver.solve(&scenario, &config).unwrap();
/// // Each macro step advances time by h * s = 0.06
/// assert!((result.time_points[1] - 0.06).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdamsBashforthSolver {
    order: MultistepOrder,
}

impl AdamsBashforthSolver {
    /// Create a solver with the given history depth
    pub fn new(order: MultistepOrder) -> Self {
        Self { order }
    }

    /// The configured history depth
    pub fn order(&self) -> MultistepOrder {
        self.order
    }

    /// One accepted state advance: s bootstrap sub-steps of increasing
    /// order, consuming the history built so far
    ///
    /// The history is bounded: at most `s + 1` states live at once, and
    /// it is rebuilt from the accepted state on every macro step.
    fn macro_step(
        &self,
        model: &dyn NeuronModel,
        state: MembraneState,
        t: f64,
        dt: f64,
    ) -> MembraneState {
        let s = self.order.steps();

        let mut history: Vec<MembraneState> = Vec::with_capacity(s + 1);
        history.push(state);

        for sub in 0..s {
            // Sub-step `sub` uses the order-(sub + 1) formula; the
            // history is exactly deep enough to feed it.
            let coefficients = MultistepOrder::from_steps(sub + 1)
                .map(MultistepOrder::coefficients)
                .unwrap_or(&[1.0]);

            let newest = history.len() - 1;
            let mut increment = model.evaluate(&history[newest], t) * coefficients[0];
            for (j, &c) in coefficients.iter().enumerate().skip(1) {
                increment = increment + model.evaluate(&history[newest - j], t) * c;
            }

            history.push(history[newest] + increment * dt);
        }

        history[history.len() - 1]
    }
}

impl Solver for AdamsBashforthSolver {
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
                    "AdamsBashforthSolver only supports FixedStep configuration, got {}",
                    other.name()
                )));
            }
        };

        let s = self.order.steps();

        log::debug!(
            "Adams-Bashforth (s = {}): model = {}, total_time = {}, dt = {}",
            s,
            scenario.model_name(),
            total_time,
            dt
        );

        // ====== Step 2: Setup ======

        // One macro step advances time by h * s.
        let stride = dt * s as f64;

        let mut state = scenario.initial_state();

        let capacity = (total_time / stride).ceil() as usize + 2;
        let mut time_points = Vec::with_capacity(capacity);
        let mut state_trajectory = Vec::with_capacity(capacity);

        time_points.push(0.0);
        state_trajectory.push(state);

        // ====== Step 3: Time Integration ======

        let mut macro_index: usize = 0;
        while (macro_index as f64) * stride < total_time {
            let t = (macro_index as f64) * stride;

            state = self.macro_step(scenario.model.as_ref(), state, t, dt);

            macro_index += 1;
            time_points.push((macro_index as f64) * stride);
            state_trajectory.push(state);

            validate_state(&state, macro_index, (macro_index as f64) * stride)?;
        }

        // ====== Step 4: Build Result ======

        let final_state = state;
        let mut result = SimulationResult::new(time_points, state_trajectory, final_state);

        result.add_metadata("solver", "Adams-Bashforth");
        result.add_metadata("order", &s.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        // Each macro step consumes 1 + 2 + ... + s derivative evaluations
        result.add_metadata(
            "function evaluations",
            &(macro_index * s * (s + 1) / 2).to_string(),
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "Adams-Bashforth"
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
    use crate::solver::EulerSolver;

    /// Mock model: constant growth dy/dt = c (per component)
    struct ConstantGrowth {
        growth_rate: f64,
    }

    impl NeuronModel for ConstantGrowth {
        fn evaluate(&self, _state: &MembraneState, _t: f64) -> MembraneState {
            MembraneState::new(
                self.growth_rate,
                self.growth_rate,
                self.growth_rate,
                self.growth_rate,
            )
        }

        fn setup_initial_state(&self) -> MembraneState {
            MembraneState::new(0.0, 0.0, 0.0, 0.0)
        }

        fn name(&self) -> &str {
            "Constant Growth"
        }
    }

    /// Mock model: exponential decay dy/dt = -k * y (per component)
    struct ExponentialDecay {
        decay_rate: f64,
    }

    impl NeuronModel for ExponentialDecay {
        fn evaluate(&self, state: &MembraneState, _t: f64) -> MembraneState {
            *state * (-self.decay_rate)
        }

        fn setup_initial_state(&self) -> MembraneState {
            MembraneState::new(1.0, 1.0, 1.0, 1.0)
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    // ====== Coefficient Tests ======

    #[test]
    fn test_coefficient_rows_sum_to_one() {
        // Consistency condition of the Adams-Bashforth family
        for order in [
            MultistepOrder::One,
            MultistepOrder::Two,
            MultistepOrder::Three,
            MultistepOrder::Four,
        ] {
            let sum: f64 = order.coefficients().iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "order {:?} coefficients sum to {}",
                order,
                sum
            );
            assert_eq!(order.coefficients().len(), order.steps());
        }
    }

    #[test]
    fn test_from_steps() {
        assert_eq!(MultistepOrder::from_steps(1), Some(MultistepOrder::One));
        assert_eq!(MultistepOrder::from_steps(4), Some(MultistepOrder::Four));
        assert_eq!(MultistepOrder::from_steps(0), None);
        assert_eq!(MultistepOrder::from_steps(5), None);
    }

    // ====== Semantics Tests ======

    #[test]
    fn test_order_one_identical_to_euler() {
        // s = 1 is the degenerate case: trajectories must be
        // numerically identical to Forward Euler, bit for bit.
        let dt = 0.02;
        let total_time = 10.0;

        let ab = AdamsBashforthSolver::new(MultistepOrder::One);
        let scenario_ab = Scenario::new(Box::new(
            HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap(),
        ));
        let result_ab = ab
            .solve(&scenario_ab, &SolverConfiguration::fixed_step(total_time, dt))
            .unwrap();

        let scenario_euler = Scenario::new(Box::new(
            HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap(),
        ));
        let result_euler = EulerSolver::new()
            .solve(&scenario_euler, &SolverConfiguration::fixed_step(total_time, dt))
            .unwrap();

        assert_eq!(result_ab.time_points, result_euler.time_points);
        assert_eq!(result_ab.voltages, result_euler.voltages);
    }

    #[test]
    fn test_macro_step_time_accounting() {
        // s = 3, h = 0.02: each accepted state advances time by 0.06
        let solver = AdamsBashforthSolver::new(MultistepOrder::Three);
        let scenario = Scenario::new(Box::new(ExponentialDecay { decay_rate: 0.1 }));
        let config = SolverConfiguration::fixed_step(1.0, 0.02);

        let result = solver.solve(&scenario, &config).unwrap();

        for (k, &t) in result.time_points.iter().enumerate() {
            assert!((t - k as f64 * 0.06).abs() < 1e-12);
        }

        let final_time = *result.time_points.last().unwrap();
        assert!(final_time >= 1.0 && final_time < 1.0 + 0.06);
    }

    #[test]
    fn test_constant_rhs_is_exact_for_all_orders() {
        // With f constant, every coefficient row collapses to f (rows
        // sum to 1), so each sub-step is exact.
        for order in [
            MultistepOrder::One,
            MultistepOrder::Two,
            MultistepOrder::Three,
            MultistepOrder::Four,
        ] {
            let solver = AdamsBashforthSolver::new(order);
            let scenario = Scenario::new(Box::new(ConstantGrowth { growth_rate: 2.0 }));
            let config = SolverConfiguration::fixed_step(6.0, 0.01);

            let result = solver.solve(&scenario, &config).unwrap();

            let final_time = *result.time_points.last().unwrap();
            assert!(
                (result.final_state.vm() - 2.0 * final_time).abs() < 1e-9,
                "order {:?} not exact on constant RHS",
                order
            );
        }
    }

    #[test]
    fn test_higher_order_more_accurate_on_decay() {
        let decay_rate = 0.5_f64;
        let total_time = 5.0;
        let exact = (-decay_rate * total_time).exp();

        let mut errors = Vec::new();
        for order in [MultistepOrder::One, MultistepOrder::Four] {
            let solver = AdamsBashforthSolver::new(order);
            let scenario = Scenario::new(Box::new(ExponentialDecay { decay_rate }));
            // Same stride for both so the grids line up: h * s constant
            let dt = 0.2 / order.steps() as f64;
            let config = SolverConfiguration::fixed_step(total_time, dt);

            let result = solver.solve(&scenario, &config).unwrap();
            errors.push((result.final_state.vm() - exact).abs());
        }

        assert!(
            errors[1] < errors[0],
            "order 4 error {} not below order 1 error {}",
            errors[1],
            errors[0]
        );
    }

    // ====== Divergence Tests ======

    #[test]
    fn test_divergence_aborts_without_partial_trajectory() {
        // An absurd sodium conductance blows the state up within a few
        // macro steps; the solve must fail, not return NaN samples.
        let config = ChannelConfig {
            gna: 1e12,
            ..ChannelConfig::default()
        };
        let model = HodgkinHuxleyModel::new(config).unwrap();
        let scenario = Scenario::new(Box::new(model));
        let solver = AdamsBashforthSolver::new(MultistepOrder::Three);

        let result = solver.solve(&scenario, &SolverConfiguration::fixed_step(10.0, 0.02));
        assert!(matches!(result, Err(SimulationError::Divergence { .. })));
    }
}
