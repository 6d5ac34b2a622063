//! High-accuracy reference solver
//!
//! Wraps an adaptive-step integration strategy behind the common
//! [`Solver`] interface. The default strategy is a Dormand-Prince 4(5)
//! embedded Runge-Kutta pair with proportional step-size control; its
//! output is sampled onto a dense uniform grid so fixed-step results
//! can be compared against it point by point.
//!
//! Internal step selection is entirely the strategy's business: the
//! solver only chooses the evaluation grid.

use crate::error::SimulationError;
use crate::physics::{MembraneState, NeuronModel};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

/// Default number of grid points for [`ReferenceSolver`]
///
/// Dense enough that linear interpolation between neighboring samples
/// contributes no visible error at plotting resolution.
pub const DEFAULT_REFERENCE_SAMPLES: usize = 100_000;

// =================================================================================================
// Adaptive integration strategy
// =================================================================================================

/// Adaptive-step integration strategy
///
/// Implementations choose their own internal steps and return states at
/// exactly the requested times. `times` is non-empty, finite and
/// non-decreasing, with `times[0]` the initial time.
pub trait AdaptiveIntegrator: Send + Sync {
    /// Integrate the model from `initial` at `times[0]`, returning one
    /// state per requested time
    fn integrate(
        &self,
        model: &dyn NeuronModel,
        initial: MembraneState,
        times: &[f64],
    ) -> Result<Vec<MembraneState>, SimulationError>;

    /// Strategy name for diagnostics
    fn name(&self) -> &str;
}

// =================================================================================================
// Dormand-Prince 4(5)
// =================================================================================================

// Dormand-Prince tableau
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (advancing solution, local extrapolation)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// 4th-order embedded weights
const BE1: f64 = 5179.0 / 57600.0;
const BE3: f64 = 7571.0 / 16695.0;
const BE4: f64 = 393.0 / 640.0;
const BE5: f64 = -92097.0 / 339200.0;
const BE6: f64 = 187.0 / 2100.0;
const BE7: f64 = 1.0 / 40.0;

// Error weights: y5 - y4
const E1: f64 = B1 - BE1;
const E3: f64 = B3 - BE3;
const E4: f64 = B4 - BE4;
const E5: f64 = B5 - BE5;
const E6: f64 = B6 - BE6;
const E7: f64 = -BE7;

/// Dormand-Prince 4(5) embedded pair with adaptive step control
///
/// # Characteristics
///
/// - **Order**: 5th-order advancing solution, 4th-order error estimate
/// - **FSAL**: the 7th stage of an accepted step is reused as the first
///   stage of the next (6 evaluations per accepted step)
/// - **Step control**: `0.9 * err^(-1/5)` growth factor, clamped to
///   [0.2, 5.0]
#[derive(Debug, Clone)]
pub struct DormandPrince45 {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Minimum internal step size
    pub h_min: f64,
    /// Internal step budget
    pub max_steps: usize,
}

impl Default for DormandPrince45 {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-9,
            h_min: 1e-14,
            max_steps: 1_000_000,
        }
    }
}

impl DormandPrince45 {
    /// Create a strategy with explicit tolerances
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(SimulationError::Configuration(
                "rtol must be positive and finite".to_string(),
            ));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(SimulationError::Configuration(
                "atol must be positive and finite".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(SimulationError::Configuration(
                "max_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Scaled RMS error norm over the four state components
    fn error_norm(&self, error: &MembraneState, y: &MembraneState, y_new: &MembraneState) -> f64 {
        let e = error.as_vector();
        let a = y.as_vector();
        let b = y_new.as_vector();

        let mut sum = 0.0;
        for i in 0..4 {
            let scale = self.atol + self.rtol * a[i].abs().max(b[i].abs());
            sum += (e[i] / scale) * (e[i] / scale);
        }
        (sum / 4.0).sqrt()
    }

    /// Integrate over `[t0, t1]`, recording every accepted step
    fn integrate_dense(
        &self,
        model: &dyn NeuronModel,
        initial: MembraneState,
        t0: f64,
        t1: f64,
    ) -> Result<(Vec<f64>, Vec<MembraneState>), SimulationError> {
        let span = t1 - t0;

        let mut accepted_times = vec![t0];
        let mut accepted_states = vec![initial];

        let mut t = t0;
        let mut y = initial;
        let mut h = (span * 1e-3).max(self.h_min).min(span);

        // FSAL slope carried across accepted steps
        let mut k1 = model.evaluate(&y, t);
        let mut accepted: usize = 0;

        for _ in 0..self.max_steps {
            if t >= t1 {
                break;
            }
            h = h.min(t1 - t).max(self.h_min);

            let k2 = model.evaluate(&(y + k1 * (h * A21)), t + h / 5.0);
            let k3 = model.evaluate(&(y + (k1 * A31 + k2 * A32) * h), t + 3.0 * h / 10.0);
            let k4 = model.evaluate(
                &(y + (k1 * A41 + k2 * A42 + k3 * A43) * h),
                t + 4.0 * h / 5.0,
            );
            let k5 = model.evaluate(
                &(y + (k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54) * h),
                t + 8.0 * h / 9.0,
            );
            let k6 = model.evaluate(
                &(y + (k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65) * h),
                t + h,
            );

            // 5th-order candidate
            let y_new = y + (k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6) * h;

            if !y_new.is_finite() {
                return Err(SimulationError::Divergence {
                    step: accepted + 1,
                    time: t + h,
                });
            }

            // FSAL stage
            let k7 = model.evaluate(&y_new, t + h);

            let error = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * h;
            let err_norm = self.error_norm(&error, &y, &y_new);

            if err_norm <= 1.0 {
                t += h;
                y = y_new;
                k1 = k7;
                accepted += 1;

                accepted_times.push(t);
                accepted_states.push(y);

                if t >= t1 {
                    break;
                }
            }

            let factor = if err_norm == 0.0 {
                5.0
            } else {
                (0.9 * err_norm.powf(-0.2)).clamp(0.2, 5.0)
            };
            h = (h * factor).max(self.h_min);
        }

        if t < t1 - self.h_min {
            return Err(SimulationError::Configuration(format!(
                "adaptive integration exhausted {} internal steps at t = {:.6e}",
                self.max_steps, t
            )));
        }

        Ok((accepted_times, accepted_states))
    }
}

impl AdaptiveIntegrator for DormandPrince45 {
    fn integrate(
        &self,
        model: &dyn NeuronModel,
        initial: MembraneState,
        times: &[f64],
    ) -> Result<Vec<MembraneState>, SimulationError> {
        self.validate()?;

        if times.is_empty() {
            return Ok(Vec::new());
        }

        let t0 = times[0];
        let t1 = *times.last().unwrap_or(&t0);
        if t1 <= t0 {
            return Ok(vec![initial; times.len()]);
        }

        let (dense_times, dense_states) = self.integrate_dense(model, initial, t0, t1)?;

        // Linear interpolation between neighboring accepted steps
        let mut states = Vec::with_capacity(times.len());
        let mut idx = 0;
        for &tq in times {
            while idx + 1 < dense_times.len() && dense_times[idx + 1] < tq {
                idx += 1;
            }
            if idx + 1 >= dense_times.len() {
                states.push(dense_states[dense_states.len() - 1]);
                continue;
            }

            let ta = dense_times[idx];
            let tb = dense_times[idx + 1];
            let frac = if (tb - ta).abs() < 1e-30 {
                0.0
            } else {
                (tq - ta) / (tb - ta)
            };

            let ya = dense_states[idx];
            let yb = dense_states[idx + 1];
            states.push(ya + (yb - ya) * frac);
        }

        Ok(states)
    }

    fn name(&self) -> &str {
        "Dormand-Prince 4(5)"
    }
}

// =================================================================================================
// Reference solver
// =================================================================================================

/// Reference solver delegating step control to an injected strategy
///
/// # Example
///
/// ```rust
/// use hh_rs::models::HodgkinHuxleyModel;
/// use hh_rs::physics::ChannelConfig;
/// use hh_rs::solver::{ReferenceSolver, Scenario, Solver, SolverConfiguration};
///
/// let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
/// let scenario = Scenario::new(Box::new(model));
/// let config = SolverConfiguration::sampled(25.0, 1000);
///
/// let result = ReferenceSolver::default().solve(&scenario, &config).unwrap();
/// assert_eq!(result.time_points.len(), 1000);
/// ```
pub struct ReferenceSolver {
    integrator: Box<dyn AdaptiveIntegrator>,
}

impl ReferenceSolver {
    /// Create a reference solver around a custom strategy
    pub fn new(integrator: Box<dyn AdaptiveIntegrator>) -> Self {
        Self { integrator }
    }

    /// The injected strategy's name
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }
}

impl Default for ReferenceSolver {
    fn default() -> Self {
        Self::new(Box::new(DormandPrince45::default()))
    }
}

impl Solver for ReferenceSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, SimulationError> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (total_time, samples) = match &config.solver_type {
            SolverType::Sampled {
                total_time,
                samples,
            } => (*total_time, *samples),
            other => {
                return Err(SimulationError::Unsupported(format!(
                    "ReferenceSolver only supports Sampled configuration, got {}",
                    other.name()
                )));
            }
        };

        log::debug!(
            "Reference ({}): model = {}, total_time = {}, samples = {}",
            self.integrator.name(),
            scenario.model_name(),
            total_time,
            samples
        );

        // ====== Step 2: Sample Grid ======

        // Uniform grid including both endpoints
        let denominator = (samples - 1) as f64;
        let time_points: Vec<f64> = (0..samples)
            .map(|k| total_time * k as f64 / denominator)
            .collect();

        // ====== Step 3: Delegated Integration ======

        let state_trajectory =
            self.integrator
                .integrate(scenario.model.as_ref(), scenario.initial_state(), &time_points)?;

        // ====== Step 4: Build Result ======

        let final_state = state_trajectory[state_trajectory.len() - 1];
        let mut result = SimulationResult::new(time_points, state_trajectory, final_state);

        result.add_metadata("solver", "Reference");
        result.add_metadata("integrator", self.integrator.name());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("samples", &samples.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Reference"
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

    #[test]
    fn test_dp45_exponential_decay_near_machine_precision() {
        let model = ExponentialDecay { decay_rate: 1.3 };
        let times: Vec<f64> = (0..=100).map(|k| k as f64 * 0.01).collect();

        let strategy = DormandPrince45::default();
        let states = strategy
            .integrate(&model, model.setup_initial_state(), &times)
            .unwrap();

        assert_eq!(states.len(), times.len());
        let expected = (-1.3_f64).exp();
        let error = (states[100].vm() - expected).abs();
        assert!(error < 1e-6, "DP45 error {} too large", error);
    }

    #[test]
    fn test_dp45_rejects_bad_tolerances() {
        let model = ExponentialDecay { decay_rate: 1.0 };
        let strategy = DormandPrince45::new(-1.0, 1e-9);
        let result = strategy.integrate(&model, model.setup_initial_state(), &[0.0, 1.0]);
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_reference_grid_has_exact_sample_count() {
        let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
        let scenario = Scenario::new(Box::new(model));
        let config = SolverConfiguration::sampled(25.0, 2501);

        let result = ReferenceSolver::default().solve(&scenario, &config).unwrap();

        assert_eq!(result.time_points.len(), 2501);
        assert_eq!(result.voltages.len(), 2501);
        assert_eq!(result.time_points[0], 0.0);
        let last = *result.time_points.last().unwrap();
        assert!((last - 25.0).abs() < 1e-12);

        // Uniform spacing
        let spacing = result.time_points[1] - result.time_points[0];
        for window in result.time_points.windows(2) {
            assert!((window[1] - window[0] - spacing).abs() < 1e-9);
        }
    }

    #[test]
    fn test_reference_rejects_fixed_step_configuration() {
        let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
        let scenario = Scenario::new(Box::new(model));
        let config = SolverConfiguration::fixed_step(25.0, 0.01);

        assert!(matches!(
            ReferenceSolver::default().solve(&scenario, &config),
            Err(SimulationError::Unsupported(_))
        ));
    }

    #[test]
    fn test_reference_action_potential_shape() {
        // Default stimulus produces at least one spike: displayed
        // voltage rises well above rest and returns near it.
        let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
        let scenario = Scenario::new(Box::new(model));
        let config = SolverConfiguration::sampled(25.0, 5000);

        let result = ReferenceSolver::default().solve(&scenario, &config).unwrap();

        let peak = result.voltages.iter().cloned().fold(f64::MIN, f64::max);
        assert!(peak > 0.0, "expected an action potential, peak = {}", peak);
        assert!(result.voltages[0] > -75.0 && result.voltages[0] < -65.0);
    }

    #[test]
    fn test_reference_metadata_names_strategy() {
        let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
        let scenario = Scenario::new(Box::new(model));
        let config = SolverConfiguration::sampled(5.0, 100);

        let result = ReferenceSolver::default().solve(&scenario, &config).unwrap();
        assert_eq!(
            result.metadata.get("integrator"),
            Some(&"Dormand-Prince 4(5)".to_string())
        );
    }
}
