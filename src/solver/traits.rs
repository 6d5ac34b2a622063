//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! This module mirrors the pattern used on the physics side:
//! - Central enum [`SolverType`] defines the kind of time grid a solver
//!   walks
//! - [`SolverConfiguration`] carries a `SolverType` plus factory helpers
//! - [`SimulationResult`] is the uniform output of every solver
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: stable, will not change
//! - `SolverType` enum: extensible (new variants can be added)

use std::collections::HashMap;

use crate::error::SimulationError;
use crate::physics::MembraneState;
use crate::solver::Scenario;

/// Constant subtracted from every voltage sample before return
///
/// Converts the model-internal "voltage relative to rest = 0" convention
/// to the absolute displayed convention. Applied exactly once, after
/// integration, never during RHS evaluation.
pub const REST_DISPLAY_OFFSET: f64 = 70.0;

// =================================================================================================
// Solver Type
// =================================================================================================

/// Kind of time grid a solver produces
///
/// # Extensibility
///
/// New variants can be added without breaking existing solvers; each
/// solver rejects the variants it does not implement with
/// [`SimulationError::Unsupported`].
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {
    /// Fixed-step time marching
    ///
    /// Used by: Euler, RK4, Adams-Bashforth.
    ///
    /// The loop terminates when accumulated time reaches `total_time`;
    /// the final time point may overshoot `total_time` by at most one
    /// (macro) step — there is no interpolation back to the exact end.
    FixedStep {
        /// Total simulation time
        total_time: f64,
        /// Step size h
        step_size: f64,
    },

    /// Uniformly sampled grid with delegated step control
    ///
    /// Used by: the reference adaptive integrator. The solver supplies
    /// `samples` evaluation times uniformly spaced over
    /// `[0, total_time]`; internal step selection belongs to the
    /// adaptive strategy.
    Sampled {
        /// Total simulation time
        total_time: f64,
        /// Number of sample times (including both endpoints)
        samples: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::FixedStep { .. } => "FixedStep",
            SolverType::Sampled { .. } => "Sampled",
        }
    }

    /// Validate that parameters are numerically meaningful
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            SolverType::FixedStep {
                total_time,
                step_size,
            } => {
                if !total_time.is_finite() || *total_time <= 0.0 {
                    return Err(SimulationError::Configuration(
                        "total time must be positive and finite".to_string(),
                    ));
                }
                if !step_size.is_finite() || *step_size <= 0.0 {
                    return Err(SimulationError::Configuration(
                        "step size must be positive and finite".to_string(),
                    ));
                }
                Ok(())
            }
            SolverType::Sampled {
                total_time,
                samples,
            } => {
                if !total_time.is_finite() || *total_time <= 0.0 {
                    return Err(SimulationError::Configuration(
                        "total time must be positive and finite".to_string(),
                    ));
                }
                if *samples < 2 {
                    return Err(SimulationError::Configuration(
                        "sample grid needs at least 2 points".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a numerical solver (HOW to solve)
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Type of solver run and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create a fixed-step configuration
    pub fn fixed_step(total_time: f64, step_size: f64) -> Self {
        Self::new(SolverType::FixedStep {
            total_time,
            step_size,
        })
    }

    /// Create a sampled-grid configuration
    pub fn sampled(total_time: f64, samples: usize) -> Self {
        Self::new(SolverType::Sampled {
            total_time,
            samples,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.solver_type.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Result of a completed solve
///
/// `time_points` and `voltages` are equal-length, index-aligned and
/// strictly increasing in time. `voltages` carries the display shift
/// ([`REST_DISPLAY_OFFSET`] subtracted from every `vm` sample);
/// `state_trajectory` keeps the raw model-internal states.
///
/// A result is produced fresh by each solve call and never mutated by
/// the library after return.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Time of each recorded state, increasing, starting at 0
    pub time_points: Vec<f64>,

    /// Display-shifted membrane voltage at each time point
    pub voltages: Vec<f64>,

    /// Full raw state at each time point (append-only history)
    pub state_trajectory: Vec<MembraneState>,

    /// Last state of the trajectory
    pub final_state: MembraneState,

    /// Diagnostic metadata (solver name, step size, evaluation counts)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Build a result from a trajectory, applying the display shift
    ///
    /// The voltage series is derived here — once, after integration —
    /// by subtracting [`REST_DISPLAY_OFFSET`] from each state's `vm`.
    pub fn new(
        time_points: Vec<f64>,
        state_trajectory: Vec<MembraneState>,
        final_state: MembraneState,
    ) -> Self {
        let voltages = state_trajectory
            .iter()
            .map(|state| state.vm() - REST_DISPLAY_OFFSET)
            .collect();

        Self {
            time_points,
            voltages,
            state_trajectory,
            final_state,
            metadata: HashMap::new(),
        }
    }

    /// Number of recorded time points
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// True when the trajectory holds no points
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// The outbound (times, voltages) pair, index-aligned
    pub fn series(&self) -> (&[f64], &[f64]) {
        (&self.time_points, &self.voltages)
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Trait for numerical solvers
///
/// A solver applies one numerical method to the scenario's model and
/// runs to completion on the calling thread — synchronous, blocking,
/// no suspension or cancellation. A long `total_time` simply blocks the
/// caller. Solvers hold no mutable state, so one instance may serve any
/// number of sequential solve calls.
pub trait Solver {
    /// Integrate the scenario under the given configuration
    ///
    /// # Errors
    ///
    /// - [`SimulationError::Configuration`] for invalid parameters
    /// - [`SimulationError::Unsupported`] for a configuration variant
    ///   this solver does not implement
    /// - [`SimulationError::Divergence`] when a step produces a
    ///   non-finite state component (no partial trajectory is returned)
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, SimulationError>;

    /// Human-readable method name
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
