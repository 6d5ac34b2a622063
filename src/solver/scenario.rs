//! Simulation scenario definition
//!
//! A scenario combines a membrane model with its starting state.

use crate::error::SimulationError;
use crate::physics::{MembraneState, NeuronModel};

/// Simulation scenario (WHAT to solve)
///
/// Defines a specific case to simulate: the model providing the
/// equations, plus an optional override of the model's own initial
/// state.
///
/// # Design
///
/// The same scenario can be solved with different numerical methods;
/// this is the "WHAT to solve", not the "HOW".
pub struct Scenario {
    /// Membrane model (equations)
    pub model: Box<dyn NeuronModel>,

    /// Explicit initial state; `None` uses the model's own
    initial: Option<MembraneState>,
}

impl Scenario {
    /// Create a scenario starting from the model's initial state
    pub fn new(model: Box<dyn NeuronModel>) -> Self {
        Self {
            model,
            initial: None,
        }
    }

    /// Create a scenario with an explicit initial state
    pub fn with_initial_state(model: Box<dyn NeuronModel>, initial: MembraneState) -> Self {
        Self {
            model,
            initial: Some(initial),
        }
    }

    /// The state integration starts from
    pub fn initial_state(&self) -> MembraneState {
        self.initial
            .unwrap_or_else(|| self.model.setup_initial_state())
    }

    /// Verify the scenario is solvable
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.initial_state().is_finite() {
            return Err(SimulationError::Configuration(
                "initial state has a non-finite component".to_string(),
            ));
        }
        Ok(())
    }

    /// Get model name
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("model", &self.model_name())
            .field("dim", &self.model.dim())
            .field("initial", &self.initial_state())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
