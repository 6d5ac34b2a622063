//! Mock membrane models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical solver accuracy.

use hh_rs::physics::{MembraneState, NeuronModel};

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Exponential decay model: dy/dt = -k*y on every component
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
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

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c on every component
///
/// Analytical solution: y(t) = y₀ + c*t. Every explicit method here is
/// exact on this model, so it isolates bookkeeping bugs from
/// discretization error.
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(growth_rate: f64) -> Self {
        Self { growth_rate }
    }
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
