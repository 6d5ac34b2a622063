//! Neuron model trait
//!
//! This module defines the seam between the physics and the numerics:
//! - `NeuronModel`: trait for membrane models (the right-hand side)
//!
//! The model provides the "physics" (the derivative equations), the
//! solvers provide the "numerics" (the method used to integrate them).
//! This separation allows the same model to be driven by different
//! integrators, and integrators to be tested against mock models with
//! known analytic solutions.

use crate::physics::state::MembraneState;

/// Trait for membrane models
///
/// # Responsibility
///
/// Computes the instantaneous derivative of the state vector at a given
/// state. Does NOT integrate it (that is the solver's job).
///
/// # Purity
///
/// `evaluate` must be a pure function: same inputs always produce the
/// same output, no side effects. The `t` argument exists as a hook for a
/// time-varying stimulus; no shipped model or solver uses it, but the
/// signature keeps the seam open.
pub trait NeuronModel: Send + Sync {
    /// Number of state components
    ///
    /// Four for the Hodgkin-Huxley system; mock models keep the same
    /// shape.
    fn dim(&self) -> usize {
        4
    }

    /// Evaluate the right-hand side f(y, t) of dy/dt = f(y, t)
    ///
    /// # Arguments
    ///
    /// * `state` - Current membrane state
    /// * `t` - Simulation time (unused stimulus hook)
    ///
    /// # Returns
    ///
    /// The derivative vector (dvm/dt, dn/dt, dm/dt, dh/dt).
    fn evaluate(&self, state: &MembraneState, t: f64) -> MembraneState;

    /// Create the initial state for this model
    ///
    /// For gating models this solves each gate's steady-state equation
    /// at the resting voltage.
    fn setup_initial_state(&self) -> MembraneState;

    /// Name of the model (used for display and logging)
    fn name(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}
