//! Membrane physics
//!
//! This module provides the physical side of the simulation:
//!
//! - **Rate functions** ([`rates`]): the six voltage-dependent
//!   opening/closing rates of the channel gates, with analytic handling
//!   of their removable singularities
//! - **State vector** ([`MembraneState`]): the four-component
//!   (vm, n, m, h) state with arithmetic operators for solver updates
//! - **Configuration** ([`ChannelConfig`]): conductances, reversal
//!   potentials, stimulus current and capacitance
//! - **Model trait** ([`NeuronModel`]): the seam the solvers integrate
//!   against
//!
//! # Architecture
//!
//! The physics is separate from the numerical solvers:
//! - a model provides the **equations** (the right-hand side),
//! - a solver provides the **method** to integrate them.
//!
//! The same model runs under Euler, RK4, Adams-Bashforth or the
//! reference adaptive integrator without modification.

pub mod config;
pub mod rates;
pub mod state;
pub mod traits;

// Re-export commonly used types for convenience
pub use config::ChannelConfig;
pub use state::MembraneState;
pub use traits::NeuronModel;
