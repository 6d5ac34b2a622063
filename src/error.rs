//! Error taxonomy for the simulation core
//!
//! All failures of a `solve` call are synchronous and fall into one of
//! three categories:
//!
//! - [`SimulationError::Configuration`]: a required parameter is missing
//!   or structurally invalid (e.g. `cm == 0`). Detected before any
//!   integration step executes.
//! - [`SimulationError::Divergence`]: a step produced a non-finite state
//!   component. Fatal to the in-progress solve; no partial trajectory is
//!   returned. The caller must retry with different parameters or a
//!   smaller step size.
//! - [`SimulationError::Unsupported`]: a solver was handed a
//!   configuration variant it does not implement (e.g. a fixed-step
//!   solver given a sampled-grid configuration).
//!
//! Nothing is retried internally; presentation-layer fallback behavior
//! is an external concern.

use thiserror::Error;

/// Errors surfaced by the solver suite
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Required parameter missing or structurally invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A step produced a non-finite (NaN or infinite) state component
    ///
    /// `step` counts accepted states (macro steps for multistep methods);
    /// `time` is the simulation time of the offending state.
    #[error(
        "state diverged at step {step} (t = {time}): non-finite component. \
         Try a smaller step size or different parameters."
    )]
    Divergence { step: usize, time: f64 },

    /// Solver/configuration mismatch
    #[error("{0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = SimulationError::Configuration("cm must be nonzero".to_string());
        assert!(err.to_string().contains("cm must be nonzero"));
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    fn test_divergence_display_carries_location() {
        let err = SimulationError::Divergence { step: 42, time: 0.84 };
        let message = err.to_string();
        assert!(message.contains("42"));
        assert!(message.contains("0.84"));
    }
}
