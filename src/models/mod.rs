//! Membrane model implementations
//!
//! Concrete implementations of the
//! [`NeuronModel`](crate::physics::NeuronModel) trait.
//!
//! # Available Models
//!
//! - **[`HodgkinHuxleyModel`]**: the four-variable squid-axon membrane
//!   model (voltage plus n, m, h channel gates)

pub mod hodgkin_huxley;

pub use hodgkin_huxley::HodgkinHuxleyModel;
