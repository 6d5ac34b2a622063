//! Hodgkin-Huxley membrane model
//!
//! # Mathematical Background
//!
//! The model couples the membrane voltage to three channel gates through
//! four ODEs:
//!
//! ```text
//! dVm/dt = (I - gk*n^4*(Vm - Vk) - gna*m^3*h*(Vm - Vna) - gl*(Vm - Vl)) / Cm
//! dn/dt  = alpha_n(Vm)*(1 - n) - beta_n(Vm)*n
//! dm/dt  = alpha_m(Vm)*(1 - m) - beta_m(Vm)*m
//! dh/dt  = alpha_h(Vm)*(1 - h) - beta_h(Vm)*h
//! ```
//!
//! Voltages follow the model-internal convention (rest = 0); the display
//! shift to absolute voltage is applied by the solvers, once, after
//! integration.
//!
//! # Configuration ownership
//!
//! The model owns its [`ChannelConfig`] immutably. Replacing parameters
//! means constructing a new model; an in-flight solve can never observe
//! a configuration change.

use crate::error::SimulationError;
use crate::physics::rates;
use crate::physics::{ChannelConfig, MembraneState, NeuronModel};

/// Hodgkin-Huxley neuron membrane model
///
/// # Example
///
/// ```rust
/// use hh_rs::models::HodgkinHuxleyModel;
/// use hh_rs::physics::{ChannelConfig, NeuronModel};
///
/// let model = HodgkinHuxleyModel::new(ChannelConfig::default()).unwrap();
///
/// let initial = model.setup_initial_state();
/// assert_eq!(initial.vm(), 0.0);
///
/// let slope = model.evaluate(&initial, 0.0);
/// assert!(slope.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct HodgkinHuxleyModel {
    config: ChannelConfig,
    v0: f64,
}

impl HodgkinHuxleyModel {
    /// Create a model resting at `vm = 0`
    ///
    /// # Errors
    ///
    /// [`SimulationError::Configuration`] when the configuration is
    /// structurally invalid (`cm == 0` or non-finite parameters). The
    /// check runs here so no integration step ever executes against a
    /// bad configuration.
    pub fn new(config: ChannelConfig) -> Result<Self, SimulationError> {
        Self::with_resting_voltage(config, 0.0)
    }

    /// Create a model with an explicit resting voltage
    ///
    /// The initial gating variables are the steady-state solutions at
    /// `v0`.
    pub fn with_resting_voltage(config: ChannelConfig, v0: f64) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config, v0 })
    }

    /// The configuration this model integrates against
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }
}

impl NeuronModel for HodgkinHuxleyModel {
    fn evaluate(&self, state: &MembraneState, _t: f64) -> MembraneState {
        let c = &self.config;
        let (vm, n, m, h) = (state.vm(), state.n(), state.m(), state.h());

        // Ionic currents
        let i_k = c.gk * n.powi(4) * (vm - c.vk);
        let i_na = c.gna * m.powi(3) * h * (vm - c.vna);
        let i_leak = c.gl * (vm - c.vl);

        MembraneState::new(
            (c.i - i_k - i_na - i_leak) / c.cm,
            rates::alpha_n(vm) * (1.0 - n) - rates::beta_n(vm) * n,
            rates::alpha_m(vm) * (1.0 - m) - rates::beta_m(vm) * m,
            rates::alpha_h(vm) * (1.0 - h) - rates::beta_h(vm) * h,
        )
    }

    fn setup_initial_state(&self) -> MembraneState {
        let v0 = self.v0;
        MembraneState::new(
            v0,
            rates::steady_state(rates::alpha_n(v0), rates::beta_n(v0)),
            rates::steady_state(rates::alpha_m(v0), rates::beta_m(v0)),
            rates::steady_state(rates::alpha_h(v0), rates::beta_h(v0)),
        )
    }

    fn name(&self) -> &str {
        "Hodgkin-Huxley"
    }

    fn description(&self) -> Option<&str> {
        Some("Four-variable squid-axon membrane model (voltage + n, m, h gates)")
    }
}
