//! Channel parameter configuration
//!
//! The physical parameters of the Hodgkin-Huxley membrane: external
//! stimulus current, maximal channel conductances, reversal potentials
//! and membrane capacitance.
//!
//! # Ownership model
//!
//! A configuration is replaced wholesale between solve calls (no partial
//! merge) and is read-only during a single solve invocation: the model
//! owns its configuration immutably, so there is no shared mutable state
//! between the caller and an in-flight solve.
//!
//! # Validation
//!
//! `cm` divides the voltage derivative, so `cm == 0` is rejected as a
//! [`SimulationError::Configuration`] before any integration step. All
//! parameters must be finite.

use std::collections::HashMap;

use crate::error::SimulationError;

/// Parameter names required by [`ChannelConfig::from_map`]
const REQUIRED_KEYS: [&str; 8] = ["i", "gk", "gna", "gl", "vk", "vna", "vl", "cm"];

/// Hodgkin-Huxley membrane parameters
///
/// # Defaults
///
/// The defaults are the classical squid-axon values used by the model
/// (voltages relative to rest = 0):
///
/// | Parameter | Value | Meaning                           |
/// |-----------|-------|-----------------------------------|
/// | `i`       | 6.2   | External stimulus current         |
/// | `gk`      | 36    | Maximal potassium conductance     |
/// | `gna`     | 120   | Maximal sodium conductance        |
/// | `gl`      | 0.3   | Leak conductance                  |
/// | `vk`      | -12   | Potassium reversal potential      |
/// | `vna`     | 115   | Sodium reversal potential         |
/// | `vl`      | 10.6  | Leak reversal potential           |
/// | `cm`      | 1     | Membrane capacitance              |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    /// External stimulus current
    pub i: f64,
    /// Maximal potassium conductance
    pub gk: f64,
    /// Maximal sodium conductance
    pub gna: f64,
    /// Leak conductance
    pub gl: f64,
    /// Potassium reversal potential
    pub vk: f64,
    /// Sodium reversal potential
    pub vna: f64,
    /// Leak reversal potential
    pub vl: f64,
    /// Membrane capacitance (must be nonzero)
    pub cm: f64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            i: 6.2,
            gk: 36.0,
            gna: 120.0,
            gl: 0.3,
            vk: -12.0,
            vna: 115.0,
            vl: 10.6,
            cm: 1.0,
        }
    }
}

impl ChannelConfig {
    /// Build a configuration wholesale from a name → value mapping
    ///
    /// This is the inbound `setConfiguration` interface: every one of the
    /// eight parameters must be present. Absent keys are a caller error
    /// and are signaled, never silently defaulted.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Configuration`] when a key is missing or the
    /// resulting configuration fails [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use hh_rs::physics::ChannelConfig;
    ///
    /// let map: HashMap<String, f64> = [
    ///     ("i", 6.2), ("gk", 36.0), ("gna", 120.0), ("gl", 0.3),
    ///     ("vk", -12.0), ("vna", 115.0), ("vl", 10.6), ("cm", 1.0),
    /// ]
    /// .into_iter()
    /// .map(|(k, v)| (k.to_string(), v))
    /// .collect();
    ///
    /// let config = ChannelConfig::from_map(&map).unwrap();
    /// assert_eq!(config.gna, 120.0);
    /// ```
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, SimulationError> {
        let get = |key: &str| -> Result<f64, SimulationError> {
            map.get(key).copied().ok_or_else(|| {
                SimulationError::Configuration(format!("missing required parameter '{}'", key))
            })
        };

        let config = Self {
            i: get("i")?,
            gk: get("gk")?,
            gna: get("gna")?,
            gl: get("gl")?,
            vk: get("vk")?,
            vna: get("vna")?,
            vl: get("vl")?,
            cm: get("cm")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is structurally valid
    ///
    /// # Errors
    ///
    /// [`SimulationError::Configuration`] when `cm == 0` or any
    /// parameter is non-finite.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.cm == 0.0 {
            return Err(SimulationError::Configuration(
                "cm must be nonzero (it divides the voltage derivative)".to_string(),
            ));
        }

        for (name, value) in [
            ("i", self.i),
            ("gk", self.gk),
            ("gna", self.gna),
            ("gl", self.gl),
            ("vk", self.vk),
            ("vna", self.vna),
            ("vl", self.vl),
            ("cm", self.cm),
        ] {
            if !value.is_finite() {
                return Err(SimulationError::Configuration(format!(
                    "parameter '{}' is not finite: {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Names of the parameters [`from_map`](Self::from_map) requires
    pub fn required_keys() -> &'static [&'static str] {
        &REQUIRED_KEYS
    }
}
