//! Membrane state vector
//!
//! The Hodgkin-Huxley state is four real numbers: the membrane voltage
//! `vm` (unbounded, model-internal convention: rest = 0) and the three
//! gating variables `n`, `m`, `h` (conventionally in [0, 1], not
//! enforced).
//!
//! # Design
//!
//! `MembraneState` wraps a `nalgebra::Vector4<f64>` and overloads `Add`
//! and `Mul<f64>` so solver update formulas read like the mathematics:
//!
//! ```text
//! y_{n+1} = y_n + slope * dt
//! ```
//!
//! The type is `Copy`; every integration step produces a fresh state and
//! trajectories are append-only. A state recorded in a trajectory is
//! never mutated afterwards.

use nalgebra::Vector4;

/// Four-component membrane state: (vm, n, m, h)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembraneState(Vector4<f64>);

impl MembraneState {
    /// Create a state from its four components
    pub fn new(vm: f64, n: f64, m: f64, h: f64) -> Self {
        Self(Vector4::new(vm, n, m, h))
    }

    /// Membrane voltage (model-internal convention, rest = 0)
    pub fn vm(&self) -> f64 {
        self.0[0]
    }

    /// Potassium activation gating variable
    pub fn n(&self) -> f64 {
        self.0[1]
    }

    /// Sodium activation gating variable
    pub fn m(&self) -> f64 {
        self.0[2]
    }

    /// Sodium inactivation gating variable
    pub fn h(&self) -> f64 {
        self.0[3]
    }

    /// Underlying component vector
    pub fn as_vector(&self) -> &Vector4<f64> {
        &self.0
    }

    /// True when every component is finite (no NaN, no infinity)
    ///
    /// Solvers use this as the divergence check after each accepted step.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl From<Vector4<f64>> for MembraneState {
    fn from(v: Vector4<f64>) -> Self {
        Self(v)
    }
}

// Operator overloading so that update formulas stay close to the math

impl std::ops::Add for MembraneState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for MembraneState {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul<f64> for MembraneState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self(self.0 * scalar)
    }
}

impl std::ops::Mul<MembraneState> for f64 {
    type Output = MembraneState;

    fn mul(self, rhs: MembraneState) -> Self::Output {
        rhs * self
    }
}

impl std::fmt::Display for MembraneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(vm: {}, n: {}, m: {}, h: {})",
            self.vm(),
            self.n(),
            self.m(),
            self.h()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let state = MembraneState::new(-70.0, 0.3, 0.05, 0.6);
        assert_eq!(state.vm(), -70.0);
        assert_eq!(state.n(), 0.3);
        assert_eq!(state.m(), 0.05);
        assert_eq!(state.h(), 0.6);
    }

    #[test]
    fn test_addition() {
        let a = MembraneState::new(1.0, 2.0, 3.0, 4.0);
        let b = MembraneState::new(0.5, 0.5, 0.5, 0.5);
        let c = a + b;
        assert_eq!(c, MembraneState::new(1.5, 2.5, 3.5, 4.5));
    }

    #[test]
    fn test_scalar_multiplication_commutes() {
        let state = MembraneState::new(1.0, -2.0, 3.0, -4.0);
        assert_eq!(state * 2.0, 2.0 * state);
        assert_eq!((state * 2.0).vm(), 2.0);
        assert_eq!((state * 2.0).h(), -8.0);
    }

    #[test]
    fn test_euler_shaped_update() {
        // y + slope * dt, the form every solver uses
        let y = MembraneState::new(0.0, 0.0, 0.0, 0.0);
        let slope = MembraneState::new(10.0, 1.0, 2.0, 3.0);
        let next = y + slope * 0.1;
        assert!((next.vm() - 1.0).abs() < 1e-12);
        assert!((next.h() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_is_finite() {
        assert!(MembraneState::new(0.0, 0.0, 0.0, 0.0).is_finite());
        assert!(!MembraneState::new(f64::NAN, 0.0, 0.0, 0.0).is_finite());
        assert!(!MembraneState::new(0.0, f64::INFINITY, 0.0, 0.0).is_finite());
        assert!(!MembraneState::new(0.0, 0.0, f64::NEG_INFINITY, 0.0).is_finite());
    }
}
