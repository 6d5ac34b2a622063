//! Voltage-dependent channel gating rates
//!
//! The Hodgkin-Huxley model describes each gating variable x ∈ {n, m, h}
//! by a first-order kinetic equation:
//!
//! ```text
//! dx/dt = alpha_x(v) * (1 - x) - beta_x(v) * x
//! ```
//!
//! where `alpha_x` is the voltage-dependent opening rate and `beta_x` the
//! closing rate. All six rates are pure scalar functions of the membrane
//! voltage alone (model-internal convention: rest = 0 mV, before the
//! display shift applied to solver output).
//!
//! # Removable singularities
//!
//! `alpha_m` and `alpha_n` are 0/0 forms at v = 25 and v = 10
//! respectively. Both limits exist (L'Hôpital): `alpha_m(25) = 1.0` and
//! `alpha_n(10) = 0.1`. The implementations evaluate the analytic limit
//! at the singular voltage instead of propagating a division by zero.

/// Potassium activation opening rate
///
/// `alpha_n(v) = 0.01 * (10 - v) / (exp((10 - v) / 10) - 1)`
///
/// Removable singularity at v = 10; the limit is 0.1.
pub fn alpha_n(v: f64) -> f64 {
    let u = 10.0 - v;
    if u == 0.0 {
        return 0.1;
    }
    0.01 * u / ((u / 10.0).exp() - 1.0)
}

/// Sodium activation opening rate
///
/// `alpha_m(v) = 0.1 * (25 - v) / (exp((25 - v) / 10) - 1)`
///
/// Removable singularity at v = 25; the limit is 1.0.
pub fn alpha_m(v: f64) -> f64 {
    let u = 25.0 - v;
    if u == 0.0 {
        return 1.0;
    }
    0.1 * u / ((u / 10.0).exp() - 1.0)
}

/// Sodium inactivation opening rate
///
/// `alpha_h(v) = 0.07 * exp(-v / 20)`
pub fn alpha_h(v: f64) -> f64 {
    0.07 * (-v / 20.0).exp()
}

/// Potassium activation closing rate
///
/// `beta_n(v) = 0.125 * exp(-v / 80)`
pub fn beta_n(v: f64) -> f64 {
    0.125 * (-v / 80.0).exp()
}

/// Sodium activation closing rate
///
/// `beta_m(v) = 4 * exp(-v / 18)`
pub fn beta_m(v: f64) -> f64 {
    4.0 * (-v / 18.0).exp()
}

/// Sodium inactivation closing rate
///
/// `beta_h(v) = 1 / (exp((30 - v) / 10) + 1)`
pub fn beta_h(v: f64) -> f64 {
    1.0 / (((30.0 - v) / 10.0).exp() + 1.0)
}

/// Steady-state value of a gating variable
///
/// The unique fixed point of `dx/dt = alpha * (1 - x) - beta * x`:
///
/// ```text
/// x_inf = alpha / (alpha + beta)
/// ```
///
/// Used to construct the initial state from a resting voltage.
pub fn steady_state(alpha: f64, beta: f64) -> f64 {
    alpha / (alpha + beta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_m_singularity_is_analytic_limit() {
        // 0/0 form at v = 25; L'Hôpital gives exactly 1.0
        let value = alpha_m(25.0);
        assert!(!value.is_nan());
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_alpha_n_singularity_is_analytic_limit() {
        // 0/0 form at v = 10; L'Hôpital gives exactly 0.1
        let value = alpha_n(10.0);
        assert!(!value.is_nan());
        assert_eq!(value, 0.1);
    }

    #[test]
    fn test_rates_continuous_through_singularities() {
        // The limit values must match the formula evaluated just off the
        // singular voltage.
        let eps = 1e-7;
        assert!((alpha_m(25.0 + eps) - 1.0).abs() < 1e-6);
        assert!((alpha_m(25.0 - eps) - 1.0).abs() < 1e-6);
        assert!((alpha_n(10.0 + eps) - 0.1).abs() < 1e-6);
        assert!((alpha_n(10.0 - eps) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rates_positive_over_physiological_range() {
        for k in -100..=150 {
            let v = k as f64;
            assert!(alpha_n(v) > 0.0, "alpha_n({}) not positive", v);
            assert!(alpha_m(v) > 0.0, "alpha_m({}) not positive", v);
            assert!(alpha_h(v) > 0.0, "alpha_h({}) not positive", v);
            assert!(beta_n(v) > 0.0, "beta_n({}) not positive", v);
            assert!(beta_m(v) > 0.0, "beta_m({}) not positive", v);
            assert!(beta_h(v) > 0.0, "beta_h({}) not positive", v);
        }
    }

    #[test]
    fn test_steady_state_bounded() {
        // x_inf = alpha / (alpha + beta) lies in (0, 1) for positive rates
        for k in -50..=120 {
            let v = k as f64;
            for (alpha, beta) in [
                (alpha_n(v), beta_n(v)),
                (alpha_m(v), beta_m(v)),
                (alpha_h(v), beta_h(v)),
            ] {
                let x = steady_state(alpha, beta);
                assert!(x > 0.0 && x < 1.0, "steady state {} out of (0,1) at v={}", x, v);
            }
        }
    }

    #[test]
    fn test_rest_voltage_values() {
        // Spot-check the classical resting values at v = 0
        assert!((steady_state(alpha_n(0.0), beta_n(0.0)) - 0.3177).abs() < 1e-3);
        assert!((steady_state(alpha_m(0.0), beta_m(0.0)) - 0.0529).abs() < 1e-3);
        assert!((steady_state(alpha_h(0.0), beta_h(0.0)) - 0.5961).abs() < 1e-3);
    }
}
