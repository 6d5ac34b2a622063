//! Numerical method implementations
//!
//! Each method lives in its own module and implements the common
//! [`Solver`](crate::solver::Solver) trait:
//!
//! - [`euler`] — Forward Euler (1st order, 1 evaluation/step)
//! - [`rk4`] — classical Runge-Kutta (4th order, 4 evaluations/step)
//! - [`adams_bashforth`] — explicit multistep family, orders 1-4, with
//!   per-macro-step bootstrap
//! - [`reference`] — adaptive-step reference solution on a dense
//!   uniform sample grid

pub mod adams_bashforth;
pub mod euler;
pub mod reference;
pub mod rk4;

pub use adams_bashforth::{AdamsBashforthSolver, MultistepOrder, DEFAULT_ADAMS_BASHFORTH_STEP};
pub use euler::{EulerSolver, DEFAULT_EULER_STEP};
pub use reference::{
    AdaptiveIntegrator, DormandPrince45, ReferenceSolver, DEFAULT_REFERENCE_SAMPLES,
};
pub use rk4::{RK4Solver, DEFAULT_RK4_STEP};
