//! hh-rs: Hodgkin-Huxley Membrane Simulation
//!
//! A framework for simulating the membrane potential of a neuron under
//! the Hodgkin-Huxley model, with a family of interchangeable numerical
//! solvers.
//!
//! # Architecture
//!
//! hh-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - The membrane model defines the equations (what to solve)
//!    - Numerical solvers provide the methods (how to solve)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design: any [`physics::NeuronModel`] can be driven
//!      by any [`solver::Solver`]
//!    - A fixed four-component state type ([`physics::MembraneState`])
//!      keeps the arithmetic allocation-free
//!
//! # Quick Start
//!
//! ```rust
//! use hh_rs::models::HodgkinHuxleyModel;
//! use hh_rs::physics::ChannelConfig;
//! use hh_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), hh_rs::SimulationError> {
//! // 1. Configure the membrane model
//! let model = HodgkinHuxleyModel::new(ChannelConfig::default())?;
//! let scenario = Scenario::new(Box::new(model));
//!
//! // 2. Configure the solver
//! let config = SolverConfiguration::fixed_step(
//!     25.0, // total simulation time
//!     0.01, // step size
//! );
//!
//! // 3. Run the simulation
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//!
//! // 4. Access the results
//! let (times, voltages) = result.series();
//! println!("Trajectory length: {}", times.len());
//! assert_eq!(times.len(), voltages.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Membrane state, channel parameters, rate functions
//! - [`models`]: The Hodgkin-Huxley model itself
//! - [`solver`]: Numerical solvers (Euler, RK4, Adams-Bashforth,
//!   adaptive reference)
//! - [`error`]: The crate-wide error type

pub mod error;
pub mod models;
pub mod physics;
pub mod solver;

pub use error::SimulationError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use hh_rs::prelude::*;
    //! ```
    pub use crate::error::SimulationError;
    pub use crate::models::HodgkinHuxleyModel;
    pub use crate::physics::{ChannelConfig, MembraneState, NeuronModel};
    pub use crate::solver::{
        solve, AdamsBashforthSolver, EulerSolver, Method, MultistepOrder, RK4Solver,
        ReferenceSolver, Scenario, SimulationResult, Solver, SolverConfiguration, SolverType,
    };
}
