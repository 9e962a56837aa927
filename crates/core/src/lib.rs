//! Core traits and types for closed-loop receding-horizon control.
//!
//! This crate defines the shared abstractions that the driver, backends, and
//! observers build on:
//!
//! - [`OcpSolver`] and [`SimSolver`]: opaque, stateful solver handles with a
//!   `set`/`solve`/`get` surface
//! - [`Backend`]: a factory that binds both handles to a [`Problem`]
//! - [`Problem`]: the immutable, validated problem description
//! - [`Dynamics`]: a continuous-time model `x' = f(x, u)`
//! - [`Observer`]: receives driver events and optionally returns control actions
//! - [`StepIntegrable`]: types that can be stepped by a derivative

mod dynamics;
mod field;
mod handle;
mod observer;
mod status;
mod step;

pub mod problem;

pub use dynamics::Dynamics;
pub use field::{Field, UnknownField};
pub use handle::{Backend, OcpSolver, SimSolver};
pub use observer::Observer;
pub use problem::Problem;
pub use status::SolverStatus;
pub use step::{DerivativeOf, StepIntegrable};
