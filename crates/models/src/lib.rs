//! Dynamics models and ready-made problems.
//!
//! - [`pendulum`]: an inverted pendulum on a cart, with the swing-up
//!   problem used by the CLI and the tests

mod error;

pub mod pendulum;

pub use error::ModelError;
pub use pendulum::Pendulum;
