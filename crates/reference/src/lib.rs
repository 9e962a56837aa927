//! A deterministic reference backend for the closed-loop driver.
//!
//! The backend implements both solver handles without an external library:
//!
//! - [`FeedbackOcp`] rolls a saturated linear feedback policy across the
//!   horizon from the pinned initial state. It is a stand-in for a trajectory
//!   optimizer and does not minimize the problem's cost.
//! - [`EulerSim`] advances a [`Dynamics`] model by one step of `dt = tf / N`
//!   using a fixed number of explicit Euler substeps.
//!
//! [`ReferenceBackend`] creates both handles for a [`Problem`].
//!
//! [`Dynamics`]: recede_core::Dynamics
//! [`Problem`]: recede_core::Problem

mod backend;
mod config;
mod error;
mod euler;
mod feedback;
mod integrate;

pub use backend::ReferenceBackend;
pub use config::{Config, ConfigError};
pub use error::HandleError;
pub use euler::EulerSim;
pub use feedback::FeedbackOcp;
