//! Closed-loop drivers for receding-horizon control.
//!
//! # Modules
//!
//! - [`closed_loop`]: re-solve the optimal control problem at every step from
//!   the freshly simulated state, and record the resulting trajectories

pub mod closed_loop;
