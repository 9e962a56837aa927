//! Capability traits for reusable observers.
//!
//! These traits abstract over driver event and action types, so observers
//! can be written once and used with any event that exposes what they need.
//!
//! # Event traits
//!
//! - [`HasStep`]: events that carry a step index
//! - [`HasState`]: events that carry the latest state
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use recede_core::Observer;
//! use recede_observers::traits::{CanStopEarly, HasStep};
//!
//! struct StopAfter {
//!     steps: usize,
//! }
//!
//! impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.step() + 1 >= self.steps).then(A::stop_early)
//!     }
//! }
//! ```

use ndarray::ArrayView1;
use recede_driver::closed_loop;

/// An event that carries a step index.
pub trait HasStep {
    /// Returns the zero-based step this event reports on.
    fn step(&self) -> usize;
}

/// An event that carries the latest state.
pub trait HasState {
    /// Returns the most recent state.
    fn state(&self) -> ArrayView1<'_, f64>;

    /// Returns the control that produced the most recent state, if any.
    fn control(&self) -> Option<ArrayView1<'_, f64>> {
        None
    }
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the driver early.
    fn stop_early() -> Self;
}

// --- closed_loop::Event ---

impl HasStep for closed_loop::Event {
    fn step(&self) -> usize {
        self.step
    }
}

impl HasState for closed_loop::Event {
    fn state(&self) -> ArrayView1<'_, f64> {
        self.next_state.view()
    }

    fn control(&self) -> Option<ArrayView1<'_, f64>> {
        Some(self.control.view())
    }
}

// --- closed_loop::Action ---

impl CanStopEarly for closed_loop::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
