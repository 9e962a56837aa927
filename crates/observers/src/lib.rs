//! Reusable observers for the recede closed-loop driver.
//!
//! This crate provides [`Observer`] implementations and the capability traits
//! they are written against.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for reusable observers
//!   ([`HasStep`], [`HasState`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`TracingObserver`]: logs each step through `tracing`
//! - [`Settled`]: stops a run once the state stays near a target
//!
//! [`Observer`]: recede_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`HasState`]: traits::HasState
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod logger;
mod settled;

pub use logger::TracingObserver;
pub use settled::Settled;
