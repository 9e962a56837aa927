use recede_core::Observer;
use tracing::{debug, info};

use crate::traits::{HasState, HasStep};

/// Logs every observed step through `tracing`.
///
/// Each step is emitted at `debug` level with the latest state and control.
/// When `every` is set, every `every`-th step is also emitted at `info` so a
/// default filter shows progress without per-step noise.
///
/// The observer never acts, so it composes with any action type.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    every: Option<usize>,
    seen: usize,
}

impl TracingObserver {
    /// Creates an observer that logs at `debug` level only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also logs progress at `info` level every `every` steps.
    ///
    /// A value of zero disables progress logging.
    #[must_use]
    pub fn with_progress(mut self, every: usize) -> Self {
        self.every = (every > 0).then_some(every);
        self
    }

    /// Returns the number of events seen so far.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<E: HasStep + HasState, A> Observer<E, A> for TracingObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.seen += 1;

        let step = event.step();
        let state = event.state();
        match event.control() {
            Some(control) => debug!(step, state = %state, control = %control, "step"),
            None => debug!(step, state = %state, "step"),
        }

        if let Some(every) = self.every {
            if (step + 1) % every == 0 {
                info!(steps = step + 1, state = %state, "progress");
            }
        }

        None
    }
}
