use ndarray::Array1;
use recede_core::Observer;
use tracing::info;

use crate::traits::{CanStopEarly, HasState, HasStep};

/// Stops a run once the state has settled near a target.
///
/// The state is settled when every component is within `tolerance` of the
/// target. After `consecutive` settled steps in a row the observer returns
/// the stop-early action; any unsettled step resets the count.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    target: Array1<f64>,
    tolerance: f64,
    consecutive: usize,
    count: usize,
}

impl Settled {
    /// Creates a settle detector for `target`.
    ///
    /// A `consecutive` of zero is treated as one.
    #[must_use]
    pub fn new(target: Array1<f64>, tolerance: f64, consecutive: usize) -> Self {
        Self {
            target,
            tolerance,
            consecutive: consecutive.max(1),
            count: 0,
        }
    }

    /// Returns how many consecutive settled steps have been seen.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    fn is_settled<E: HasState>(&self, event: &E) -> bool {
        let state = event.state();
        state.len() == self.target.len()
            && state
                .iter()
                .zip(&self.target)
                .all(|(x, target)| (x - target).abs() <= self.tolerance)
    }
}

impl<E: HasStep + HasState, A: CanStopEarly> Observer<E, A> for Settled {
    fn observe(&mut self, event: &E) -> Option<A> {
        if !self.is_settled(event) {
            self.count = 0;
            return None;
        }

        self.count += 1;
        if self.count >= self.consecutive {
            info!(step = event.step(), "state settled");
            return Some(A::stop_early());
        }
        None
    }
}
