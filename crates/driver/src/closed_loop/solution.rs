/// Indicates how the closed loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a successful closed-loop run.
///
/// The trajectories themselves stay with the driver; see
/// [`ClosedLoop::trajectories`](super::ClosedLoop::trajectories).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Number of closed-loop steps completed.
    pub steps: usize,
}
