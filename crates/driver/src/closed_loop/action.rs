/// Control actions an observer can return to the closed-loop driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current step and return the trajectories so far.
    StopEarly,
}
