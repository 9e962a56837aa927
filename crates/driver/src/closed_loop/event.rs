use ndarray::Array1;

/// Event emitted by the closed-loop driver after each completed step.
///
/// Steps are numbered from zero. The event for step `i` carries rows `i` and
/// `i + 1` of the state trajectory and row `i` of the control trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The step number.
    pub step: usize,

    /// State the optimizer was pinned to.
    pub state: Array1<f64>,

    /// First control of the optimized horizon, as applied to the simulator.
    pub control: Array1<f64>,

    /// State returned by the simulator.
    pub next_state: Array1<f64>,
}
