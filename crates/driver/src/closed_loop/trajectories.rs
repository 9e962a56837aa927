use ndarray::{Array1, Array2, ArrayView1, Axis, ShapeError};

/// State and control trajectories recorded by a closed-loop run.
///
/// States are stored one per row in an `(steps + 1) × nx` matrix and controls
/// in a `steps × nu` matrix. Row `i + 1` of the states is always the simulator
/// output for row `i` of the states under row `i` of the controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectories {
    states: Array2<f64>,
    controls: Array2<f64>,
}

impl Trajectories {
    /// Creates empty trajectories for `nx` states and `nu` controls.
    #[must_use]
    pub fn new(nx: usize, nu: usize) -> Self {
        Self {
            states: Array2::zeros((0, nx)),
            controls: Array2::zeros((0, nu)),
        }
    }

    /// Returns the state dimension.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.states.ncols()
    }

    /// Returns the control dimension.
    #[must_use]
    pub fn nu(&self) -> usize {
        self.controls.ncols()
    }

    /// Returns all recorded states, one per row.
    #[must_use]
    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    /// Returns all recorded controls, one per row.
    #[must_use]
    pub fn controls(&self) -> &Array2<f64> {
        &self.controls
    }

    /// Returns the state at step `i`.
    ///
    /// # Panics
    ///
    /// Panics if no state was recorded for step `i`.
    #[must_use]
    pub fn state(&self, i: usize) -> ArrayView1<'_, f64> {
        self.states.row(i)
    }

    /// Returns the control applied at step `i`.
    ///
    /// # Panics
    ///
    /// Panics if no control was recorded for step `i`.
    #[must_use]
    pub fn control(&self, i: usize) -> ArrayView1<'_, f64> {
        self.controls.row(i)
    }

    /// Returns the number of recorded states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len_of(Axis(0))
    }

    /// Returns the number of recorded controls.
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.controls.len_of(Axis(0))
    }

    /// Returns the sample time of each recorded state for a step of `dt`.
    ///
    /// The grid is `0, dt, 2 dt, ...` with one entry per state.
    #[must_use]
    pub fn times(&self, dt: f64) -> Array1<f64> {
        (0..self.state_count()).map(|i| i as f64 * dt).collect()
    }

    pub(crate) fn push_state(&mut self, x: ArrayView1<'_, f64>) -> Result<(), ShapeError> {
        self.states.push_row(x)
    }

    pub(crate) fn push_control(&mut self, u: ArrayView1<'_, f64>) -> Result<(), ShapeError> {
        self.controls.push_row(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn rows_accumulate_in_order() {
        let mut trajectories = Trajectories::new(2, 1);
        trajectories.push_state(array![1.0, 2.0].view()).unwrap();
        trajectories.push_control(array![0.5].view()).unwrap();
        trajectories.push_state(array![3.0, 4.0].view()).unwrap();

        assert_eq!(trajectories.state_count(), 2);
        assert_eq!(trajectories.control_count(), 1);
        assert_eq!(trajectories.state(1), array![3.0, 4.0]);
        assert_eq!(trajectories.control(0), array![0.5]);
        assert_eq!(trajectories.states().dim(), (2, 2));
    }

    #[test]
    fn wrong_length_row_is_rejected_without_recording() {
        let mut trajectories = Trajectories::new(2, 1);

        assert!(trajectories.push_state(array![1.0].view()).is_err());
        assert!(trajectories.push_control(array![1.0, 2.0].view()).is_err());
        assert_eq!(trajectories.state_count(), 0);
        assert_eq!(trajectories.control_count(), 0);
    }

    #[test]
    fn times_cover_every_state() {
        let mut trajectories = Trajectories::new(1, 1);
        for x in [0.0, 1.0, 2.0, 3.0] {
            trajectories.push_state(array![x].view()).unwrap();
        }

        let times = trajectories.times(0.05);

        assert_eq!(times.len(), 4);
        assert_relative_eq!(times[0], 0.0);
        assert_relative_eq!(times[3], 0.15, epsilon = 1e-12);
    }
}
