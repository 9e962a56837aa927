use ndarray::{Array1, ArrayView1};

use crate::{Field, Problem, SolverStatus};

/// An optimal control problem solver bound to a [`Problem`].
///
/// The handle is stateful: values staged with [`set`](Self::set) persist
/// across solves until overwritten, and [`get`](Self::get) reads quantities
/// from the most recent solve.
pub trait OcpSolver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stages a value for `field` at `stage` ahead of the next solve.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the stage or field is invalid for this
    /// handle, or the value has the wrong length.
    fn set(
        &mut self,
        stage: usize,
        field: Field,
        value: ArrayView1<'_, f64>,
    ) -> Result<(), Self::Error>;

    /// Solves the problem over the horizon.
    ///
    /// A non-zero status means the solve failed.
    fn solve(&mut self) -> SolverStatus;

    /// Reads `field` at `stage` from the most recent solve.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the stage or field cannot be read.
    fn get(&self, stage: usize, field: Field) -> Result<Array1<f64>, Self::Error>;
}

/// A one-step forward simulator bound to a [`Problem`].
///
/// Same shape as [`OcpSolver`] without a stage index.
pub trait SimSolver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stages a value for `field` ahead of the next solve.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the field is invalid for this handle or the
    /// value has the wrong length.
    fn set(&mut self, field: Field, value: ArrayView1<'_, f64>) -> Result<(), Self::Error>;

    /// Simulates one step.
    ///
    /// A non-zero status means the integration failed.
    fn solve(&mut self) -> SolverStatus;

    /// Reads `field` from the most recent solve.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the field cannot be read.
    fn get(&self, field: Field) -> Result<Array1<f64>, Self::Error>;
}

/// Creates solver handles for a [`Problem`].
///
/// Both handles are configured from the same problem, so the simulator
/// advances the state with the same model and step as the optimizer plans
/// with.
pub trait Backend {
    type Ocp: OcpSolver;
    type Sim: SimSolver;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates a trajectory optimizer for `problem`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the backend cannot handle the problem.
    fn create_ocp_solver(&self, problem: &Problem) -> Result<Self::Ocp, Self::Error>;

    /// Creates a forward simulator for `problem`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the backend cannot handle the problem.
    fn create_sim_solver(&self, problem: &Problem) -> Result<Self::Sim, Self::Error>;
}
