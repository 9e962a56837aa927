use ndarray::Array1;

use super::{
    Constraints, Cost, Dims, Problem, ProblemError, SolverOptions, TerminalCost, validate,
};

/// Builds a validated [`Problem`].
///
/// Cost, terminal cost, horizon, and initial state are required. Control
/// bounds default to none, and solver options default to
/// [`SolverOptions::default`].
///
/// # Example
///
/// ```
/// use ndarray::{Array1, Array2, array};
/// use recede_core::problem::{Cost, ProblemBuilder, TerminalCost};
///
/// let problem = ProblemBuilder::new("integrator", 1, 1)
///     .horizon(10, 1.0)
///     .cost(Cost {
///         w: Array2::eye(2),
///         vx: array![[1.0], [0.0]],
///         vu: array![[0.0], [1.0]],
///         yref: Array1::zeros(2),
///     })
///     .terminal_cost(TerminalCost {
///         w: Array2::eye(1),
///         vx: Array2::eye(1),
///         yref: Array1::zeros(1),
///     })
///     .control_bounds(vec![0], array![-1.0], array![1.0])
///     .initial_state(array![2.0])
///     .build()
///     .expect("valid problem");
///
/// assert_eq!(problem.ny(), 2);
/// assert_eq!(problem.dt(), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    name: String,
    nx: usize,
    nu: usize,
    horizon: Option<(usize, f64)>,
    cost: Option<Cost>,
    cost_e: Option<TerminalCost>,
    idxbu: Vec<usize>,
    lbu: Array1<f64>,
    ubu: Array1<f64>,
    x0: Option<Array1<f64>>,
    options: SolverOptions,
}

impl ProblemBuilder {
    /// Starts a problem for model `name` with `nx` states and `nu` controls.
    #[must_use]
    pub fn new(name: impl Into<String>, nx: usize, nu: usize) -> Self {
        Self {
            name: name.into(),
            nx,
            nu,
            horizon: None,
            cost: None,
            cost_e: None,
            idxbu: Vec::new(),
            lbu: Array1::zeros(0),
            ubu: Array1::zeros(0),
            x0: None,
            options: SolverOptions::default(),
        }
    }

    /// Sets the number of horizon steps and the horizon length in time.
    #[must_use]
    pub fn horizon(mut self, steps: usize, tf: f64) -> Self {
        self.horizon = Some((steps, tf));
        self
    }

    /// Sets the stage cost.
    #[must_use]
    pub fn cost(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Sets the terminal cost.
    #[must_use]
    pub fn terminal_cost(mut self, cost: TerminalCost) -> Self {
        self.cost_e = Some(cost);
        self
    }

    /// Bounds the controls listed in `idxbu` by `lbu` and `ubu`.
    #[must_use]
    pub fn control_bounds(
        mut self,
        idxbu: Vec<usize>,
        lbu: Array1<f64>,
        ubu: Array1<f64>,
    ) -> Self {
        self.idxbu = idxbu;
        self.lbu = lbu;
        self.ubu = ubu;
        self
    }

    /// Sets the initial state.
    #[must_use]
    pub fn initial_state(mut self, x0: Array1<f64>) -> Self {
        self.x0 = Some(x0);
        self
    }

    /// Sets the solver options.
    #[must_use]
    pub fn options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates and builds the problem.
    ///
    /// # Errors
    ///
    /// Returns a [`ProblemError`] if a required part is missing or any
    /// dimension, shape, or bound is inconsistent.
    pub fn build(self) -> Result<Problem, ProblemError> {
        let (n, tf) = self.horizon.ok_or(ProblemError::Missing("horizon"))?;
        let cost = self.cost.ok_or(ProblemError::Missing("cost"))?;
        let cost_e = self.cost_e.ok_or(ProblemError::Missing("terminal cost"))?;
        let x0 = self.x0.ok_or(ProblemError::Missing("initial state"))?;

        let problem = Problem {
            name: self.name,
            dims: Dims {
                nx: self.nx,
                nu: self.nu,
                n,
            },
            tf,
            cost,
            cost_e,
            constraints: Constraints {
                idxbu: self.idxbu,
                lbu: self.lbu,
                ubu: self.ubu,
                x0,
            },
            options: self.options,
        };

        validate::problem(&problem)?;
        Ok(problem)
    }
}
