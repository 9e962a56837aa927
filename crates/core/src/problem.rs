//! The immutable description of an optimal control problem.
//!
//! A [`Problem`] is built once with [`ProblemBuilder`], validated, and then
//! handed to a [`Backend`](crate::Backend) to create solver handles. It can
//! be persisted as a JSON artifact with [`Problem::save_json`] and loaded back
//! with [`Problem::load_json`], which validates again.
//!
//! # Layout
//!
//! The cost is linear least squares:
//!
//! ```text
//! stage:    || Vx x + Vu u - yref ||²_W
//! terminal: || Vx_e x - yref_e ||²_W_e
//! ```
//!
//! Controls listed in `idxbu` are bounded by `lbu <= u[idxbu] <= ubu`, and
//! `x0` pins the initial state.

mod artifact;
mod builder;
mod constraints;
mod cost;
mod error;
mod options;
mod validate;

pub use artifact::ArtifactError;
pub use builder::ProblemBuilder;
pub use constraints::Constraints;
pub use cost::{Cost, TerminalCost};
pub use error::ProblemError;
pub use options::{HessianApprox, IntegratorType, NlpSolverType, QpSolver, SolverOptions};

use serde::{Deserialize, Serialize};

/// Problem dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    /// State dimension.
    pub nx: usize,

    /// Control dimension.
    pub nu: usize,

    /// Number of horizon steps.
    pub n: usize,
}

/// A validated optimal control problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Unchecked")]
pub struct Problem {
    name: String,
    dims: Dims,
    tf: f64,
    cost: Cost,
    cost_e: TerminalCost,
    constraints: Constraints,
    options: SolverOptions,
}

/// A deserialized problem that has not been validated yet.
#[derive(Deserialize)]
struct Unchecked {
    name: String,
    dims: Dims,
    tf: f64,
    cost: Cost,
    cost_e: TerminalCost,
    constraints: Constraints,
    options: SolverOptions,
}

impl TryFrom<Unchecked> for Problem {
    type Error = ProblemError;

    fn try_from(raw: Unchecked) -> Result<Self, Self::Error> {
        let problem = Self {
            name: raw.name,
            dims: raw.dims,
            tf: raw.tf,
            cost: raw.cost,
            cost_e: raw.cost_e,
            constraints: raw.constraints,
            options: raw.options,
        };
        validate::problem(&problem)?;
        Ok(problem)
    }
}

impl Problem {
    /// Returns the model name this problem was built for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the problem dimensions.
    #[must_use]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Returns the state dimension.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.dims.nx
    }

    /// Returns the control dimension.
    #[must_use]
    pub fn nu(&self) -> usize {
        self.dims.nu
    }

    /// Returns the number of horizon steps.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.dims.n
    }

    /// Returns the horizon length in time.
    #[must_use]
    pub fn tf(&self) -> f64 {
        self.tf
    }

    /// Returns the time step of one horizon stage, `tf / N`.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.tf / self.dims.n as f64
    }

    /// Returns the stage output dimension.
    #[must_use]
    pub fn ny(&self) -> usize {
        self.cost.w.nrows()
    }

    /// Returns the terminal output dimension.
    #[must_use]
    pub fn ny_e(&self) -> usize {
        self.cost_e.w.nrows()
    }

    /// Returns the stage cost.
    #[must_use]
    pub fn cost(&self) -> &Cost {
        &self.cost
    }

    /// Returns the terminal cost.
    #[must_use]
    pub fn terminal_cost(&self) -> &TerminalCost {
        &self.cost_e
    }

    /// Returns the constraints.
    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Returns the solver options.
    #[must_use]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Returns the partial condensing horizon, defaulting to `N`.
    #[must_use]
    pub fn qp_solver_cond_n(&self) -> usize {
        self.options.qp_solver_cond_n.unwrap_or(self.dims.n)
    }
}
