use serde::{Deserialize, Serialize};

/// QP solver used inside each SQP iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QpSolver {
    #[default]
    PartialCondensingHpipm,
    FullCondensingHpipm,
    FullCondensingQpoases,
}

/// Hessian approximation of the NLP solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HessianApprox {
    #[default]
    GaussNewton,
    Exact,
}

/// Integration scheme for the model dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegratorType {
    /// Explicit Runge-Kutta.
    #[default]
    Erk,
    /// Implicit Runge-Kutta.
    Irk,
}

/// NLP solver variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NlpSolverType {
    /// Full sequential quadratic programming.
    #[default]
    Sqp,
    /// Real-time iteration: one SQP step per solve.
    SqpRti,
}

/// Options forwarded to the solver backend.
///
/// The driver never interprets these; they are configuration for whichever
/// backend creates the handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolverOptions {
    pub qp_solver: QpSolver,
    pub hessian_approx: HessianApprox,
    pub integrator_type: IntegratorType,
    pub nlp_solver_type: NlpSolverType,

    /// Partial condensing horizon; `None` means the full horizon `N`.
    #[serde(default, rename = "qp_solver_cond_N")]
    pub qp_solver_cond_n: Option<usize>,
}
