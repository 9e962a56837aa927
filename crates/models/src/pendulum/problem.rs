use std::f64::consts::PI;

use ndarray::{Array1, Array2, array, s};
use recede_core::{
    Dynamics, Problem,
    problem::{
        Cost, HessianApprox, IntegratorType, NlpSolverType, ProblemBuilder, ProblemError,
        QpSolver, SolverOptions, TerminalCost,
    },
};

use super::Pendulum;

/// Maximum force magnitude on the cart (N).
pub const FORCE_MAX: f64 = 80.0;

/// Default number of horizon steps.
pub const HORIZON_STEPS: usize = 20;

/// Horizon length (s).
pub const HORIZON_TIME: f64 = 1.0;

/// Default number of closed-loop steps.
pub const SIM_STEPS: usize = 100;

/// Builds the swing-up problem: start hanging down, drive to upright.
///
/// Stage weights are `W = blkdiag(Q, R)` with `Q = 2 diag(1e3, 1e3, 1e-2, 1e-2)`
/// and `R = 2 diag(1e-2)`; the terminal weight is `Q`. All references are
/// zero and the force is bounded by [`FORCE_MAX`]. The horizon always spans
/// [`HORIZON_TIME`], so more steps means a finer stage grid.
///
/// # Errors
///
/// Returns a [`ProblemError`] if `horizon_steps` is zero.
pub fn problem(horizon_steps: usize) -> Result<Problem, ProblemError> {
    let model = Pendulum::default();
    let nx = Pendulum::NX;
    let nu = Pendulum::NU;
    let ny = nx + nu;

    let q = Array2::from_diag(&array![1e3, 1e3, 1e-2, 1e-2]) * 2.0;
    let r = Array2::from_diag(&array![1e-2]) * 2.0;

    let mut w = Array2::zeros((ny, ny));
    w.slice_mut(s![..nx, ..nx]).assign(&q);
    w.slice_mut(s![nx.., nx..]).assign(&r);

    let mut vx = Array2::zeros((ny, nx));
    vx.slice_mut(s![..nx, ..]).assign(&Array2::eye(nx));

    let mut vu = Array2::zeros((ny, nu));
    vu[[nx, 0]] = 1.0;

    ProblemBuilder::new(model.name(), nx, nu)
        .horizon(horizon_steps, HORIZON_TIME)
        .cost(Cost {
            w,
            vx,
            vu,
            yref: Array1::zeros(ny),
        })
        .terminal_cost(TerminalCost {
            w: q,
            vx: Array2::eye(nx),
            yref: Array1::zeros(nx),
        })
        .control_bounds(vec![0], array![-FORCE_MAX], array![FORCE_MAX])
        .initial_state(array![0.0, PI, 0.0, 0.0])
        .options(SolverOptions {
            qp_solver: QpSolver::PartialCondensingHpipm,
            hessian_approx: HessianApprox::GaussNewton,
            integrator_type: IntegratorType::Erk,
            nlp_solver_type: NlpSolverType::Sqp,
            qp_solver_cond_n: Some(horizon_steps),
        })
        .build()
}
