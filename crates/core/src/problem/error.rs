use thiserror::Error;

/// Errors that can occur when validating a [`Problem`](super::Problem).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProblemError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be greater than zero")]
    ZeroDimension(&'static str),

    #[error("tf must be finite and positive, got {0}")]
    HorizonLength(f64),

    #[error("{name} must be {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    Shape {
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{name} must have length {expected}, got {actual}")]
    Length {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name} contains a non-finite value")]
    NonFinite { name: &'static str },

    #[error("control index {index} is out of range for nu = {nu}")]
    ControlIndex { index: usize, nu: usize },

    #[error("control index {0} is bounded more than once")]
    DuplicateControlIndex(usize),

    #[error("bounds for control {index} are inverted: {lower} > {upper}")]
    Bounds { index: usize, lower: f64, upper: f64 },

    #[error("qp_solver_cond_N must be in 1..={n}, got {cond_n}")]
    CondensingHorizon { cond_n: usize, n: usize },
}
