use std::error::Error as StdError;

use recede_core::{Field, SolverStatus};

/// Errors that end a closed-loop run.
///
/// Every variant is fatal. The driver never retries and never applies a
/// control from a failed solve.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("optimizer returned status {status} at step {step}")]
    SolverDivergence { step: usize, status: SolverStatus },

    #[error("simulator returned status {status} at step {step}")]
    IntegrationFailure { step: usize, status: SolverStatus },

    #[error("optimizer error at step {step}: {source}")]
    Optimizer {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("simulator error at step {step}: {source}")]
    Simulator {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("`{field}` at step {step} has length {actual}, expected {expected}")]
    Dimension {
        step: usize,
        field: Field,
        expected: usize,
        actual: usize,
    },
}

impl Error {
    /// Returns the step at which the run failed.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::SolverDivergence { step, .. }
            | Self::IntegrationFailure { step, .. }
            | Self::Optimizer { step, .. }
            | Self::Simulator { step, .. }
            | Self::Dimension { step, .. } => *step,
        }
    }

    pub(crate) fn optimizer<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Optimizer {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn simulator<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Simulator {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn dimension(step: usize, field: Field, expected: usize, actual: usize) -> Self {
        Self::Dimension {
            step,
            field,
            expected,
            actual,
        }
    }
}
