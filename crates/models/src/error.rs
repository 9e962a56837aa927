use thiserror::Error;

/// Errors that can occur when evaluating a model.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    #[error("state must have length {expected}, got {actual}")]
    StateLength { expected: usize, actual: usize },

    #[error("control must have length {expected}, got {actual}")]
    ControlLength { expected: usize, actual: usize },
}
