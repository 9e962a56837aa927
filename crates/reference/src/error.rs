use recede_core::Field;
use thiserror::Error;

/// Errors raised by the reference handles and backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandleError {
    #[error("field `{field}` is not supported by the {handle}")]
    Field { handle: &'static str, field: Field },

    #[error("stage {stage} is out of range for `{field}` (last valid stage is {last})")]
    Stage {
        field: Field,
        stage: usize,
        last: usize,
    },

    #[error("`{field}` has length {actual}, expected {expected}")]
    Length {
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("no solution available, solve has not succeeded")]
    NotSolved,

    #[error("gain matrix is {}x{}, expected {}x{} (nu x nx)", .actual.0, .actual.1, .expected.0, .expected.1)]
    GainShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error(
        "model `{model}` has nx = {model_nx} and nu = {model_nu}, but the problem has nx = {nx} and nu = {nu}"
    )]
    ModelDimension {
        model: String,
        model_nx: usize,
        model_nu: usize,
        nx: usize,
        nu: usize,
    },
}

impl HandleError {
    pub(crate) fn check_length(
        field: Field,
        expected: usize,
        actual: usize,
    ) -> Result<(), HandleError> {
        if expected == actual {
            Ok(())
        } else {
            Err(HandleError::Length {
                field,
                expected,
                actual,
            })
        }
    }
}
