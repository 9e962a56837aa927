use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code returned by a solver handle's `solve`.
///
/// Zero means success. Every other code is a failure; the meaning of specific
/// codes belongs to the backend, and [`description`](Self::description) only
/// names the commonly used ones for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolverStatus(i32);

impl SolverStatus {
    pub const SUCCESS: Self = Self(0);
    pub const NAN_DETECTED: Self = Self(1);
    pub const MAX_ITER: Self = Self(2);
    pub const MIN_STEP: Self = Self(3);
    pub const QP_FAILURE: Self = Self(4);
    pub const READY: Self = Self(5);

    /// Wraps a raw status code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Returns the raw status code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Returns `true` if the solve succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns a short description of the status.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self.0 {
            0 => "success",
            1 => "nan detected",
            2 => "maximum number of iterations reached",
            3 => "minimum step size reached",
            4 => "qp solver failed",
            5 => "ready",
            _ => "unknown status",
        }
    }
}

impl From<i32> for SolverStatus {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_is_success() {
        assert!(SolverStatus::SUCCESS.is_success());
        assert!(!SolverStatus::NAN_DETECTED.is_success());
        assert!(!SolverStatus::new(-1).is_success());
    }

    #[test]
    fn display_includes_code_and_description() {
        assert_eq!(SolverStatus::QP_FAILURE.to_string(), "4 (qp solver failed)");
        assert_eq!(SolverStatus::new(42).to_string(), "42 (unknown status)");
    }
}
