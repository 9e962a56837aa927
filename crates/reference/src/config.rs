use ndarray::{Array2, array};
use thiserror::Error;

/// Configuration for the reference backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    gains: Array2<f64>,
    substeps: usize,
}

/// Errors that can occur when validating a reference backend config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gain matrix must have at least one row and one column")]
    EmptyGains,

    #[error("gains must be finite")]
    NonFiniteGain,

    #[error("substeps must be at least 1")]
    ZeroSubsteps,
}

impl Default for Config {
    /// Gains that hold the cart-pole upright, with 10 Euler substeps.
    fn default() -> Self {
        Self {
            gains: array![[-2.0, 40.0, -4.0, 8.0]],
            substeps: 10,
        }
    }
}

impl Config {
    /// Creates a new config with a validated `nu × nx` gain matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the gain matrix is empty or has a non-finite entry,
    /// or if `substeps` is zero.
    pub fn new(gains: Array2<f64>, substeps: usize) -> Result<Self, ConfigError> {
        if gains.is_empty() {
            return Err(ConfigError::EmptyGains);
        }
        if gains.iter().any(|k| !k.is_finite()) {
            return Err(ConfigError::NonFiniteGain);
        }
        if substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }

        Ok(Self { gains, substeps })
    }

    /// Returns the feedback gain matrix `K`, one row per control.
    #[must_use]
    pub fn gains(&self) -> &Array2<f64> {
        &self.gains
    }

    /// Returns the number of Euler substeps per step.
    #[must_use]
    pub fn substeps(&self) -> usize {
        self.substeps
    }
}
