use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::Problem;

/// Errors that can occur when saving or loading a problem artifact.
///
/// Validation failures while loading surface as [`ArtifactError::Json`], with
/// the validation message included.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid problem artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bound on control {index} is {value}, which JSON cannot represent")]
    NonFiniteBound { index: usize, value: f64 },
}

impl ArtifactError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Problem {
    /// Writes the problem as pretty-printed JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ArtifactError`] if a control bound is infinite or the
    /// file cannot be written. Nothing is written when a bound is infinite.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        self.check_finite_bounds()?;

        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ArtifactError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| ArtifactError::io(path, e))?;
        Ok(())
    }

    /// Loads and validates a problem from the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ArtifactError`] if the file cannot be read, is not valid
    /// JSON, or describes an invalid problem.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ArtifactError::io(path, e))?;
        let problem = serde_json::from_reader(BufReader::new(file))?;
        Ok(problem)
    }

    /// JSON stores non-finite floats as `null`, which cannot be read back.
    fn check_finite_bounds(&self) -> Result<(), ArtifactError> {
        let constraints = self.constraints();
        let bounds = constraints.lbu.iter().zip(&constraints.ubu);
        for (&index, (&lower, &upper)) in constraints.idxbu.iter().zip(bounds) {
            if let Some(value) = [lower, upper].into_iter().find(|v| !v.is_finite()) {
                return Err(ArtifactError::NonFiniteBound { index, value });
            }
        }
        Ok(())
    }
}
