//! Export command
//!
//! Writes the pendulum swing-up problem as a JSON artifact.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use recede_models::pendulum;
use tracing::info;

/// Export command arguments
#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Path of the artifact to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of horizon steps
    #[arg(long, default_value_t = pendulum::HORIZON_STEPS)]
    pub horizon: usize,
}

impl ExportCommand {
    pub fn execute(&self) -> Result<()> {
        let problem = pendulum::problem(self.horizon).context("invalid pendulum problem")?;

        problem
            .save_json(&self.output)
            .with_context(|| format!("failed to write {}", self.output.display()))?;

        info!(
            path = %self.output.display(),
            horizon = problem.horizon(),
            "wrote problem artifact"
        );
        Ok(())
    }
}
