use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use ndarray::Array2;
use recede_driver::closed_loop::{Solution, Status, Trajectories};
use serde::Serialize;

/// Closed-loop results written by `recede run`.
///
/// Matrices are stored as row vectors, one row per step.
#[derive(Debug, Serialize)]
pub struct Report {
    pub model: String,
    pub status: &'static str,
    pub steps: usize,
    pub dt: f64,
    pub time: Vec<f64>,
    pub states: Vec<Vec<f64>>,
    pub controls: Vec<Vec<f64>>,
}

impl Report {
    pub fn new(
        model: impl Into<String>,
        solution: Solution,
        trajectories: &Trajectories,
        dt: f64,
    ) -> Self {
        let status = match solution.status {
            Status::Complete => "complete",
            Status::StoppedByObserver => "stopped_by_observer",
        };

        Self {
            model: model.into(),
            status,
            steps: solution.steps,
            dt,
            time: trajectories.times(dt).to_vec(),
            states: rows(trajectories.states()),
            controls: rows(trajectories.controls()),
        }
    }

    /// Writes the report as pretty JSON to `path`, or to stdout when `None`.
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, self)?;
                writer.flush()?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, self)?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}

fn rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}
