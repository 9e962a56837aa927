//! Run command
//!
//! Runs the closed loop on a problem artifact (or the built-in pendulum
//! problem) using the reference backend, and writes the trajectories as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use ndarray::{Array1, Array2};
use recede_core::{Observer, Problem};
use recede_driver::closed_loop::{Action, ClosedLoop, Event};
use recede_models::{Pendulum, pendulum};
use recede_observers::{Settled, TracingObserver};
use recede_reference::{Config, ReferenceBackend};
use tracing::info;

use crate::report::Report;

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Problem artifact to load (defaults to the built-in pendulum problem)
    #[arg(short, long)]
    pub problem: Option<PathBuf>,

    /// Number of closed-loop steps
    #[arg(short = 'n', long, default_value_t = pendulum::SIM_STEPS)]
    pub steps: usize,

    /// Feedback gains, one comma-separated value per state
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub gains: Option<Vec<f64>>,

    /// Euler substeps per closed-loop step
    #[arg(long, default_value_t = 10)]
    pub substeps: usize,

    /// Stop once every state stays within this distance of zero for 5 steps
    #[arg(long)]
    pub settle: Option<f64>,

    /// Path of the trajectory JSON to write (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RunCommand {
    pub fn execute(&self) -> Result<()> {
        let problem = self.load_problem()?;
        let backend = ReferenceBackend::new(Pendulum::default(), self.config()?);

        let mut driver = ClosedLoop::from_backend(&backend, &problem)
            .context("failed to create solver handles")?;

        let mut logger = TracingObserver::new().with_progress(10);
        let solution = match self.settle {
            Some(tolerance) => {
                let mut settled = Settled::new(Array1::zeros(problem.nx()), tolerance, 5);
                driver.run(self.steps, |event: &Event| {
                    let _: Option<Action> = logger.observe(event);
                    settled.observe(event)
                })
            }
            None => driver.run(self.steps, logger),
        }
        .with_context(|| format!("closed loop failed on problem `{}`", problem.name()))?;

        info!(steps = solution.steps, "writing trajectories");
        Report::new(problem.name(), solution, driver.trajectories(), driver.dt())
            .write(self.output.as_deref())
    }

    fn load_problem(&self) -> Result<Problem> {
        match &self.problem {
            Some(path) => Problem::load_json(path)
                .with_context(|| format!("failed to load problem from {}", path.display())),
            None => pendulum::problem(pendulum::HORIZON_STEPS)
                .context("failed to build the pendulum problem"),
        }
    }

    fn config(&self) -> Result<Config> {
        let gains = match &self.gains {
            Some(gains) if gains.is_empty() => bail!("--gains needs at least one value"),
            Some(gains) => Array2::from_shape_vec((1, gains.len()), gains.clone())?,
            None => Config::default().gains().clone(),
        };
        Config::new(gains, self.substeps).context("invalid backend configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> RunCommand {
        RunCommand {
            problem: None,
            steps: 5,
            gains: None,
            substeps: 10,
            settle: None,
            output: None,
        }
    }

    #[test]
    fn default_config_matches_backend_default() {
        assert_eq!(command().config().unwrap(), Config::default());
    }

    #[test]
    fn gains_become_a_single_row() {
        let cmd = RunCommand {
            gains: Some(vec![-1.0, 20.0, -2.0, 4.0]),
            ..command()
        };

        let config = cmd.config().unwrap();

        assert_eq!(config.gains().dim(), (1, 4));
        assert_eq!(config.gains()[[0, 1]], 20.0);
    }

    #[test]
    fn zero_substeps_is_rejected() {
        let cmd = RunCommand {
            substeps: 0,
            ..command()
        };

        assert!(cmd.config().is_err());
    }
}
