use ndarray::{Array1, ArrayView1};
use recede_core::{Dynamics, Field, SimSolver, SolverStatus};
use tracing::error;

use crate::{HandleError, integrate};

/// One-step forward simulator using explicit Euler substeps.
///
/// Stage `x` and `u` with [`set`](SimSolver::set), then [`solve`](SimSolver::solve)
/// advances the state by `dt` and [`get`](SimSolver::get) reads it back as
/// `x`. The staged values persist, so solving twice without new values gives
/// the same result.
///
/// Status codes:
/// - [`SolverStatus::SUCCESS`] on a finite result
/// - [`SolverStatus::NAN_DETECTED`] when the model fails or the state becomes
///   non-finite
/// - [`SolverStatus::READY`] when `x` or `u` has not been staged yet
#[derive(Debug, Clone)]
pub struct EulerSim<D> {
    model: D,
    dt: f64,
    substeps: usize,
    x: Option<Array1<f64>>,
    u: Option<Array1<f64>>,
    next: Option<Array1<f64>>,
}

impl<D: Dynamics> EulerSim<D> {
    /// Creates a simulator that advances `model` by `dt` in `substeps` substeps.
    #[must_use]
    pub fn new(model: D, dt: f64, substeps: usize) -> Self {
        Self {
            model,
            dt,
            substeps,
            x: None,
            u: None,
            next: None,
        }
    }

    /// Returns the simulated step length.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the model.
    #[must_use]
    pub fn model(&self) -> &D {
        &self.model
    }
}

impl<D: Dynamics> SimSolver for EulerSim<D> {
    type Error = HandleError;

    fn set(&mut self, field: Field, value: ArrayView1<'_, f64>) -> Result<(), Self::Error> {
        match field {
            Field::X => {
                HandleError::check_length(field, self.model.nx(), value.len())?;
                self.x = Some(value.to_owned());
            }
            Field::U => {
                HandleError::check_length(field, self.model.nu(), value.len())?;
                self.u = Some(value.to_owned());
            }
            _ => {
                return Err(HandleError::Field {
                    handle: "simulator",
                    field,
                });
            }
        }
        Ok(())
    }

    fn solve(&mut self) -> SolverStatus {
        self.next = None;

        let (Some(x), Some(u)) = (&self.x, &self.u) else {
            return SolverStatus::READY;
        };

        match integrate::euler(&self.model, x.view(), u.view(), self.dt, self.substeps) {
            Ok(next) => {
                self.next = Some(next);
                SolverStatus::SUCCESS
            }
            Err(err) => {
                error!(model = self.model.name(), %err, "integration failed");
                SolverStatus::NAN_DETECTED
            }
        }
    }

    fn get(&self, field: Field) -> Result<Array1<f64>, Self::Error> {
        match field {
            Field::X => self.next.clone().ok_or(HandleError::NotSolved),
            Field::U => self.u.clone().ok_or(HandleError::NotSolved),
            _ => Err(HandleError::Field {
                handle: "simulator",
                field,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use ndarray::array;
    use recede_models::Pendulum;

    fn simulator() -> EulerSim<Pendulum> {
        EulerSim::new(Pendulum::default(), 0.05, 10)
    }

    #[test]
    fn solving_before_staging_reports_ready() {
        let mut sim = simulator();
        assert_eq!(sim.solve(), SolverStatus::READY);

        sim.set(Field::X, array![0.0, PI, 0.0, 0.0].view()).unwrap();
        assert_eq!(sim.solve(), SolverStatus::READY);
        assert_eq!(sim.get(Field::X), Err(HandleError::NotSolved));
    }

    #[test]
    fn hanging_pendulum_stays_put() {
        let mut sim = simulator();
        sim.set(Field::X, array![0.0, PI, 0.0, 0.0].view()).unwrap();
        sim.set(Field::U, array![0.0].view()).unwrap();

        assert_eq!(sim.solve(), SolverStatus::SUCCESS);

        let next = sim.get(Field::X).unwrap();
        assert_relative_eq!(next[0], 0.0);
        assert_relative_eq!(next[1], PI, epsilon = 1e-12);
        assert_relative_eq!(next[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn force_accelerates_cart() {
        let mut sim = simulator();
        sim.set(Field::X, array![0.0, PI, 0.0, 0.0].view()).unwrap();
        sim.set(Field::U, array![10.0].view()).unwrap();

        assert_eq!(sim.solve(), SolverStatus::SUCCESS);
        let next = sim.get(Field::X).unwrap();

        assert!(next[0] > 0.0);
        assert!(next[2] > 0.0);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let mut sim = simulator();
        sim.set(Field::X, array![0.1, 3.0, -0.2, 0.4].view()).unwrap();
        sim.set(Field::U, array![-7.5].view()).unwrap();

        sim.solve();
        let first = sim.get(Field::X).unwrap();
        sim.solve();
        let second = sim.get(Field::X).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn non_finite_state_reports_nan_detected() {
        let mut sim = simulator();
        sim.set(Field::X, array![0.0, f64::NAN, 0.0, 0.0].view()).unwrap();
        sim.set(Field::U, array![0.0].view()).unwrap();

        assert_eq!(sim.solve(), SolverStatus::NAN_DETECTED);
        assert_eq!(sim.get(Field::X), Err(HandleError::NotSolved));
    }

    #[test]
    fn rejects_bad_fields_and_lengths() {
        let mut sim = simulator();

        assert_eq!(
            sim.set(Field::X, array![0.0, 1.0].view()),
            Err(HandleError::Length {
                field: Field::X,
                expected: 4,
                actual: 2,
            })
        );
        assert_eq!(
            sim.set(Field::Lbx, array![0.0].view()),
            Err(HandleError::Field {
                handle: "simulator",
                field: Field::Lbx,
            })
        );
    }
}
