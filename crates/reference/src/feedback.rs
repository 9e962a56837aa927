use ndarray::{Array1, Array2, ArrayView1, s};
use recede_core::{Dynamics, Field, OcpSolver, Problem, SolverStatus};
use tracing::{error, warn};

use crate::{Config, HandleError, integrate};

/// Horizon "solver" that rolls a saturated linear feedback policy.
///
/// From the state pinned through stage-0 `lbx`/`ubx`, each stage `k` applies
///
/// ```text
/// u_k = clamp(-K (x_k - xref_k), lbu_k, ubu_k)
/// ```
///
/// and advances the model by `dt = tf / N` with the same Euler substeps as
/// [`EulerSim`](crate::EulerSim). The result is a feasible horizon
/// trajectory, not an optimal one.
///
/// The target `xref_k` starts as the first `nx` entries of the problem's
/// stage reference (zero if `ny < nx`) and moves with `set(k, yref)`.
///
/// Status codes:
/// - [`SolverStatus::SUCCESS`] on a finite trajectory
/// - [`SolverStatus::NAN_DETECTED`] when a state or control becomes non-finite
/// - [`SolverStatus::MIN_STEP`] when the stage-0 bounds do not pin a single state
/// - [`SolverStatus::READY`] when the stage-0 bounds have not been staged yet
#[derive(Debug, Clone)]
pub struct FeedbackOcp<D> {
    model: D,
    gains: Array2<f64>,
    substeps: usize,
    horizon: usize,
    dt: f64,
    ny: usize,
    idxbu: Vec<usize>,
    lbx: Option<Array1<f64>>,
    ubx: Option<Array1<f64>>,
    lbu: Array2<f64>,
    ubu: Array2<f64>,
    xref: Array2<f64>,
    solution: Option<(Array2<f64>, Array2<f64>)>,
}

impl<D: Dynamics> FeedbackOcp<D> {
    /// Creates a feedback policy for `problem` using `model` and `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or gain matrix dimensions do not match
    /// the problem.
    pub fn new(model: D, problem: &Problem, config: &Config) -> Result<Self, HandleError> {
        let (nx, nu, n) = (problem.nx(), problem.nu(), problem.horizon());

        if model.nx() != nx || model.nu() != nu {
            return Err(HandleError::ModelDimension {
                model: model.name().to_owned(),
                model_nx: model.nx(),
                model_nu: model.nu(),
                nx,
                nu,
            });
        }

        let gains = config.gains();
        if gains.dim() != (nu, nx) {
            return Err(HandleError::GainShape {
                expected: (nu, nx),
                actual: gains.dim(),
            });
        }

        // Unbounded controls get infinite bounds so clamping is uniform.
        let mut lbu = Array2::from_elem((n, nu), f64::NEG_INFINITY);
        let mut ubu = Array2::from_elem((n, nu), f64::INFINITY);
        let constraints = problem.constraints();
        for (k, &index) in constraints.idxbu.iter().enumerate() {
            lbu.column_mut(index).fill(constraints.lbu[k]);
            ubu.column_mut(index).fill(constraints.ubu[k]);
        }

        let mut xref = Array2::zeros((n, nx));
        let yref = &problem.cost().yref;
        if yref.len() >= nx {
            for mut row in xref.rows_mut() {
                row.assign(&yref.slice(s![..nx]));
            }
        }

        Ok(Self {
            model,
            gains: gains.clone(),
            substeps: config.substeps(),
            horizon: n,
            dt: problem.dt(),
            ny: problem.ny(),
            idxbu: constraints.idxbu.clone(),
            lbx: None,
            ubx: None,
            lbu,
            ubu,
            xref,
            solution: None,
        })
    }

    /// Returns the model.
    #[must_use]
    pub fn model(&self) -> &D {
        &self.model
    }

    /// Returns the feedback target at `stage`.
    ///
    /// # Panics
    ///
    /// Panics if `stage` is not less than the horizon length.
    #[must_use]
    pub fn target(&self, stage: usize) -> ArrayView1<'_, f64> {
        self.xref.row(stage)
    }

    fn check_stage(&self, field: Field, stage: usize, last: usize) -> Result<(), HandleError> {
        if stage > last {
            Err(HandleError::Stage { field, stage, last })
        } else {
            Ok(())
        }
    }

    /// Returns the saturated feedback control at `stage`, or `None` if the
    /// unsaturated feedback is non-finite.
    fn policy(&self, stage: usize, x: ArrayView1<'_, f64>) -> Option<Array1<f64>> {
        let offset = &x - &self.xref.row(stage);
        let mut u = -self.gains.dot(&offset);
        // `max`/`min` map NaN onto the bound, so check before saturating.
        if u.iter().any(|value| !value.is_finite()) {
            return None;
        }
        for (i, value) in u.iter_mut().enumerate() {
            *value = value.max(self.lbu[[stage, i]]).min(self.ubu[[stage, i]]);
        }
        Some(u)
    }

    /// Rolls the policy from `x0` across the horizon.
    fn rollout(&self, x0: &Array1<f64>) -> Result<(Array2<f64>, Array2<f64>), SolverStatus> {
        let (nx, nu) = (self.model.nx(), self.model.nu());
        let mut states = Array2::zeros((self.horizon + 1, nx));
        let mut controls = Array2::zeros((self.horizon, nu));
        states.row_mut(0).assign(x0);

        for k in 0..self.horizon {
            let Some(u) = self.policy(k, states.row(k)) else {
                error!(stage = k, "feedback control is non-finite");
                return Err(SolverStatus::NAN_DETECTED);
            };

            let next = integrate::euler(
                &self.model,
                states.row(k),
                u.view(),
                self.dt,
                self.substeps,
            )
            .map_err(|err| {
                error!(stage = k, %err, "horizon rollout failed");
                SolverStatus::NAN_DETECTED
            })?;

            controls.row_mut(k).assign(&u);
            states.row_mut(k + 1).assign(&next);
        }

        Ok((states, controls))
    }
}

impl<D: Dynamics> OcpSolver for FeedbackOcp<D> {
    type Error = HandleError;

    fn set(
        &mut self,
        stage: usize,
        field: Field,
        value: ArrayView1<'_, f64>,
    ) -> Result<(), Self::Error> {
        let last_stage = self.horizon - 1;

        match field {
            Field::Lbx | Field::Ubx => {
                self.check_stage(field, stage, 0)?;
                HandleError::check_length(field, self.model.nx(), value.len())?;
                let slot = if field == Field::Lbx {
                    &mut self.lbx
                } else {
                    &mut self.ubx
                };
                *slot = Some(value.to_owned());
            }
            Field::Lbu | Field::Ubu => {
                self.check_stage(field, stage, last_stage)?;
                HandleError::check_length(field, self.idxbu.len(), value.len())?;
                let bounds = if field == Field::Lbu {
                    &mut self.lbu
                } else {
                    &mut self.ubu
                };
                for (&index, &bound) in self.idxbu.iter().zip(value) {
                    bounds[[stage, index]] = bound;
                }
            }
            Field::Yref => {
                self.check_stage(field, stage, last_stage)?;
                HandleError::check_length(field, self.ny, value.len())?;
                let nx = self.model.nx();
                if self.ny >= nx {
                    self.xref.row_mut(stage).assign(&value.slice(s![..nx]));
                }
            }
            Field::X | Field::U => {
                return Err(HandleError::Field {
                    handle: "optimizer",
                    field,
                });
            }
        }
        Ok(())
    }

    fn solve(&mut self) -> SolverStatus {
        self.solution = None;

        let (Some(lbx), Some(ubx)) = (&self.lbx, &self.ubx) else {
            return SolverStatus::READY;
        };
        if lbx.iter().chain(ubx).any(|value| !value.is_finite()) {
            error!("stage-0 state bounds are non-finite");
            return SolverStatus::NAN_DETECTED;
        }
        if lbx != ubx {
            warn!("stage-0 state bounds do not pin a single state");
            return SolverStatus::MIN_STEP;
        }

        match self.rollout(lbx) {
            Ok(solution) => {
                self.solution = Some(solution);
                SolverStatus::SUCCESS
            }
            Err(status) => status,
        }
    }

    fn get(&self, stage: usize, field: Field) -> Result<Array1<f64>, Self::Error> {
        let (states, controls) = match (field, &self.solution) {
            (Field::X | Field::U, Some(solution)) => solution,
            (Field::X | Field::U, None) => return Err(HandleError::NotSolved),
            _ => {
                return Err(HandleError::Field {
                    handle: "optimizer",
                    field,
                });
            }
        };

        let trajectory = if field == Field::X { states } else { controls };
        let last = trajectory.nrows() - 1;
        self.check_stage(field, stage, last)?;
        Ok(trajectory.row(stage).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use ndarray::array;
    use recede_models::{Pendulum, pendulum};

    fn optimizer() -> FeedbackOcp<Pendulum> {
        let problem = pendulum::problem(pendulum::HORIZON_STEPS).unwrap();
        FeedbackOcp::new(Pendulum::default(), &problem, &Config::default()).unwrap()
    }

    fn pin(ocp: &mut FeedbackOcp<Pendulum>, x: &Array1<f64>) {
        ocp.set(0, Field::Lbx, x.view()).unwrap();
        ocp.set(0, Field::Ubx, x.view()).unwrap();
    }

    #[test]
    fn horizon_starts_at_pinned_state() {
        let mut ocp = optimizer();
        let x0 = array![0.0, 0.1, 0.0, 0.0];
        pin(&mut ocp, &x0);

        assert_eq!(ocp.solve(), SolverStatus::SUCCESS);
        assert_eq!(ocp.get(0, Field::X).unwrap(), x0);
        assert!(ocp.get(20, Field::X).is_ok());
        assert_eq!(
            ocp.get(20, Field::U),
            Err(HandleError::Stage {
                field: Field::U,
                stage: 20,
                last: 19,
            })
        );
    }

    #[test]
    fn first_control_is_linear_feedback() {
        let mut ocp = optimizer();
        pin(&mut ocp, &array![0.1, 0.05, 0.0, 0.2]);

        ocp.solve();
        let u = ocp.get(0, Field::U).unwrap();

        // u = -(-2 * 0.1 + 40 * 0.05 - 4 * 0 + 8 * 0.2)
        assert_relative_eq!(u[0], -3.4, epsilon = 1e-12);
    }

    #[test]
    fn controls_respect_force_bounds() {
        let mut ocp = optimizer();
        pin(&mut ocp, &array![0.0, PI, 0.0, 0.0]);

        assert_eq!(ocp.solve(), SolverStatus::SUCCESS);
        for k in 0..20 {
            let u = ocp.get(k, Field::U).unwrap();
            assert!(u[0].abs() <= pendulum::FORCE_MAX);
        }
        assert_relative_eq!(ocp.get(0, Field::U).unwrap()[0], -pendulum::FORCE_MAX);
    }

    #[test]
    fn stage_bounds_can_be_tightened() {
        let mut ocp = optimizer();
        ocp.set(0, Field::Lbu, array![-5.0].view()).unwrap();
        ocp.set(0, Field::Ubu, array![5.0].view()).unwrap();
        pin(&mut ocp, &array![0.0, PI, 0.0, 0.0]);

        ocp.solve();

        assert_relative_eq!(ocp.get(0, Field::U).unwrap()[0], -5.0);
        assert_relative_eq!(ocp.get(1, Field::U).unwrap()[0].abs(), pendulum::FORCE_MAX);
    }

    #[test]
    fn reference_moves_the_target() {
        let mut ocp = optimizer();
        let yref = array![1.0, 0.0, 0.0, 0.0, 0.0];
        ocp.set(0, Field::Yref, yref.view()).unwrap();
        pin(&mut ocp, &array![1.0, 0.0, 0.0, 0.0]);

        ocp.solve();

        assert_eq!(ocp.target(0), array![1.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(ocp.get(0, Field::U).unwrap()[0], 0.0);
    }

    #[test]
    fn mismatched_bounds_report_min_step() {
        let mut ocp = optimizer();
        ocp.set(0, Field::Lbx, array![0.0, 0.0, 0.0, 0.0].view()).unwrap();
        ocp.set(0, Field::Ubx, array![1.0, 0.0, 0.0, 0.0].view()).unwrap();

        assert_eq!(ocp.solve(), SolverStatus::MIN_STEP);
        assert_eq!(ocp.get(0, Field::U), Err(HandleError::NotSolved));
    }

    #[test]
    fn unpinned_solve_reports_ready() {
        let mut ocp = optimizer();
        assert_eq!(ocp.solve(), SolverStatus::READY);
    }

    #[test]
    fn non_finite_state_reports_nan_detected() {
        let mut ocp = optimizer();
        pin(&mut ocp, &array![0.0, f64::INFINITY, 0.0, 0.0]);

        assert_eq!(ocp.solve(), SolverStatus::NAN_DETECTED);
    }

    #[test]
    fn nan_state_reports_nan_detected_not_min_step() {
        let mut ocp = optimizer();
        pin(&mut ocp, &array![0.0, f64::NAN, 0.0, 0.0]);

        assert_eq!(ocp.solve(), SolverStatus::NAN_DETECTED);
        assert_eq!(ocp.get(0, Field::U), Err(HandleError::NotSolved));
    }

    #[test]
    fn nan_feedback_is_not_saturated_into_bounds() {
        let mut ocp = optimizer();
        ocp.set(0, Field::Yref, array![f64::MIN, f64::MIN, 0.0, 0.0, 0.0].view())
            .unwrap();

        // Offsets overflow to +inf, and gains of opposite sign give inf - inf.
        let x = array![f64::MAX, f64::MAX, 0.0, 0.0];
        assert_eq!(ocp.policy(0, x.view()), None);

        let u = ocp.policy(1, array![0.0, 0.1, 0.0, 0.0].view()).unwrap();
        assert!(u[0].is_finite());
    }

    #[test]
    fn rejects_invalid_requests() {
        let mut ocp = optimizer();
        let x = array![0.0, 0.0, 0.0, 0.0];

        assert!(matches!(
            ocp.set(1, Field::Lbx, x.view()),
            Err(HandleError::Stage { stage: 1, last: 0, .. })
        ));
        assert!(matches!(
            ocp.set(0, Field::Lbx, x.slice(s![..2])),
            Err(HandleError::Length { expected: 4, actual: 2, .. })
        ));
        assert!(matches!(
            ocp.set(0, Field::X, x.view()),
            Err(HandleError::Field { field: Field::X, .. })
        ));
        assert_eq!(
            ocp.get(0, Field::Lbx),
            Err(HandleError::Field {
                handle: "optimizer",
                field: Field::Lbx,
            })
        );
    }

    #[test]
    fn rejects_mismatched_gains() {
        let problem = pendulum::problem(pendulum::HORIZON_STEPS).unwrap();
        let config = Config::new(array![[1.0, 2.0]], 10).unwrap();

        let err = FeedbackOcp::new(Pendulum::default(), &problem, &config).unwrap_err();

        assert_eq!(
            err,
            HandleError::GainShape {
                expected: (1, 4),
                actual: (1, 2),
            }
        );
    }
}
