use recede_core::{Backend, Dynamics, Problem};
use tracing::debug;

use crate::{Config, EulerSim, FeedbackOcp, HandleError};

/// Creates [`FeedbackOcp`] and [`EulerSim`] handles for a model.
///
/// Both handles step the same model with the same `dt` and substep count, so
/// the optimizer's predicted first step matches what the simulator produces.
#[derive(Debug, Clone, Default)]
pub struct ReferenceBackend<D> {
    model: D,
    config: Config,
}

impl<D: Dynamics + Clone> ReferenceBackend<D> {
    /// Creates a backend for `model` with the given configuration.
    #[must_use]
    pub fn new(model: D, config: Config) -> Self {
        Self { model, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_model(&self, problem: &Problem) -> Result<(), HandleError> {
        let (nx, nu) = (problem.nx(), problem.nu());
        if self.model.nx() == nx && self.model.nu() == nu {
            Ok(())
        } else {
            Err(HandleError::ModelDimension {
                model: self.model.name().to_owned(),
                model_nx: self.model.nx(),
                model_nu: self.model.nu(),
                nx,
                nu,
            })
        }
    }
}

impl<D: Dynamics + Clone> Backend for ReferenceBackend<D> {
    type Ocp = FeedbackOcp<D>;
    type Sim = EulerSim<D>;
    type Error = HandleError;

    fn create_ocp_solver(&self, problem: &Problem) -> Result<Self::Ocp, Self::Error> {
        debug!(
            problem = problem.name(),
            horizon = problem.horizon(),
            "creating feedback optimizer"
        );
        FeedbackOcp::new(self.model.clone(), problem, &self.config)
    }

    fn create_sim_solver(&self, problem: &Problem) -> Result<Self::Sim, Self::Error> {
        self.check_model(problem)?;
        debug!(
            problem = problem.name(),
            dt = problem.dt(),
            substeps = self.config.substeps(),
            "creating euler simulator"
        );
        Ok(EulerSim::new(
            self.model.clone(),
            problem.dt(),
            self.config.substeps(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use ndarray::{Array1, array};
    use recede_core::{
        Field, OcpSolver, SimSolver, SolverStatus,
        problem::{Cost, ProblemBuilder, TerminalCost},
    };
    use recede_models::{Pendulum, pendulum};

    #[test]
    fn predicted_first_step_matches_simulator() {
        let problem = pendulum::problem(pendulum::HORIZON_STEPS).unwrap();
        let backend = ReferenceBackend::new(Pendulum::default(), Config::default());
        let mut ocp = backend.create_ocp_solver(&problem).unwrap();
        let mut sim = backend.create_sim_solver(&problem).unwrap();

        let x0 = array![0.0, PI - 0.3, 0.0, 0.0];
        ocp.set(0, Field::Lbx, x0.view()).unwrap();
        ocp.set(0, Field::Ubx, x0.view()).unwrap();
        assert_eq!(ocp.solve(), SolverStatus::SUCCESS);
        let u = ocp.get(0, Field::U).unwrap();

        sim.set(Field::X, x0.view()).unwrap();
        sim.set(Field::U, u.view()).unwrap();
        assert_eq!(sim.solve(), SolverStatus::SUCCESS);

        assert_eq!(sim.get(Field::X).unwrap(), ocp.get(1, Field::X).unwrap());
    }

    #[test]
    fn rejects_problem_with_other_dimensions() {
        let problem = ProblemBuilder::new("scalar", 1, 1)
            .horizon(5, 1.0)
            .cost(Cost {
                w: array![[1.0]],
                vx: array![[1.0]],
                vu: array![[0.0]],
                yref: Array1::zeros(1),
            })
            .terminal_cost(TerminalCost {
                w: array![[1.0]],
                vx: array![[1.0]],
                yref: Array1::zeros(1),
            })
            .initial_state(array![0.0])
            .build()
            .unwrap();
        let backend = ReferenceBackend::new(Pendulum::default(), Config::default());

        let expected = HandleError::ModelDimension {
            model: "pendulum_ode".to_owned(),
            model_nx: 4,
            model_nu: 1,
            nx: 1,
            nu: 1,
        };
        assert_eq!(backend.create_ocp_solver(&problem).unwrap_err(), expected);
        assert_eq!(backend.create_sim_solver(&problem).unwrap_err(), expected);
    }
}
