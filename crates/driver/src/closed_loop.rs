//! Closed-loop simulation with an optimizer in the loop.
//!
//! # Algorithm
//!
//! Starting from the problem's initial state `x0`, each step:
//!
//! 1. Pins the optimizer's stage-0 state bounds to the current state
//!    (`lbx = ubx = x`). This is how feedback enters an otherwise open-loop
//!    horizon solve.
//! 2. Solves. A non-zero status aborts with [`Error::SolverDivergence`].
//! 3. Reads the first control `u` of the optimized horizon and records it.
//! 4. Feeds `x` and `u` to the simulator and solves. A non-zero status aborts
//!    with [`Error::IntegrationFailure`].
//! 5. Reads the simulated state, records it, and makes it the current state.
//!
//! There are no retries. Any failure ends the run and leaves the trajectories
//! truncated at the failing step; they are kept only for inspection through
//! [`ClosedLoop::trajectories`].
//!
//! # Observer Events
//!
//! After each completed step the observer receives an [`Event`] with the state,
//! the applied control, and the resulting state. Returning
//! [`Action::StopEarly`] ends the run with [`Status::StoppedByObserver`].
//!
//! # Example
//!
//! ```ignore
//! use recede_driver::closed_loop::ClosedLoop;
//!
//! let mut driver = ClosedLoop::from_backend(&backend, &problem)?;
//! let solution = driver.run_unobserved(100)?;
//!
//! let trajectories = driver.trajectories();
//! println!("{} steps, final state {}", solution.steps, trajectories.state(solution.steps));
//! ```

mod action;
mod error;
mod event;
mod solution;
mod trajectories;


pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use trajectories::Trajectories;

use ndarray::Array1;
use recede_core::{Backend, Field, Observer, OcpSolver, Problem, SimSolver};
use tracing::{debug, error, info, info_span, warn};

/// Drives an optimizer and a simulator in closed loop.
///
/// The driver owns both handles and the trajectory buffers for its whole
/// lifetime. Handles are mutated in strict alternation, optimizer first.
#[derive(Debug)]
pub struct ClosedLoop<O, S> {
    optimizer: O,
    simulator: S,
    name: String,
    x0: Array1<f64>,
    horizon: usize,
    dt: f64,
    trajectories: Trajectories,
}

impl<O, S> ClosedLoop<O, S>
where
    O: OcpSolver,
    S: SimSolver,
{
    /// Binds an optimizer and a simulator created for `problem`.
    ///
    /// The initial state, dimensions, and horizon are taken from `problem`.
    #[must_use]
    pub fn new(problem: &Problem, optimizer: O, simulator: S) -> Self {
        Self {
            optimizer,
            simulator,
            name: problem.name().to_owned(),
            x0: problem.constraints().x0.clone(),
            horizon: problem.horizon(),
            dt: problem.dt(),
            trajectories: Trajectories::new(problem.nx(), problem.nu()),
        }
    }

    /// Creates both handles from `backend` and binds them.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if either handle cannot be created.
    pub fn from_backend<B>(backend: &B, problem: &Problem) -> Result<Self, B::Error>
    where
        B: Backend<Ocp = O, Sim = S>,
    {
        let optimizer = backend.create_ocp_solver(problem)?;
        let simulator = backend.create_sim_solver(problem)?;
        Ok(Self::new(problem, optimizer, simulator))
    }

    /// Returns the trajectories recorded by the most recent run.
    #[must_use]
    pub fn trajectories(&self) -> &Trajectories {
        &self.trajectories
    }

    /// Returns the number of horizon steps of the bound problem.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Returns the time between closed-loop steps.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the optimizer handle.
    #[must_use]
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Returns the simulator handle.
    #[must_use]
    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Consumes the driver, returning the recorded trajectories.
    #[must_use]
    pub fn into_trajectories(self) -> Trajectories {
        self.trajectories
    }

    /// Consumes the driver, returning both handles and the trajectories.
    #[must_use]
    pub fn into_parts(self) -> (O, S, Trajectories) {
        (self.optimizer, self.simulator, self.trajectories)
    }

    /// Runs `sim_steps` closed-loop steps from the initial state.
    ///
    /// Previously recorded trajectories are discarded first. See the
    /// [module docs](self) for the algorithm and observer behavior.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] as soon as either handle reports a non-zero status,
    /// fails a `set` or `get`, or returns a vector of the wrong length.
    pub fn run<Obs>(&mut self, sim_steps: usize, mut observer: Obs) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let _span = info_span!("closed_loop", model = %self.name).entered();
        info!(sim_steps, horizon = self.horizon, dt = self.dt, "starting closed loop");

        let (nx, nu) = (self.trajectories.nx(), self.trajectories.nu());
        self.trajectories = Trajectories::new(nx, nu);
        self.trajectories
            .push_state(self.x0.view())
            .map_err(|_| Error::dimension(0, Field::X, nx, self.x0.len()))?;

        let mut x = self.x0.clone();

        for step in 0..sim_steps {
            let u = self.optimize(step, &x)?;
            self.trajectories
                .push_control(u.view())
                .map_err(|_| Error::dimension(step, Field::U, nu, u.len()))?;

            let next = self.advance(step, &x, &u)?;
            self.trajectories
                .push_state(next.view())
                .map_err(|_| Error::dimension(step, Field::X, nx, next.len()))?;

            debug!(step, x = %x, u = %u, "step complete");

            let event = Event {
                step,
                state: x,
                control: u,
                next_state: next.clone(),
            };
            x = next;

            if let Some(Action::StopEarly) = observer.observe(&event) {
                warn!(step, "observer stopped the closed loop early");
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    steps: step + 1,
                });
            }
        }

        info!(steps = sim_steps, "closed loop complete");
        Ok(Solution {
            status: Status::Complete,
            steps: sim_steps,
        })
    }

    /// Runs `sim_steps` closed-loop steps without observation.
    ///
    /// This is a convenience wrapper around [`run`](Self::run) that discards
    /// events.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] under the same conditions as [`run`](Self::run).
    pub fn run_unobserved(&mut self, sim_steps: usize) -> Result<Solution, Error> {
        self.run(sim_steps, ())
    }

    /// Solves the horizon from `x` and returns the first control.
    fn optimize(&mut self, step: usize, x: &Array1<f64>) -> Result<Array1<f64>, Error> {
        self.optimizer
            .set(0, Field::Lbx, x.view())
            .map_err(|e| Error::optimizer(step, e))?;
        self.optimizer
            .set(0, Field::Ubx, x.view())
            .map_err(|e| Error::optimizer(step, e))?;

        let status = self.optimizer.solve();
        if !status.is_success() {
            error!(step, %status, "optimizer failed");
            return Err(Error::SolverDivergence { step, status });
        }

        self.optimizer
            .get(0, Field::U)
            .map_err(|e| Error::optimizer(step, e))
    }

    /// Simulates one step from `x` under `u` and returns the next state.
    fn advance(
        &mut self,
        step: usize,
        x: &Array1<f64>,
        u: &Array1<f64>,
    ) -> Result<Array1<f64>, Error> {
        self.simulator
            .set(Field::X, x.view())
            .map_err(|e| Error::simulator(step, e))?;
        self.simulator
            .set(Field::U, u.view())
            .map_err(|e| Error::simulator(step, e))?;

        let status = self.simulator.solve();
        if !status.is_success() {
            error!(step, %status, "simulator failed");
            return Err(Error::IntegrationFailure { step, status });
        }

        self.simulator
            .get(Field::X)
            .map_err(|e| Error::simulator(step, e))
    }
}

/// Runs a closed loop once and returns the completed trajectories.
///
/// This is the one-shot form of [`ClosedLoop::run_unobserved`] for callers
/// that do not need the handles afterwards.
///
/// # Errors
///
/// Returns an [`Error`] if any step fails. The partial trajectories are
/// discarded.
pub fn simulate<O, S>(
    problem: &Problem,
    optimizer: O,
    simulator: S,
    sim_steps: usize,
) -> Result<Trajectories, Error>
where
    O: OcpSolver,
    S: SimSolver,
{
    let mut driver = ClosedLoop::new(problem, optimizer, simulator);
    driver.run_unobserved(sim_steps)?;
    Ok(driver.into_trajectories())
}
