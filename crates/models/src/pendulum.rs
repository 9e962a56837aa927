//! Inverted pendulum on a cart.
//!
//! # State and control
//!
//! - State: `[p, theta, v, omega]`
//!   - `p`: cart position (m)
//!   - `theta`: pole angle from upright (rad), so `pi` hangs straight down
//!   - `v`: cart velocity (m/s)
//!   - `omega`: pole angular velocity (rad/s)
//! - Control: `[F]`, horizontal force on the cart (N)
//!
//! # Dynamics
//!
//! ```text
//! d      = M + m - m cos²θ
//! p'     = v
//! θ'     = ω
//! v'     = (-m l sin θ ω² + m g cos θ sin θ + F) / d
//! ω'     = (-m l cos θ sin θ ω² + F cos θ + (M + m) g sin θ) / (l d)
//! ```

mod problem;

pub use problem::{FORCE_MAX, HORIZON_STEPS, HORIZON_TIME, SIM_STEPS, problem};

use ndarray::{Array1, ArrayView1, array};
use recede_core::Dynamics;

use crate::ModelError;

/// Cart-pole parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    /// Cart mass `M` (kg).
    pub cart_mass: f64,

    /// Pole tip mass `m` (kg).
    pub pole_mass: f64,

    /// Gravitational acceleration `g` (m/s²).
    pub gravity: f64,

    /// Pole length `l` (m).
    pub pole_length: f64,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self {
            cart_mass: 1.0,
            pole_mass: 0.1,
            gravity: 9.81,
            pole_length: 0.8,
        }
    }
}

impl Pendulum {
    pub const NX: usize = 4;
    pub const NU: usize = 1;
}

impl Dynamics for Pendulum {
    type Error = ModelError;

    fn name(&self) -> &str {
        "pendulum_ode"
    }

    fn nx(&self) -> usize {
        Self::NX
    }

    fn nu(&self) -> usize {
        Self::NU
    }

    fn derivative(
        &self,
        x: ArrayView1<'_, f64>,
        u: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, Self::Error> {
        if x.len() != Self::NX {
            return Err(ModelError::StateLength {
                expected: Self::NX,
                actual: x.len(),
            });
        }
        if u.len() != Self::NU {
            return Err(ModelError::ControlLength {
                expected: Self::NU,
                actual: u.len(),
            });
        }

        let Self {
            cart_mass: big_m,
            pole_mass: m,
            gravity: g,
            pole_length: l,
        } = *self;

        let (theta, v, omega) = (x[1], x[2], x[3]);
        let force = u[0];
        let (sin, cos) = theta.sin_cos();

        let denominator = big_m + m - m * cos * cos;
        let v_dot = (-m * l * sin * omega * omega + m * g * cos * sin + force) / denominator;
        let omega_dot = (-m * l * cos * sin * omega * omega
            + force * cos
            + (big_m + m) * g * sin)
            / (l * denominator);

        Ok(array![v, omega, v_dot, omega_dot])
    }
}
