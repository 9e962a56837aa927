use ndarray::{Array1, ArrayView1};
use recede_core::{Dynamics, StepIntegrable};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum IntegrationError<E> {
    #[error("model error: {0}")]
    Model(#[source] E),

    #[error("state became non-finite")]
    NonFinite,
}

/// Advances `x` over `dt` under a constant control `u` with explicit Euler.
///
/// The interval is split into `substeps` equal substeps.
pub(crate) fn euler<D: Dynamics>(
    model: &D,
    x: ArrayView1<'_, f64>,
    u: ArrayView1<'_, f64>,
    dt: f64,
    substeps: usize,
) -> Result<Array1<f64>, IntegrationError<D::Error>> {
    let h = dt / substeps as f64;
    let mut state = x.to_owned();

    for _ in 0..substeps {
        let derivative = model
            .derivative(state.view(), u)
            .map_err(IntegrationError::Model)?;
        state = state.step(&derivative, h);
    }

    if state.iter().all(|value| value.is_finite()) {
        Ok(state)
    } else {
        Err(IntegrationError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use ndarray::array;

    /// Double integrator: `p' = v`, `v' = u`.
    struct DoubleIntegrator;

    impl Dynamics for DoubleIntegrator {
        type Error = Infallible;

        fn name(&self) -> &str {
            "double_integrator"
        }

        fn nx(&self) -> usize {
            2
        }

        fn nu(&self) -> usize {
            1
        }

        fn derivative(
            &self,
            x: ArrayView1<'_, f64>,
            u: ArrayView1<'_, f64>,
        ) -> Result<Array1<f64>, Self::Error> {
            Ok(array![x[1], u[0]])
        }
    }

    #[test]
    fn substeps_refine_the_step() {
        let x = array![0.0, 0.0];
        let u = array![1.0];

        let coarse = euler(&DoubleIntegrator, x.view(), u.view(), 1.0, 1).unwrap();
        let fine = euler(&DoubleIntegrator, x.view(), u.view(), 1.0, 4).unwrap();

        // One step never moves the position; four substeps sum 0 + 1/4 + 2/4 + 3/4 times h.
        assert_relative_eq!(coarse[0], 0.0);
        assert_relative_eq!(fine[0], 0.375);
        assert_relative_eq!(fine[1], 1.0);
    }

    #[test]
    fn non_finite_result_is_an_error() {
        let x = array![f64::MAX, f64::MAX];
        let u = array![f64::MAX];

        let result = euler(&DoubleIntegrator, x.view(), u.view(), 10.0, 1);

        assert!(matches!(result, Err(IntegrationError::NonFinite)));
    }
}
