use ndarray::{Array1, ArrayView1};

/// A continuous-time model `x' = f(x, u)`.
///
/// Models must be deterministic: the same state and control always produce
/// the same derivative.
pub trait Dynamics {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the model name.
    fn name(&self) -> &str;

    /// Returns the state dimension.
    fn nx(&self) -> usize;

    /// Returns the control dimension.
    fn nu(&self) -> usize;

    /// Computes the state derivative at `x` under control `u`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if `x` or `u` has the wrong length, or the
    /// derivative cannot be evaluated.
    fn derivative(
        &self,
        x: ArrayView1<'_, f64>,
        u: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, Self::Error>;
}
