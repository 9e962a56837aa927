use ndarray::Array1;

/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets integrators step a state via
/// `state + derivative * delta`, where the derivative is with respect to
/// `Delta`. State vectors (`Array1<f64>`) implement it with `f64` steps.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: &Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

impl StepIntegrable<f64> for Array1<f64> {
    type Derivative = Array1<f64>;

    fn step(&self, derivative: &Array1<f64>, delta: f64) -> Self {
        self + &(derivative * delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[derive(Debug, PartialEq)]
    struct Position(f64);
    struct Velocity(f64);

    impl StepIntegrable<f64> for Position {
        type Derivative = Velocity;

        fn step(&self, derivative: &Velocity, delta: f64) -> Self {
            Position(self.0 + derivative.0 * delta)
        }
    }

    #[test]
    fn step_scalar_state() {
        let next = Position(0.0).step(&Velocity(2.0), 0.5);
        assert_eq!(next, Position(1.0));
    }

    #[test]
    fn step_state_vector() {
        let state = array![1.0, 2.0, 3.0];
        let deriv = array![0.1, 0.2, 0.3];

        let next = state.step(&deriv, 10.0);

        assert_eq!(next, array![2.0, 4.0, 6.0]);
    }
}
