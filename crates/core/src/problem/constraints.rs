use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Box constraints on the controls and the pinned initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Indices of the bounded controls.
    pub idxbu: Vec<usize>,

    /// Lower bounds, one per entry of `idxbu`.
    pub lbu: Array1<f64>,

    /// Upper bounds, one per entry of `idxbu`.
    pub ubu: Array1<f64>,

    /// Initial state.
    pub x0: Array1<f64>,
}

impl Constraints {
    /// Returns the `(lower, upper)` bounds for control `index`, if bounded.
    #[must_use]
    pub fn control_bounds(&self, index: usize) -> Option<(f64, f64)> {
        self.idxbu
            .iter()
            .position(|&i| i == index)
            .map(|k| (self.lbu[k], self.ubu[k]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn looks_up_bounds_by_control_index() {
        let constraints = Constraints {
            idxbu: vec![2, 0],
            lbu: array![-1.0, -5.0],
            ubu: array![1.0, 5.0],
            x0: array![0.0],
        };

        assert_eq!(constraints.control_bounds(0), Some((-5.0, 5.0)));
        assert_eq!(constraints.control_bounds(2), Some((-1.0, 1.0)));
        assert_eq!(constraints.control_bounds(1), None);
    }
}
