use ndarray::{Array1, Array2};

use super::{Problem, ProblemError};

/// Checks every invariant a [`Problem`] must hold.
pub(super) fn problem(p: &Problem) -> Result<(), ProblemError> {
    let dims = p.dims;
    if dims.nx == 0 {
        return Err(ProblemError::ZeroDimension("nx"));
    }
    if dims.nu == 0 {
        return Err(ProblemError::ZeroDimension("nu"));
    }
    if dims.n == 0 {
        return Err(ProblemError::ZeroDimension("N"));
    }
    if !p.tf.is_finite() || p.tf <= 0.0 {
        return Err(ProblemError::HorizonLength(p.tf));
    }

    let ny = p.cost.w.nrows();
    matrix("W", &p.cost.w, (ny, ny))?;
    matrix("Vx", &p.cost.vx, (ny, dims.nx))?;
    matrix("Vu", &p.cost.vu, (ny, dims.nu))?;
    vector("yref", &p.cost.yref, ny)?;

    let ny_e = p.cost_e.w.nrows();
    matrix("W_e", &p.cost_e.w, (ny_e, ny_e))?;
    matrix("Vx_e", &p.cost_e.vx, (ny_e, dims.nx))?;
    vector("yref_e", &p.cost_e.yref, ny_e)?;

    let c = &p.constraints;
    vector("x0", &c.x0, dims.nx)?;
    bounds(c.idxbu.as_slice(), &c.lbu, &c.ubu, dims.nu)?;

    if let Some(cond_n) = p.options.qp_solver_cond_n {
        if cond_n == 0 || cond_n > dims.n {
            return Err(ProblemError::CondensingHorizon { cond_n, n: dims.n });
        }
    }

    Ok(())
}

fn matrix(
    name: &'static str,
    m: &Array2<f64>,
    expected: (usize, usize),
) -> Result<(), ProblemError> {
    if m.dim() != expected {
        return Err(ProblemError::Shape {
            name,
            expected,
            actual: m.dim(),
        });
    }
    if m.iter().any(|v| !v.is_finite()) {
        return Err(ProblemError::NonFinite { name });
    }
    Ok(())
}

fn vector(name: &'static str, v: &Array1<f64>, expected: usize) -> Result<(), ProblemError> {
    if v.len() != expected {
        return Err(ProblemError::Length {
            name,
            expected,
            actual: v.len(),
        });
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(ProblemError::NonFinite { name });
    }
    Ok(())
}

/// Bounds may be infinite (unbounded on one side) but never NaN.
fn bounds(
    idxbu: &[usize],
    lbu: &Array1<f64>,
    ubu: &Array1<f64>,
    nu: usize,
) -> Result<(), ProblemError> {
    for (name, b) in [("lbu", lbu), ("ubu", ubu)] {
        if b.len() != idxbu.len() {
            return Err(ProblemError::Length {
                name,
                expected: idxbu.len(),
                actual: b.len(),
            });
        }
        if b.iter().any(|x| x.is_nan()) {
            return Err(ProblemError::NonFinite { name });
        }
    }

    let mut seen = vec![false; nu];
    for (k, &index) in idxbu.iter().enumerate() {
        if index >= nu {
            return Err(ProblemError::ControlIndex { index, nu });
        }
        if seen[index] {
            return Err(ProblemError::DuplicateControlIndex(index));
        }
        seen[index] = true;

        if lbu[k] > ubu[k] {
            return Err(ProblemError::Bounds {
                index,
                lower: lbu[k],
                upper: ubu[k],
            });
        }
    }

    Ok(())
}
