//! Central-difference Jacobians for residual closures.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Jacobian of `f` at `x` by central differences.
///
/// Column `j` uses the step `step * max(|x_j|, 1)`, so `step` is relative for
/// large unknowns and absolute near zero. Costs `2 n` residual evaluations.
pub fn central_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    step: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    if !(step.is_finite() && step > 0.0) {
        return Err(SolverError::invalid("Jacobian step must be positive"));
    }

    let columns = (0..x.len())
        .map(|j| {
            let h = step * x[j].abs().max(1.0);
            let mut probe = x.clone();
            probe[j] = x[j] + h;
            let forward = f(&probe)?;
            probe[j] = x[j] - h;
            let backward = f(&probe)?;
            Ok((forward - backward) / (2.0 * h))
        })
        .collect::<SolverResult<Vec<DVector<f64>>>>()?;

    if columns.is_empty() {
        return Ok(DMatrix::<f64>::zeros(0, 0));
    }
    Ok(DMatrix::from_columns(&columns))
}
