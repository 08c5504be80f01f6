//! Damped Newton solver for small nonlinear systems.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm (against the initial residual)
    pub rel_tol: f64,
    /// Residual norm accepted when the line search can no longer improve
    pub stall_tol: f64,
    /// Largest allowed change of any unknown in one step
    pub max_step: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-10,
            rel_tol: 0.0,
            stall_tol: 0.0,
            max_step: f64::INFINITY,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Newton solver with step limiting and a backtracking line search.
///
/// Residual evaluations that fail inside the line search are treated as
/// non-improving trial points, so the step is shortened instead of aborting.
/// A failure at an accepted iterate is propagated.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        trace!(iter, residual = r_norm, "newton iterate");
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            debug!(iterations = iter, residual = r_norm, "newton converged");
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        let jac = jacobian_fn(&x)?;

        // Solve J * dx = -r
        let mut dx = jac.lu().solve(&(-r.clone())).ok_or_else(|| SolverError::Numeric {
            what: "Jacobian solve failed".to_string(),
        })?;
        if dx.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::Numeric {
                what: format!("non-finite Newton step at iteration {iter}"),
            });
        }

        let largest = dx.amax();
        if largest > config.max_step {
            dx *= config.max_step / largest;
        }

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..=config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            if let Ok(r_new) = residual_fn(&x_new) {
                let r_new_norm = r_new.norm();
                if r_new_norm.is_finite() && r_new_norm < r_norm {
                    accepted = Some((x_new, r_new, r_new_norm));
                    break;
                }
            }
            alpha *= config.line_search_beta;
        }

        match accepted {
            Some((x_new, r_new, r_new_norm)) => {
                x = x_new;
                r = r_new;
                r_norm = r_new_norm;
            }
            None if r_norm < config.stall_tol => {
                debug!(iterations = iter, residual = r_norm, "newton stalled within tolerance");
                return Ok(NewtonResult {
                    x,
                    residual_norm: r_norm,
                    iterations: iter,
                });
            }
            None => {
                return Err(SolverError::ConvergenceFailed {
                    what: format!(
                        "line search stagnated at iteration {iter}, residual = {r_norm:e}"
                    ),
                });
            }
        }
    }

    if r_norm < config.abs_tol {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "maximum iterations {} reached, residual = {:e}",
            config.max_iterations, r_norm
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jacobian::central_difference_jacobian;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0 from x = 3
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        };

        let x0 = DVector::from_element(1, 3.0);
        let config = NewtonConfig::default();
        let result = newton_solve(x0, residual, jacobian, &config).unwrap();

        assert!((result.x[0] - 2.0).abs() < 1e-9);
        assert!(result.iterations < 10);
    }

    #[test]
    fn two_dimensional_with_numeric_jacobian() {
        // x^2 + y^2 = 5, x*y = 2 -> (2, 1) from (3, 0.5)
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![
                x[0] * x[0] + x[1] * x[1] - 5.0,
                x[0] * x[1] - 2.0,
            ]))
        };
        let jacobian =
            |x: &DVector<f64>| central_difference_jacobian(x, residual, 1e-6);

        let config = NewtonConfig {
            abs_tol: 1e-9,
            ..NewtonConfig::default()
        };
        let result =
            newton_solve(DVector::from_vec(vec![3.0, 0.5]), residual, jacobian, &config).unwrap();

        assert!((result.x[0] - 2.0).abs() < 1e-7);
        assert!((result.x[1] - 1.0).abs() < 1e-7);
    }

    #[test]
    fn step_limit_keeps_iterates_in_domain() {
        // ln(x) = 0 from x = 10: the full Newton step lands at x < 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] <= 0.0 {
                return Err(SolverError::invalid("x must be positive"));
            }
            Ok(DVector::from_element(1, x[0].ln()))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 1.0 / x[0]))
        };

        let config = NewtonConfig {
            max_step: 0.5,
            ..NewtonConfig::default()
        };
        let result =
            newton_solve(DVector::from_element(1, 10.0), residual, jacobian, &config).unwrap();
        assert!((result.x[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn singular_jacobian_is_reported() {
        let residual = |_: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 1.0))
        };
        let jacobian = |_: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::<f64>::zeros(1, 1))
        };

        let err = newton_solve(
            DVector::from_element(1, 0.0),
            residual,
            jacobian,
            &NewtonConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn solves_shifted_exponentials(target in 0.01_f64..100.0, x0 in -3.0_f64..3.0) {
                // e^x = target
                let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
                    Ok(DVector::from_element(1, x[0].exp() - target))
                };
                let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
                    Ok(DMatrix::from_element(1, 1, x[0].exp()))
                };
                let config = NewtonConfig {
                    abs_tol: 1e-12 * target.max(1.0),
                    max_step: 2.0,
                    ..NewtonConfig::default()
                };
                let result =
                    newton_solve(DVector::from_element(1, x0), residual, jacobian, &config).unwrap();
                prop_assert!((result.x[0] - target.ln()).abs() < 1e-8);
            }
        }
    }
}
