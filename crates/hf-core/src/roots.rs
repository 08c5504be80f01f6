//! Bracketed scalar root finding (Brent's method).
//!
//! Residual closures return `Result` so that backend failures (for example an
//! equilibrium solve that does not converge) propagate through the search.

use crate::HfError;
use crate::numeric::ensure_finite;

/// Brent solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct BrentConfig {
    /// Absolute tolerance on x
    pub x_abs_tol: f64,
    /// Relative tolerance on x
    pub x_rel_tol: f64,
    /// Residual magnitude accepted as converged
    pub residual_tol: f64,
    /// Maximum iterations
    pub max_iters: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 0.0,
            max_iters: 200,
        }
    }
}

/// Result of a bracketed root search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
}

fn checked(value: f64) -> Result<f64, HfError> {
    ensure_finite(value, "root residual")
}

/// Find a root of `f` inside `bracket` with Brent's method.
///
/// The residual must change sign across the bracket.
pub fn brent<F, E>(mut f: F, bracket: [f64; 2], config: &BrentConfig) -> Result<Root, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<HfError>,
{
    let [lo, hi] = bracket;
    if !lo.is_finite() || !hi.is_finite() || lo == hi {
        return Err(HfError::InvalidArg {
            what: "bracket bounds must be finite and distinct",
        }
        .into());
    }

    let mut a = lo;
    let mut b = hi;
    let mut fa = checked(f(a)?)?;
    let mut fb = checked(f(b)?)?;

    if fa == 0.0 {
        return Ok(Root {
            x: a,
            residual: fa,
            iterations: 0,
        });
    }
    if fb == 0.0 {
        return Ok(Root {
            x: b,
            residual: fb,
            iterations: 0,
        });
    }
    if fa.signum() == fb.signum() {
        return Err(HfError::NoBracket {
            lo,
            hi,
            f_lo: fa,
            f_hi: fb,
        }
        .into());
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iter in 1..=config.max_iters {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * (config.x_abs_tol + config.x_rel_tol * b.abs());
        let xm = 0.5 * (c - b);

        if xm.abs() <= tol1 || fb == 0.0 || fb.abs() <= config.residual_tol {
            return Ok(Root {
                x: b,
                residual: fb,
                iterations: iter,
            });
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, or secant when only two points are distinct
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q0 = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                    (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = checked(f(b)?)?;
    }

    Err(HfError::NotConverged {
        iterations: config.max_iters,
    }
    .into())
}

/// Walk from `start` in increments of `step` until the residual changes sign.
///
/// Returns the bracket `[x_prev, x_next]` ordered by the walk direction
/// (so `step < 0` yields a descending pair).
pub fn expand_bracket<F, E>(
    mut f: F,
    start: f64,
    step: f64,
    max_steps: usize,
) -> Result<[f64; 2], E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<HfError>,
{
    if !step.is_finite() || step == 0.0 {
        return Err(HfError::InvalidArg {
            what: "bracket step must be finite and non-zero",
        }
        .into());
    }

    let mut x = start;
    let mut fx = checked(f(x)?)?;
    if fx == 0.0 {
        return Ok([x, x + step]);
    }

    for _ in 0..max_steps {
        let x_next = x + step;
        let f_next = checked(f(x_next)?)?;
        if f_next == 0.0 || f_next.signum() != fx.signum() {
            return Ok([x, x_next]);
        }
        x = x_next;
        fx = f_next;
    }

    Err(HfError::NoBracket {
        lo: start,
        hi: x,
        f_lo: fx,
        f_hi: fx,
    }
    .into())
}
