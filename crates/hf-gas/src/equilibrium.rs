//! Equilibrium composition by the element-potential method.
//!
//! At fixed (T, p) each species partial pressure follows from the element
//! potentials λ_e:
//!
//! ```text
//! ln(p_i / p°) = Σ_e a_ie λ_e - g_i°(T) / (R T)
//! ```
//!
//! The unknown potentials are found by Newton iteration on
//!
//! ```text
//! r_0 = ln(Σ_i p_i / p)
//! r_k = ln(n_k / n_0) - ln(b_k / b_0)      k = 1..E-1
//! ```
//!
//! where n_e = Σ_i a_ie p_i is the element content and b_e the prescribed
//! elemental fractions. Working in logarithms keeps trace species (partial
//! pressures down to ~1e-200 Pa) representable without special cases.

use crate::error::{GasError, GasResult};
use crate::mixture::Mixture;
use crate::thermo::species_thermo;
use hf_core::constants::P_STANDARD;
use hf_core::numeric::ensure_positive;
use nalgebra::{DMatrix, DVector};
use tracing::{trace, warn};

const MAX_ITERATIONS: usize = 100;
const RESIDUAL_TOL: f64 = 1e-12;
/// Accepted when round-off stalls the line search
const STALL_TOL: f64 = 1e-9;
const MAX_STEP: f64 = 10.0;
const MAX_BACKTRACKS: usize = 30;

/// Converged equilibrium composition.
#[derive(Debug, Clone, PartialEq)]
pub struct Equilibrium {
    /// Mole fractions aligned with `Mixture::species()`
    pub mole_fractions: Vec<f64>,
    /// Element potentials (warm-start data for nearby states)
    pub potentials: Vec<f64>,
    /// Newton iterations used
    pub iterations: usize,
}

struct Evaluation {
    residual: DVector<f64>,
    /// Scaled partial pressures exp(ln q_i - max)
    q: Vec<f64>,
    /// Scaled element contents Σ a_ie q_i
    n: Vec<f64>,
    q_sum: f64,
}

struct Problem<'a> {
    mixture: &'a Mixture,
    /// g_i°/(RT)
    g: Vec<f64>,
    ln_p: f64,
    ln_b_ratio: Vec<f64>,
}

impl<'a> Problem<'a> {
    fn new(mixture: &'a Mixture, t: f64, p: f64) -> Self {
        let g = mixture
            .species()
            .iter()
            .map(|s| species_thermo(*s, t).g_over_rt(t))
            .collect();
        let b = mixture.element_fractions();
        let ln_b_ratio = (1..b.len()).map(|k| (b[k] / b[0]).ln()).collect();
        Self {
            mixture,
            g,
            ln_p: (p / P_STANDARD).ln(),
            ln_b_ratio,
        }
    }

    fn ln_q(&self, lambda: &DVector<f64>) -> Vec<f64> {
        (0..self.mixture.n_species())
            .map(|i| {
                let mut v = -self.g[i];
                for e in 0..self.mixture.n_elements() {
                    v += self.mixture.atoms(i, e) * lambda[e];
                }
                v
            })
            .collect()
    }

    fn evaluate(&self, lambda: &DVector<f64>) -> Option<Evaluation> {
        let n_el = self.mixture.n_elements();
        let ln_q = self.ln_q(lambda);
        let max = ln_q.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return None;
        }

        let q: Vec<f64> = ln_q.iter().map(|v| (v - max).exp()).collect();
        let q_sum: f64 = q.iter().sum();
        let n: Vec<f64> = (0..n_el)
            .map(|e| {
                q.iter()
                    .enumerate()
                    .map(|(i, qi)| self.mixture.atoms(i, e) * qi)
                    .sum()
            })
            .collect();
        if n.iter().any(|ne| *ne <= 0.0 || !ne.is_finite()) {
            return None;
        }

        let mut residual = DVector::<f64>::zeros(n_el);
        residual[0] = max + q_sum.ln() - self.ln_p;
        for k in 1..n_el {
            residual[k] = (n[k] / n[0]).ln() - self.ln_b_ratio[k - 1];
        }

        residual.iter().all(|r| r.is_finite()).then_some(Evaluation {
            residual,
            q,
            n,
            q_sum,
        })
    }

    fn jacobian(&self, ev: &Evaluation) -> DMatrix<f64> {
        let n_el = self.mixture.n_elements();
        // W[k][j] = Σ_i a_ik a_ij q_i
        let mut w = DMatrix::<f64>::zeros(n_el, n_el);
        for (i, qi) in ev.q.iter().enumerate() {
            for k in 0..n_el {
                let aik = self.mixture.atoms(i, k);
                if aik == 0.0 {
                    continue;
                }
                for j in 0..n_el {
                    w[(k, j)] += aik * self.mixture.atoms(i, j) * qi;
                }
            }
        }

        let mut jac = DMatrix::<f64>::zeros(n_el, n_el);
        for j in 0..n_el {
            jac[(0, j)] = ev.n[j] / ev.q_sum;
        }
        for k in 1..n_el {
            for j in 0..n_el {
                jac[(k, j)] = w[(k, j)] / ev.n[k] - w[(0, j)] / ev.n[0];
            }
        }
        jac
    }

    /// Potentials putting every element in one carrier species.
    fn carrier_guess(&self, molecular: bool) -> DVector<f64> {
        let n_el = self.mixture.n_elements();
        let b = self.mixture.element_fractions();
        let carriers: Vec<usize> = (0..n_el)
            .map(|e| self.mixture.elemental_carrier(e, molecular))
            .collect();

        let moles: Vec<f64> = (0..n_el)
            .map(|e| b[e] / self.mixture.atoms(carriers[e], e))
            .collect();
        let total: f64 = moles.iter().sum();

        DVector::from_iterator(
            n_el,
            (0..n_el).map(|e| {
                let i = carriers[e];
                let x = moles[e] / total;
                (x.ln() + self.ln_p + self.g[i]) / self.mixture.atoms(i, e)
            }),
        )
    }

    fn newton(&self, mut lambda: DVector<f64>) -> Option<(DVector<f64>, Evaluation, usize)> {
        let mut ev = self.evaluate(&lambda)?;
        let mut norm = ev.residual.amax();

        for iter in 0..MAX_ITERATIONS {
            if norm < RESIDUAL_TOL {
                return Some((lambda, ev, iter));
            }

            let jac = self.jacobian(&ev);
            let mut dx = jac.lu().solve(&(-&ev.residual))?;
            let step = dx.amax();
            if !step.is_finite() {
                return None;
            }
            if step > MAX_STEP {
                dx *= MAX_STEP / step;
            }

            let mut alpha = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACKS {
                let trial = &lambda + alpha * &dx;
                if let Some(trial_ev) = self.evaluate(&trial) {
                    let trial_norm = trial_ev.residual.amax();
                    if trial_norm < norm {
                        accepted = Some((trial, trial_ev, trial_norm));
                        break;
                    }
                }
                alpha *= 0.5;
            }

            let Some((next, next_ev, next_norm)) = accepted else {
                return (norm < STALL_TOL).then_some((lambda, ev, iter));
            };
            trace!(iter, residual = next_norm, alpha, "equilibrium newton step");
            lambda = next;
            ev = next_ev;
            norm = next_norm;
        }

        (norm < RESIDUAL_TOL).then_some((lambda, ev, MAX_ITERATIONS))
    }
}

/// Compute the equilibrium composition of `mixture` at temperature `t` [K]
/// and pressure `p` [Pa].
///
/// `guess` supplies element potentials from a nearby converged state; when it
/// fails (or is absent) the solver restarts from the undissociated and then
/// the fully dissociated composition.
pub fn solve_equilibrium(
    mixture: &Mixture,
    t: f64,
    p: f64,
    guess: Option<&[f64]>,
) -> GasResult<Equilibrium> {
    let t = ensure_positive(t, "equilibrium temperature")?;
    let p = ensure_positive(p, "equilibrium pressure")?;

    let problem = Problem::new(mixture, t, p);
    let n_el = mixture.n_elements();

    let mut starts: Vec<DVector<f64>> = Vec::with_capacity(3);
    if let Some(g) = guess.filter(|g| g.len() == n_el) {
        starts.push(DVector::from_column_slice(g));
    }
    starts.push(problem.carrier_guess(true));
    starts.push(problem.carrier_guess(false));

    for (attempt, start) in starts.into_iter().enumerate() {
        if let Some((lambda, ev, iterations)) = problem.newton(start) {
            let mole_fractions = ev.q.iter().map(|qi| qi / ev.q_sum).collect();
            return Ok(Equilibrium {
                mole_fractions,
                potentials: lambda.iter().copied().collect(),
                iterations,
            });
        }
        warn!(attempt, t, p, "equilibrium start failed, retrying");
    }

    Err(GasError::ConvergenceFailed {
        what: "equilibrium composition",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;

    fn fraction(mix: &Mixture, eq: &Equilibrium, s: Species) -> f64 {
        eq.mole_fractions[mix.index_of(s).unwrap()]
    }

    #[test]
    fn cold_air_is_undissociated() {
        let air = Mixture::air5();
        let eq = solve_equilibrium(&air, 300.0, 101_325.0, None).unwrap();
        assert!((fraction(&air, &eq, Species::N2) - 0.79).abs() < 1e-8);
        assert!((fraction(&air, &eq, Species::O2) - 0.21).abs() < 1e-8);
        assert!(fraction(&air, &eq, Species::O) < 1e-20);
    }

    #[test]
    fn hot_air_dissociates_oxygen_first() {
        let air = Mixture::air5();
        let eq = solve_equilibrium(&air, 4000.0, 101_325.0, None).unwrap();
        let x_o = fraction(&air, &eq, Species::O);
        let x_n = fraction(&air, &eq, Species::N);
        assert!(x_o > 0.2, "x_O = {x_o}");
        assert!(x_n < 0.05, "x_N = {x_n}");
        assert!(fraction(&air, &eq, Species::NO) > 1e-3);
    }

    #[test]
    fn very_hot_air_is_atomic() {
        let air = Mixture::air5();
        let eq = solve_equilibrium(&air, 15_000.0, 1_000.0, None).unwrap();
        let atoms = fraction(&air, &eq, Species::N) + fraction(&air, &eq, Species::O);
        assert!(atoms > 0.99, "atomic fraction = {atoms}");
    }

    #[test]
    fn elements_are_conserved() {
        let air = Mixture::air5();
        for (t, p) in [(2500.0, 1e5), (5000.0, 1e3), (9000.0, 1e6)] {
            let eq = solve_equilibrium(&air, t, p, None).unwrap();
            let x = &eq.mole_fractions;
            let n_atoms: f64 = (0..air.n_species()).map(|i| air.atoms(i, 0) * x[i]).sum();
            let o_atoms: f64 = (0..air.n_species()).map(|i| air.atoms(i, 1) * x[i]).sum();
            assert!((n_atoms / o_atoms - 0.79 / 0.21).abs() < 1e-9);
            let sum: f64 = x.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn pressure_suppresses_dissociation() {
        let air = Mixture::air5();
        let low = solve_equilibrium(&air, 5000.0, 1e3, None).unwrap();
        let high = solve_equilibrium(&air, 5000.0, 1e7, None).unwrap();
        assert!(fraction(&air, &low, Species::N) > fraction(&air, &high, Species::N));
    }

    #[test]
    fn warm_start_converges_quickly() {
        let air = Mixture::air5();
        let a = solve_equilibrium(&air, 6000.0, 1e5, None).unwrap();
        let b = solve_equilibrium(&air, 6001.0, 1e5, Some(&a.potentials)).unwrap();
        assert!(b.iterations <= 4, "iterations = {}", b.iterations);
    }

    #[test]
    fn nitrogen_single_element() {
        let n2 = Mixture::nitrogen2();
        let eq = solve_equilibrium(&n2, 8000.0, 1e5, None).unwrap();
        let x_n = fraction(&n2, &eq, Species::N);
        assert!(x_n > 0.0 && x_n < 1.0);
    }

    #[test]
    fn rejects_non_physical_inputs() {
        let air = Mixture::air5();
        assert!(solve_equilibrium(&air, -1.0, 1e5, None).is_err());
        assert!(solve_equilibrium(&air, 300.0, 0.0, None).is_err());
    }
}
