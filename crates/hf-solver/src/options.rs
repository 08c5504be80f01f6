//! Per-solver numerical options.
//!
//! All structs deserialize with `#[serde(default)]`, so a case file only needs
//! to name the fields it overrides.

use serde::{Deserialize, Serialize};

/// Options for the reservoir and post-shock total solvers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagnationOptions {
    /// Scaled residual norm accepted as converged.
    pub resmin: f64,
    pub max_iterations: usize,
    /// Relative step of the central-difference Jacobian in (ln T, ln p).
    pub jacobian_step: f64,
}

impl Default for StagnationOptions {
    fn default() -> Self {
        Self {
            resmin: 1e-8,
            max_iterations: 100,
            jacobian_step: 1e-6,
        }
    }
}

/// Options for the sonic-throat (mass flow) solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThroatOptions {
    /// Relative tolerance on the throat pressure.
    pub tol: f64,
    pub max_iterations: usize,
    /// Step in ln p used while expanding the bracket upward from p1.
    pub bracket_step: f64,
    pub max_bracket_steps: usize,
}

impl Default for ThroatOptions {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_iterations: 100,
            bracket_step: 0.5,
            max_bracket_steps: 60,
        }
    }
}

/// Options for the equilibrium normal-shock iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockOptions {
    /// Convergence threshold on the change of the density ratio.
    pub tol: f64,
    pub max_iterations: usize,
    /// Under-relaxation factor in (0, 1].
    pub relaxation: f64,
}

impl Default for ShockOptions {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_iterations: 200,
            relaxation: 1.0,
        }
    }
}

/// Options for every sub-solver the forward model may call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardOptions {
    pub reservoir: StagnationOptions,
    pub massflow: ThroatOptions,
    pub shocking: ShockOptions,
    pub total: StagnationOptions,
    /// Log the pre-shock state at info level. Set from the case, not read from `options:`.
    #[serde(skip)]
    pub print_info: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let opts = ForwardOptions::default();
        assert_eq!(opts.reservoir, opts.total);
        assert!(opts.shocking.relaxation > 0.0 && opts.shocking.relaxation <= 1.0);
        assert!(opts.massflow.bracket_step > 0.0);
    }
}
