//! Equilibrium normal shock.
//!
//! Rankine-Hugoniot across a stationary normal shock, written in terms of the
//! density ratio `eps = rho1 / rho2`:
//!
//! ```text
//! p2 = p1 + rho1 v1^2 (1 - eps)
//! h2 = h1 + v1^2 (1 - eps^2) / 2
//! v2 = eps v1
//! ```
//!
//! Given `eps`, the downstream state follows from an equilibrium (p, h)
//! inversion, which yields a new `eps`. The iteration starts from the
//! frozen-gamma perfect-gas ratio.

use crate::error::{SolverError, SolverResult};
use crate::free_stream::{FreeStream, PreShock, free_stream};
use crate::options::ShockOptions;
use hf_core::units::{Density, Pressure, Temperature, Velocity, mps, pa};
use hf_gas::{GasModel, GasState, StateInput};
use tracing::{debug, trace};

/// Gas state behind the shock.
#[derive(Clone, Debug)]
pub struct PostShock {
    pub t: Temperature,
    pub p: Pressure,
    pub v: Velocity,
    pub rho: Density,
    pub state: GasState,
    /// Converged `rho1 / rho2`
    pub density_ratio: f64,
    pub iterations: usize,
}

/// Solve the shock standing in an already equilibrated free stream.
pub fn normal_shock(
    model: &dyn GasModel,
    free_stream: &FreeStream,
    options: &ShockOptions,
) -> SolverResult<PostShock> {
    if !(free_stream.mach > 1.0) {
        return Err(SolverError::invalid(format!(
            "normal shock requires supersonic flow, got M1 = {}",
            free_stream.mach
        )));
    }
    if !(options.relaxation > 0.0 && options.relaxation <= 1.0) {
        return Err(SolverError::invalid("shock relaxation must lie in (0, 1]"));
    }

    let p1 = free_stream.pressure().value;
    let rho1 = free_stream.rho.value;
    let v1 = free_stream.v.value;
    let h1 = free_stream.h;

    let gamma = model.gamma(&free_stream.state)?;
    let m_frozen = v1 / model.a_frozen(&free_stream.state)?.value;
    let m2 = m_frozen * m_frozen;
    let mut eps = ((gamma - 1.0) * m2 + 2.0) / ((gamma + 1.0) * m2);
    // A frozen Mach number below one would give eps >= 1 (no compression).
    if !(eps > 0.0 && eps < 1.0) {
        eps = 0.5;
    }

    let downstream = |eps: f64| -> SolverResult<GasState> {
        let p2 = p1 + rho1 * v1 * v1 * (1.0 - eps);
        let h2 = h1 + 0.5 * v1 * v1 * (1.0 - eps * eps);
        Ok(model.state(StateInput::PH { p: pa(p2), h: h2 })?)
    };

    for iter in 1..=options.max_iterations {
        let state = downstream(eps)?;
        let eps_new = rho1 / model.rho(&state)?.value;
        let change = eps_new - eps;
        trace!(iter, eps, eps_new, "shock iteration");

        eps += options.relaxation * change;

        if change.abs() < options.tol {
            let state = downstream(eps)?;
            let rho2 = model.rho(&state)?;
            debug!(
                iterations = iter,
                t2 = state.temperature().value,
                p2 = state.pressure().value,
                density_ratio = eps,
                "normal shock converged"
            );
            return Ok(PostShock {
                t: state.temperature(),
                p: state.pressure(),
                v: mps(eps * v1),
                rho: rho2,
                state,
                density_ratio: eps,
                iterations: iter,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "normal shock did not converge in {} iterations",
            options.max_iterations
        ),
    })
}

/// Equilibrate the free stream at (T1, p1, M1) and solve the shock.
pub fn shock(
    model: &dyn GasModel,
    preshock: &PreShock,
    options: &ShockOptions,
) -> SolverResult<PostShock> {
    let fs = free_stream(model, preshock)?;
    normal_shock(model, &fs, options)
}
