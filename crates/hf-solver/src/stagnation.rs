//! Adiabatic, isentropic stagnation of an equilibrium flow.
//!
//! The same solve serves two purposes: the nozzle reservoir state (from the
//! free stream) and the post-shock total state (from the gas behind the
//! normal shock). Both conserve total enthalpy and entropy.

use crate::error::{SolverError, SolverResult};
use crate::free_stream::FreeStream;
use crate::jacobian::central_difference_jacobian;
use crate::newton::{NewtonConfig, newton_solve};
use crate::options::StagnationOptions;
use crate::shock::PostShock;
use hf_core::constants::R_UNIVERSAL;
use hf_core::units::{Pressure, Temperature, Velocity, k, mps, pa};
use hf_gas::{GasModel, GasState, StateInput};
use nalgebra::DVector;
use tracing::debug;

/// Largest change of ln T or ln p in one Newton step.
const MAX_LOG_STEP: f64 = 0.5;

/// Conserved quantities and starting point of a stagnation solve.
#[derive(Clone, Copy, Debug)]
pub struct StagnationInput {
    /// Total specific enthalpy to reach [J/kg]
    pub h_total: f64,
    /// Specific entropy to hold [J/(kg·K)]
    pub s: f64,
    pub t_guess: f64,
    pub p_guess: f64,
}

/// Converged stagnation state.
#[derive(Clone, Debug)]
pub struct StagnationState {
    pub t: Temperature,
    pub p: Pressure,
    /// Residual velocity `sqrt(2 max(0, h_total - h))`
    pub v: Velocity,
    pub state: GasState,
    pub iterations: usize,
}

/// Find (T, p) with `h(T, p) = h_total` and `s(T, p) = s`.
///
/// `label` names the solve in logs and errors.
pub fn stagnation(
    model: &dyn GasModel,
    input: StagnationInput,
    label: &str,
    options: &StagnationOptions,
) -> SolverResult<StagnationState> {
    for (value, what) in [
        (input.h_total, "total enthalpy"),
        (input.s, "entropy"),
        (input.t_guess, "temperature guess"),
        (input.p_guess, "pressure guess"),
    ] {
        if !value.is_finite() {
            return Err(SolverError::invalid(format!("{label}: {what} must be finite")));
        }
    }
    if input.t_guess <= 0.0 || input.p_guess <= 0.0 {
        return Err(SolverError::invalid(format!(
            "{label}: initial temperature and pressure must be positive"
        )));
    }

    let r_gas = R_UNIVERSAL / model.mixture().cold_composition().molar_mass();
    let h_scale = input.h_total.abs().max(1000.0 * r_gas);

    let eval = |y: &DVector<f64>| -> SolverResult<GasState> {
        Ok(model.state(StateInput::PT {
            p: pa(y[1].exp()),
            t: k(y[0].exp()),
        })?)
    };
    let residual = |y: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let state = eval(y)?;
        Ok(DVector::from_vec(vec![
            (model.h(&state)? - input.h_total) / h_scale,
            (model.s(&state)? - input.s) / r_gas,
        ]))
    };
    let jacobian = |y: &DVector<f64>| central_difference_jacobian(y, residual, options.jacobian_step);

    let config = NewtonConfig {
        max_iterations: options.max_iterations,
        abs_tol: options.resmin,
        rel_tol: 0.0,
        stall_tol: 1e2 * options.resmin,
        max_step: MAX_LOG_STEP,
        ..NewtonConfig::default()
    };

    let y0 = DVector::from_vec(vec![input.t_guess.ln(), input.p_guess.ln()]);
    let result = newton_solve(y0, residual, jacobian, &config).map_err(|e| match e {
        SolverError::ConvergenceFailed { what } => SolverError::ConvergenceFailed {
            what: format!("{label}: {what}"),
        },
        other => other,
    })?;

    let state = eval(&result.x)?;
    let h = model.h(&state)?;
    let v = (2.0 * (input.h_total - h).max(0.0)).sqrt();

    debug!(
        label,
        t = state.temperature().value,
        p = state.pressure().value,
        iterations = result.iterations,
        residual = result.residual_norm,
        "stagnation converged"
    );

    Ok(StagnationState {
        t: state.temperature(),
        p: state.pressure(),
        v: mps(v),
        state,
        iterations: result.iterations,
    })
}

/// Perfect-gas stagnation estimate with the frozen heat capacity ratio.
fn frozen_estimate(model: &dyn GasModel, state: &GasState, v: f64) -> SolverResult<(f64, f64)> {
    let gamma = model.gamma(state)?;
    let a = model.a_frozen(state)?.value;
    let mach = v / a;
    let ratio = 1.0 + 0.5 * (gamma - 1.0) * mach * mach;
    let t = state.temperature().value * ratio;
    let p = state.pressure().value * ratio.powf(gamma / (gamma - 1.0));
    Ok((t, p))
}

/// Reservoir (nozzle supply) state from the free stream's (h1, s1).
pub fn reservoir(
    model: &dyn GasModel,
    free_stream: &FreeStream,
    options: &StagnationOptions,
) -> SolverResult<StagnationState> {
    let (t_guess, p_guess) = frozen_estimate(model, &free_stream.state, free_stream.v.value)?;
    stagnation(
        model,
        StagnationInput {
            h_total: free_stream.h_total,
            s: free_stream.s,
            t_guess,
            p_guess,
        },
        "reservoir",
        options,
    )
}

/// Post-shock total state from (T2, p2, v2).
pub fn total(
    model: &dyn GasModel,
    post_shock: &PostShock,
    options: &StagnationOptions,
) -> SolverResult<StagnationState> {
    let state = &post_shock.state;
    let v2 = post_shock.v.value;
    let h_total = model.h(state)? + 0.5 * v2 * v2;
    let s = model.s(state)?;
    let (t_guess, p_guess) = frozen_estimate(model, state, v2)?;
    stagnation(
        model,
        StagnationInput {
            h_total,
            s,
            t_guess,
            p_guess,
        },
        "total",
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free_stream::{PreShock, free_stream};
    use hf_gas::EquilibriumGas;

    #[test]
    fn zero_velocity_returns_the_same_state() {
        let gas = EquilibriumGas::air5();
        let fs = free_stream(&gas, &PreShock::new(k(500.0), pa(2.0e5), 0.0)).unwrap();
        let res = reservoir(&gas, &fs, &StagnationOptions::default()).unwrap();

        assert!((res.t.value - 500.0).abs() < 1e-4);
        assert!((res.p.value / 2.0e5 - 1.0).abs() < 1e-6);
        assert!(res.v.value < 1.0);
    }

    #[test]
    fn conserves_enthalpy_and_entropy() {
        let gas = EquilibriumGas::air5();
        let fs = free_stream(&gas, &PreShock::new(k(250.0), pa(5.0e3), 4.0)).unwrap();
        let res = reservoir(&gas, &fs, &StagnationOptions::default()).unwrap();

        let h0 = gas.h(&res.state).unwrap();
        let s0 = gas.s(&res.state).unwrap();
        assert!((h0 - fs.h_total).abs() / fs.h_total.abs() < 1e-6);
        assert!((s0 - fs.s).abs() < 1e-4);
        assert!(res.t.value > 250.0);
        assert!(res.p.value > 5.0e3);
    }

    #[test]
    fn rejects_non_positive_guess() {
        let gas = EquilibriumGas::air5();
        let input = StagnationInput {
            h_total: 1.0e5,
            s: 7000.0,
            t_guess: 0.0,
            p_guess: 1.0e5,
        };
        let err = stagnation(&gas, input, "test", &StagnationOptions::default()).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));
    }
}
