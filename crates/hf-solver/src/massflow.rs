//! Sonic throat on the free-stream isentrope.
//!
//! The nozzle expands the reservoir gas isentropically, so the throat lies on
//! the isentrope through the free stream where the local flow speed equals
//! the equilibrium speed of sound: `h(p*) + a(p*)^2 / 2 = h1`.

use crate::error::{SolverError, SolverResult};
use crate::free_stream::FreeStream;
use crate::options::ThroatOptions;
use hf_core::roots::{BrentConfig, brent, expand_bracket};
use hf_core::units::{Area, Density, MassRate, Pressure, Temperature, Velocity, kgps};
use hf_gas::{GasModel, GasState};
use tracing::debug;

/// Sonic conditions at the nozzle throat.
#[derive(Clone, Debug)]
pub struct ThroatState {
    pub t: Temperature,
    pub p: Pressure,
    pub rho: Density,
    /// Throat velocity, equal to the equilibrium speed of sound there
    pub v: Velocity,
    pub mdot: MassRate,
    pub state: GasState,
}

/// Nozzle mass flow `rho* a* A_t` for the given free stream.
///
/// The free stream must be supersonic: the sonic point is searched upward in
/// pressure from p1.
pub fn massflow(
    model: &dyn GasModel,
    free_stream: &FreeStream,
    throat_area: Area,
    options: &ThroatOptions,
) -> SolverResult<ThroatState> {
    if !(free_stream.mach > 1.0) {
        return Err(SolverError::invalid(format!(
            "mass flow requires a supersonic free stream, got M1 = {}",
            free_stream.mach
        )));
    }
    let area = throat_area.value;
    if !(area.is_finite() && area > 0.0) {
        return Err(SolverError::invalid("throat area must be positive"));
    }

    let h_total = free_stream.h_total;
    let scale = h_total.abs().max(0.5 * free_stream.v.value.powi(2));
    let mut last = free_stream.state.clone();
    // Residual in ln p, scaled by the total enthalpy.
    let mut sonic_defect = |ln_p: f64| -> SolverResult<f64> {
        let state = model.isentropic_state(&last, ln_p.exp())?;
        let h = model.h(&state)?;
        let a = model.a(&state)?.value;
        last = state;
        Ok((h + 0.5 * a * a - h_total) / scale)
    };

    let ln_p1 = free_stream.pressure().value.ln();
    let bracket = expand_bracket(
        &mut sonic_defect,
        ln_p1,
        options.bracket_step,
        options.max_bracket_steps,
    )?;

    let config = BrentConfig {
        x_abs_tol: options.tol,
        x_rel_tol: 0.0,
        residual_tol: 0.0,
        max_iters: options.max_iterations,
    };
    let root = brent(&mut sonic_defect, bracket, &config)?;

    let state = model.isentropic_state(&free_stream.state, root.x.exp())?;
    let rho = model.rho(&state)?;
    let a = model.a(&state)?;
    let mdot = rho.value * a.value * area;

    debug!(
        t = state.temperature().value,
        p = state.pressure().value,
        mdot,
        iterations = root.iterations,
        "sonic throat"
    );

    Ok(ThroatState {
        t: state.temperature(),
        p: state.pressure(),
        rho,
        v: a,
        mdot: kgps(mdot),
        state,
    })
}
