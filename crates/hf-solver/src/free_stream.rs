//! Pre-shock (free-stream) conditions.

use crate::error::{SolverError, SolverResult};
use hf_core::units::{Density, Pressure, SpecEnthalpy, SpecEntropy, Temperature, Velocity, mps};
use hf_gas::{GasModel, GasState, StateInput};
use tracing::debug;

/// Measured free-stream state ahead of the shock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreShock {
    pub t: Temperature,
    pub p: Pressure,
    /// Mach number based on the equilibrium speed of sound.
    pub mach: f64,
}

impl PreShock {
    pub fn new(t: Temperature, p: Pressure, mach: f64) -> Self {
        Self { t, p, mach }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !(self.t.value.is_finite() && self.t.value > 0.0) {
            return Err(SolverError::invalid("free-stream temperature must be positive"));
        }
        if !(self.p.value.is_finite() && self.p.value > 0.0) {
            return Err(SolverError::invalid("free-stream pressure must be positive"));
        }
        if !(self.mach.is_finite() && self.mach >= 0.0) {
            return Err(SolverError::invalid("free-stream Mach number must be non-negative"));
        }
        Ok(())
    }
}

/// Equilibrated free stream with its derived flow quantities.
#[derive(Clone, Debug)]
pub struct FreeStream {
    pub state: GasState,
    pub mach: f64,
    pub rho: Density,
    /// Equilibrium speed of sound
    pub a: Velocity,
    /// Flow velocity `M1 * a`
    pub v: Velocity,
    /// Static specific enthalpy [J/kg]
    pub h: SpecEnthalpy,
    /// Total specific enthalpy `h + v^2/2` [J/kg]
    pub h_total: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)]
    pub s: SpecEntropy,
}

impl FreeStream {
    pub fn temperature(&self) -> Temperature {
        self.state.temperature()
    }

    pub fn pressure(&self) -> Pressure {
        self.state.pressure()
    }
}

/// Equilibrate the free stream at (T1, p1) and derive v1, h1 and s1.
pub fn free_stream(model: &dyn GasModel, preshock: &PreShock) -> SolverResult<FreeStream> {
    preshock.validate()?;

    let state = model.state(StateInput::PT {
        p: preshock.p,
        t: preshock.t,
    })?;
    let rho = model.rho(&state)?;
    let a = model.a(&state)?;
    let v = preshock.mach * a.value;
    let h = model.h(&state)?;
    let s = model.s(&state)?;
    let h_total = h + 0.5 * v * v;

    debug!(
        t = preshock.t.value,
        p = preshock.p.value,
        mach = preshock.mach,
        v,
        h_total,
        "free stream"
    );

    Ok(FreeStream {
        state,
        mach: preshock.mach,
        rho,
        a,
        v: mps(v),
        h,
        h_total,
        s,
    })
}
