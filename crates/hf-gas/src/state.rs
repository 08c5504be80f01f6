//! Equilibrium thermodynamic state definitions.

use crate::error::{GasError, GasResult};
use hf_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};

/// Input specification for creating an equilibrium state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature.
    PT { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy.
    PH { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy.
    PS { p: Pressure, s: SpecEntropy },
}

/// Equilibrium state: pressure, temperature and the resulting composition.
///
/// Derived properties (density, enthalpy, etc.) are computed on demand
/// via the `GasModel` trait.
#[derive(Debug, Clone, PartialEq)]
pub struct GasState {
    p: Pressure,
    t: Temperature,
    /// Mole fractions aligned with the mixture species
    x: Vec<f64>,
    /// Element potentials of the converged composition
    potentials: Vec<f64>,
}

impl GasState {
    /// Create a state from pressure, temperature, and an equilibrium composition.
    ///
    /// Validates that pressure and temperature are positive and finite.
    pub fn new(
        p: Pressure,
        t: Temperature,
        x: Vec<f64>,
        potentials: Vec<f64>,
    ) -> GasResult<Self> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if x.iter().any(|xi| !xi.is_finite() || *xi < 0.0) {
            return Err(GasError::NonPhysical {
                what: "mole fractions must be finite and non-negative",
            });
        }
        Ok(Self {
            p,
            t,
            x,
            potentials,
        })
    }

    /// Get pressure.
    pub fn pressure(&self) -> Pressure {
        self.p
    }

    /// Get temperature.
    pub fn temperature(&self) -> Temperature {
        self.t
    }

    /// Mole fractions aligned with `Mixture::species()`.
    pub fn mole_fractions(&self) -> &[f64] {
        &self.x
    }

    /// Element potentials, usable as a warm start for nearby states.
    pub fn potentials(&self) -> &[f64] {
        &self.potentials
    }
}
