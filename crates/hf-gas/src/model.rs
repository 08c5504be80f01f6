//! Gas model trait and validation helpers.

use crate::error::{GasError, GasResult};
use crate::mixture::Mixture;
use crate::state::{GasState, StateInput};
use hf_core::units::{
    Density, Pressure, SpecEnthalpy, SpecEntropy, SpecHeatCapacity, Temperature, Velocity, pa,
};

/// Cached thermodynamic properties from a single state.
///
/// Batches the property queries most solvers need so that each equilibrium
/// state is evaluated once.
#[derive(Clone, Debug)]
pub struct ThermoPropertyPack {
    /// Pressure [Pa]
    pub p: Pressure,
    /// Temperature [K]
    pub t: Temperature,
    /// Density [kg/m³]
    pub rho: Density,
    /// Specific enthalpy [J/kg]
    pub h: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)]
    pub s: SpecEntropy,
    /// Frozen specific heat at constant pressure [J/(kg·K)]
    pub cp: SpecHeatCapacity,
    /// Frozen heat capacity ratio
    pub gamma: f64,
    /// Equilibrium speed of sound [m/s]
    pub a: Velocity,
}

impl ThermoPropertyPack {
    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Pack(P={:.1}Pa,T={:.1}K,ρ={:.4e}kg/m³,h={:.4e}J/kg,s={:.1}J/kg·K,γ={:.3},a={:.1}m/s)",
            self.p.value, self.t.value, self.rho.value, self.h, self.s, self.gamma, self.a.value
        )
    }
}

/// Trait for equilibrium gas models.
///
/// Implementations must be thread-safe (Send + Sync) to support parallel evaluation.
/// All methods should validate inputs and outputs for physical plausibility.
pub trait GasModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// The reacting mixture this model equilibrates.
    fn mixture(&self) -> &Mixture;

    /// Create an equilibrium state from input specification.
    ///
    /// For PT input: equilibrates directly.
    /// For PH / PS input: solves for temperature, then equilibrates.
    fn state(&self, input: StateInput) -> GasResult<GasState>;

    /// Density [kg/m³].
    fn rho(&self, state: &GasState) -> GasResult<Density>;

    /// Specific enthalpy [J/kg].
    fn h(&self, state: &GasState) -> GasResult<SpecEnthalpy>;

    /// Specific entropy [J/(kg·K)].
    fn s(&self, state: &GasState) -> GasResult<SpecEntropy>;

    /// Frozen specific heat at constant pressure [J/(kg·K)].
    fn cp(&self, state: &GasState) -> GasResult<SpecHeatCapacity>;

    /// Frozen heat capacity ratio.
    fn gamma(&self, state: &GasState) -> GasResult<f64>;

    /// Frozen speed of sound [m/s].
    fn a_frozen(&self, state: &GasState) -> GasResult<Velocity>;

    /// Equilibrium speed of sound [m/s].
    fn a(&self, state: &GasState) -> GasResult<Velocity>;

    /// Dynamic viscosity [Pa·s].
    fn mu(&self, state: &GasState) -> GasResult<f64>;

    /// Chemical (formation) part of the specific enthalpy [J/kg].
    fn chemical_enthalpy(&self, state: &GasState) -> GasResult<SpecEnthalpy>;

    /// Equilibrium state at pressure `p` [Pa] on the isentrope through `state`.
    fn isentropic_state(&self, state: &GasState, p: f64) -> GasResult<GasState> {
        let s = self.s(state)?;
        self.state(StateInput::PS { p: pa(p), s })
    }

    /// Mixture molar mass [kg/mol].
    fn molar_mass(&self, state: &GasState) -> f64 {
        self.mixture().molar_mass(state.mole_fractions())
    }

    /// Compute a complete property pack in one call.
    fn property_pack(&self, state: &GasState) -> GasResult<ThermoPropertyPack> {
        Ok(ThermoPropertyPack {
            p: state.pressure(),
            t: state.temperature(),
            rho: self.rho(state)?,
            h: self.h(state)?,
            s: self.s(state)?,
            cp: self.cp(state)?,
            gamma: self.gamma(state)?,
            a: self.a(state)?,
        })
    }
}

/// Validation helpers for gas properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> GasResult<()> {
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure specific heat capacity is positive and finite.
    pub fn validate_cp(cp: f64) -> GasResult<()> {
        if !cp.is_finite() || cp <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "cp must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure gamma (heat capacity ratio) is physically plausible.
    pub fn validate_gamma(gamma: f64) -> GasResult<()> {
        if !gamma.is_finite() || gamma < 1.0 {
            return Err(GasError::NonPhysical {
                what: "gamma must be >= 1 and finite",
            });
        }
        Ok(())
    }

    /// Ensure speed of sound is positive and finite.
    pub fn validate_speed_of_sound(a: Velocity) -> GasResult<()> {
        if !a.value.is_finite() || a.value <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "speed of sound must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure a specific property is finite (enthalpy and entropy can be negative).
    pub fn validate_finite(v: f64, what: &'static str) -> GasResult<()> {
        if !v.is_finite() {
            return Err(GasError::NonPhysical { what });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use hf_core::units::{kg_per_m3, mps};

    #[test]
    fn validate_density_positive() {
        assert!(validate_density(kg_per_m3(1.2)).is_ok());
        assert!(validate_density(kg_per_m3(-1.0)).is_err());
        assert!(validate_density(kg_per_m3(0.0)).is_err());
    }

    #[test]
    fn validate_cp_positive() {
        assert!(validate_cp(1000.0).is_ok());
        assert!(validate_cp(-100.0).is_err());
        assert!(validate_cp(0.0).is_err());
    }

    #[test]
    fn validate_gamma_physical() {
        assert!(validate_gamma(1.4).is_ok());
        assert!(validate_gamma(1.0).is_ok());
        assert!(validate_gamma(0.9).is_err());
        assert!(validate_gamma(f64::NAN).is_err());
    }

    #[test]
    fn validate_sound_speed() {
        assert!(validate_speed_of_sound(mps(340.0)).is_ok());
        assert!(validate_speed_of_sound(mps(0.0)).is_err());
    }

    #[test]
    fn validate_finite_rejects_infinity() {
        assert!(validate_finite(-2.0e5, "h").is_ok());
        assert!(validate_finite(f64::INFINITY, "h").is_err());
    }
}
