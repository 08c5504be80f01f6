//! One-shot equilibrium state report for a pair of input properties.

use crate::species::Species;
use crate::{GasError, GasModel, GasResult, StateInput};
use hf_core::units::{Density, Pressure, Temperature, Velocity, k, pa};
use serde::Serialize;
use uom::si::{
    mass_density::kilogram_per_cubic_meter, pressure::pascal, thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPair {
    PT,
    PH,
    PS,
}

impl InputPair {
    pub fn label(self) -> &'static str {
        match self {
            Self::PT => "P-T",
            Self::PH => "P-h",
            Self::PS => "P-s",
        }
    }

    pub fn first_label(self) -> &'static str {
        "Pressure [Pa]"
    }

    pub fn second_label(self) -> &'static str {
        match self {
            Self::PT => "Temperature [K]",
            Self::PH => "Enthalpy [J/kg]",
            Self::PS => "Entropy [J/(kg K)]",
        }
    }
}

impl std::str::FromStr for InputPair {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "p-t" => Ok(Self::PT),
            "ph" | "p-h" => Ok(Self::PH),
            "ps" | "p-s" => Ok(Self::PS),
            _ => Err("unknown input pair (expected pt, ph or ps)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EquilibriumState {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub density: Density,
    pub enthalpy_j_per_kg: f64,
    pub entropy_j_per_kg_k: f64,
    pub cp_frozen_j_per_kg_k: f64,
    pub gamma_frozen: f64,
    pub speed_of_sound: Velocity,
    pub frozen_speed_of_sound: Velocity,
    pub viscosity_pa_s: f64,
    pub molar_mass_kg_per_mol: f64,
    pub composition: Vec<(Species, f64)>,
}

/// Flat SI view of an [`EquilibriumState`] for reports.
#[derive(Debug, Clone, Serialize)]
pub struct EquilibriumReport {
    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub density_kg_m3: f64,
    pub enthalpy_j_per_kg: f64,
    pub entropy_j_per_kg_k: f64,
    pub cp_frozen_j_per_kg_k: f64,
    pub gamma_frozen: f64,
    pub speed_of_sound_m_s: f64,
    pub frozen_speed_of_sound_m_s: f64,
    pub viscosity_pa_s: f64,
    pub molar_mass_kg_per_mol: f64,
    pub mole_fractions: Vec<(String, f64)>,
}

impl EquilibriumState {
    pub fn pressure_pa(&self) -> f64 {
        self.pressure.get::<pascal>()
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature.get::<kelvin>()
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.density.get::<kilogram_per_cubic_meter>()
    }

    pub fn speed_of_sound_m_s(&self) -> f64 {
        self.speed_of_sound.get::<meter_per_second>()
    }

    pub fn report(&self) -> EquilibriumReport {
        EquilibriumReport {
            pressure_pa: self.pressure_pa(),
            temperature_k: self.temperature_k(),
            density_kg_m3: self.density_kg_m3(),
            enthalpy_j_per_kg: self.enthalpy_j_per_kg,
            entropy_j_per_kg_k: self.entropy_j_per_kg_k,
            cp_frozen_j_per_kg_k: self.cp_frozen_j_per_kg_k,
            gamma_frozen: self.gamma_frozen,
            speed_of_sound_m_s: self.speed_of_sound_m_s(),
            frozen_speed_of_sound_m_s: self.frozen_speed_of_sound.get::<meter_per_second>(),
            viscosity_pa_s: self.viscosity_pa_s,
            molar_mass_kg_per_mol: self.molar_mass_kg_per_mol,
            mole_fractions: self
                .composition
                .iter()
                .map(|(s, x)| (s.key().to_string(), *x))
                .collect(),
        }
    }
}

pub fn compute_equilibrium_state(
    model: &dyn GasModel,
    pair: InputPair,
    first: f64,
    second: f64,
) -> GasResult<EquilibriumState> {
    if !first.is_finite() || !second.is_finite() {
        return Err(GasError::InvalidArg {
            what: "input values must be finite",
        });
    }

    let input = match pair {
        InputPair::PT => StateInput::PT {
            p: pa(first),
            t: k(second),
        },
        InputPair::PH => StateInput::PH {
            p: pa(first),
            h: second,
        },
        InputPair::PS => StateInput::PS {
            p: pa(first),
            s: second,
        },
    };

    let state = model.state(input)?;
    let composition = model
        .mixture()
        .species()
        .iter()
        .copied()
        .zip(state.mole_fractions().iter().copied())
        .collect();

    Ok(EquilibriumState {
        pressure: state.pressure(),
        temperature: state.temperature(),
        density: model.rho(&state)?,
        enthalpy_j_per_kg: model.h(&state)?,
        entropy_j_per_kg_k: model.s(&state)?,
        cp_frozen_j_per_kg_k: model.cp(&state)?,
        gamma_frozen: model.gamma(&state)?,
        speed_of_sound: model.a(&state)?,
        frozen_speed_of_sound: model.a_frozen(&state)?,
        viscosity_pa_s: model.mu(&state)?,
        molar_mass_kg_per_mol: model.molar_mass(&state),
        composition,
    })
}
