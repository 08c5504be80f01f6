//! Measurement identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A quantity the forward model can produce.
///
/// Names are fixed: they appear verbatim in case files, reports and on the
/// command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Measurement {
    #[serde(rename = "Reservoir_temperature")]
    ReservoirTemperature,
    #[serde(rename = "Reservoir_pressure")]
    ReservoirPressure,
    #[serde(rename = "Mass_flow")]
    MassFlow,
    #[serde(rename = "Stagnation_pressure")]
    StagnationPressure,
    #[serde(rename = "Heat_flux")]
    HeatFlux,
    #[serde(rename = "Total_enthalpy")]
    TotalEnthalpy,
    #[serde(rename = "Stagnation_density")]
    StagnationDensity,
    #[serde(rename = "Free_stream_pressure")]
    FreeStreamPressure,
}

impl Measurement {
    pub const ALL: [Measurement; 8] = [
        Measurement::ReservoirTemperature,
        Measurement::ReservoirPressure,
        Measurement::MassFlow,
        Measurement::StagnationPressure,
        Measurement::HeatFlux,
        Measurement::TotalEnthalpy,
        Measurement::StagnationDensity,
        Measurement::FreeStreamPressure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Measurement::ReservoirTemperature => "Reservoir_temperature",
            Measurement::ReservoirPressure => "Reservoir_pressure",
            Measurement::MassFlow => "Mass_flow",
            Measurement::StagnationPressure => "Stagnation_pressure",
            Measurement::HeatFlux => "Heat_flux",
            Measurement::TotalEnthalpy => "Total_enthalpy",
            Measurement::StagnationDensity => "Stagnation_density",
            Measurement::FreeStreamPressure => "Free_stream_pressure",
        }
    }

    /// SI unit label.
    pub fn unit(self) -> &'static str {
        match self {
            Measurement::ReservoirTemperature => "K",
            Measurement::ReservoirPressure
            | Measurement::StagnationPressure
            | Measurement::FreeStreamPressure => "Pa",
            Measurement::MassFlow => "kg/s",
            Measurement::HeatFlux => "W/m^2",
            Measurement::TotalEnthalpy => "J/kg",
            Measurement::StagnationDensity => "kg/m^3",
        }
    }

    pub fn needs_reservoir(self) -> bool {
        matches!(
            self,
            Measurement::ReservoirTemperature | Measurement::ReservoirPressure
        )
    }

    /// Quantities computed behind the normal shock.
    pub fn needs_shock(self) -> bool {
        matches!(
            self,
            Measurement::StagnationPressure
                | Measurement::HeatFlux
                | Measurement::TotalEnthalpy
                | Measurement::StagnationDensity
        )
    }

    /// Whether the measurement is only defined for a supersonic free stream.
    pub fn needs_supersonic(self) -> bool {
        self == Measurement::MassFlow || self.needs_shock()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown measurement '{0}'")]
pub struct UnknownMeasurement(pub String);

impl FromStr for Measurement {
    type Err = UnknownMeasurement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measurement::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMeasurement(s.to_string()))
    }
}
