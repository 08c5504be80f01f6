//! Case file schema definitions.

use crate::measurement::Measurement;
use hf_solver::ForwardOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    /// Mixture name, e.g. `air5` or `nitrogen2`.
    pub mixture: String,
    pub free_stream: FreeStreamDef,
    pub facility: FacilityDef,
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub options: ForwardOptions,
    #[serde(default)]
    pub print_info: bool,
    /// Additional free-stream states evaluated by the batch runner.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sweep: Vec<FreeStreamDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FreeStreamDef {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub mach: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FacilityDef {
    pub throat_area_m2: f64,
    pub nose_radius_m: f64,
    #[serde(default = "default_wall_temperature")]
    pub wall_temperature_k: f64,
    #[serde(default = "default_prandtl")]
    pub prandtl: f64,
    #[serde(default = "default_lewis")]
    pub lewis: f64,
}

fn default_wall_temperature() -> f64 {
    300.0
}

fn default_prandtl() -> f64 {
    0.71
}

fn default_lewis() -> f64 {
    1.0
}

impl Case {
    /// Free-stream states to evaluate: the base state followed by the sweep.
    pub fn free_stream_states(&self) -> Vec<FreeStreamDef> {
        std::iter::once(self.free_stream)
            .chain(self.sweep.iter().copied())
            .collect()
    }
}
