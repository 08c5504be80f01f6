//! Case loading and evaluation.

use crate::batch::run_batch;
use crate::error::{AppError, AppResult};
use crate::forward::{Facility, forward};
use crate::measurement_set::MeasurementSet;
use hf_case::{Case, FreeStreamDef, Measurement, validate_case};
use hf_core::units::{k, pa};
use hf_gas::{EquilibriumGas, Mixture};
use hf_solver::PreShock;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Result of evaluating one free-stream state of a case.
#[derive(Debug, Clone, Serialize)]
pub struct PointReport {
    pub free_stream: FreeStreamDef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<MeasurementSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of evaluating a whole case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub mixture: String,
    pub measurements: Vec<Measurement>,
    pub points: Vec<PointReport>,
}

impl CaseReport {
    pub fn failures(&self) -> usize {
        self.points.iter().filter(|p| p.error.is_some()).count()
    }
}

/// Load a case file (YAML or JSON by extension) and validate it.
pub fn load_case(path: &Path) -> AppResult<Case> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(hf_case::parse_for_path(path, &content)?)
}

/// Build the equilibrium gas model for a mixture name.
pub fn build_gas_model(mixture: &str) -> AppResult<EquilibriumGas> {
    let mixture: Mixture = mixture.parse()?;
    Ok(EquilibriumGas::new(mixture))
}

pub fn preshock_from_def(def: &FreeStreamDef) -> PreShock {
    PreShock::new(k(def.temperature_k), pa(def.pressure_pa), def.mach)
}

/// Evaluate a case.
///
/// A single free-stream state propagates its error. With a sweep, every state
/// is evaluated and failures are recorded per point.
pub fn run_case(case: &Case) -> AppResult<CaseReport> {
    validate_case(case)?;
    let model = build_gas_model(&case.mixture)?;
    let facility = Facility::from(&case.facility);
    let mut options = case.options.clone();
    options.print_info = case.print_info;

    let states = case.free_stream_states();
    info!(case = %case.name, points = states.len(), "running case");

    let points = if states.len() == 1 {
        let values = forward(
            &model,
            &preshock_from_def(&states[0]),
            &facility,
            &case.measurements,
            &options,
        )?;
        vec![PointReport {
            free_stream: states[0],
            values: Some(values),
            error: None,
        }]
    } else {
        let preshocks: Vec<PreShock> = states.iter().map(preshock_from_def).collect();
        let results = run_batch(&model, &preshocks, &facility, &case.measurements, &options);
        states
            .iter()
            .zip(results)
            .map(|(state, result)| match result {
                Ok(values) => PointReport {
                    free_stream: *state,
                    values: Some(values),
                    error: None,
                },
                Err(e) => {
                    warn!(mach = state.mach, error = %e, "sweep point failed");
                    PointReport {
                        free_stream: *state,
                        values: None,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect()
    };

    Ok(CaseReport {
        name: case.name.clone(),
        mixture: case.mixture.clone(),
        measurements: case.measurements.clone(),
        points,
    })
}

/// Load, validate and evaluate a case file.
pub fn run_case_file(path: &Path) -> AppResult<CaseReport> {
    let case = load_case(path)?;
    run_case(&case)
}
