//! Parallel evaluation of independent pre-shock states.

use crate::error::AppResult;
use crate::forward::{Facility, forward};
use crate::measurement_set::MeasurementSet;
use hf_case::Measurement;
use hf_gas::GasModel;
use hf_solver::{ForwardOptions, PreShock};
use rayon::prelude::*;
use tracing::debug;

/// Run the forward model for every state, in parallel.
///
/// Returns one result per state, in input order. A failure at one state does
/// not stop the others.
pub fn run_batch(
    model: &dyn GasModel,
    states: &[PreShock],
    facility: &Facility,
    requested: &[Measurement],
    options: &ForwardOptions,
) -> Vec<AppResult<MeasurementSet>> {
    debug!(states = states.len(), "batch evaluation");
    states
        .par_iter()
        .map(|preshock| forward(model, preshock, facility, requested, options))
        .collect()
}
