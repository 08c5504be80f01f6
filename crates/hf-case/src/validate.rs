//! Case validation logic.

use crate::measurement::Measurement;
use crate::schema::{Case, FacilityDef, FreeStreamDef};
use hf_gas::Mixture;
use hf_solver::{ForwardOptions, StagnationOptions};
use std::collections::HashSet;

/// Case file version written by this crate.
pub const CURRENT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Unknown mixture: {name}")]
    UnknownMixture { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No measurements requested")]
    NoMeasurements,

    #[error("Duplicate measurement: {measurement}")]
    DuplicateMeasurement { measurement: Measurement },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > CURRENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.mixture.parse::<Mixture>().is_err() {
        return Err(ValidationError::UnknownMixture {
            name: case.mixture.clone(),
        });
    }

    if case.measurements.is_empty() {
        return Err(ValidationError::NoMeasurements);
    }
    let mut seen = HashSet::new();
    for &measurement in &case.measurements {
        if !seen.insert(measurement) {
            return Err(ValidationError::DuplicateMeasurement { measurement });
        }
    }
    let supersonic = case.measurements.iter().any(|m| m.needs_supersonic());

    validate_free_stream("free_stream", &case.free_stream, supersonic)?;
    for (i, state) in case.sweep.iter().enumerate() {
        validate_free_stream(&format!("sweep[{i}]"), state, supersonic)?;
    }

    validate_facility(&case.facility)?;
    validate_options(&case.options)?;

    Ok(())
}

fn validate_free_stream(
    context: &str,
    state: &FreeStreamDef,
    supersonic: bool,
) -> Result<(), ValidationError> {
    positive(&format!("{context}.temperature_k"), state.temperature_k)?;
    positive(&format!("{context}.pressure_pa"), state.pressure_pa)?;
    if !state.mach.is_finite() || state.mach < 0.0 {
        return Err(invalid(
            format!("{context}.mach"),
            state.mach,
            "must be non-negative and finite",
        ));
    }
    if supersonic && state.mach <= 1.0 {
        return Err(invalid(
            format!("{context}.mach"),
            state.mach,
            "mass flow and post-shock measurements need a supersonic free stream",
        ));
    }
    Ok(())
}

fn validate_facility(facility: &FacilityDef) -> Result<(), ValidationError> {
    positive("facility.throat_area_m2", facility.throat_area_m2)?;
    positive("facility.nose_radius_m", facility.nose_radius_m)?;
    positive("facility.wall_temperature_k", facility.wall_temperature_k)?;
    positive("facility.prandtl", facility.prandtl)?;
    positive("facility.lewis", facility.lewis)?;
    Ok(())
}

fn validate_stagnation(context: &str, options: &StagnationOptions) -> Result<(), ValidationError> {
    positive(&format!("options.{context}.resmin"), options.resmin)?;
    positive(&format!("options.{context}.jacobian_step"), options.jacobian_step)?;
    if options.max_iterations == 0 {
        return Err(invalid(
            format!("options.{context}.max_iterations"),
            0.0,
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_options(options: &ForwardOptions) -> Result<(), ValidationError> {
    validate_stagnation("reservoir", &options.reservoir)?;
    validate_stagnation("total", &options.total)?;

    positive("options.massflow.tol", options.massflow.tol)?;
    positive("options.massflow.bracket_step", options.massflow.bracket_step)?;
    if options.massflow.max_iterations == 0 || options.massflow.max_bracket_steps == 0 {
        return Err(invalid(
            "options.massflow.max_iterations",
            options.massflow.max_iterations as f64,
            "iteration limits must be at least 1",
        ));
    }

    positive("options.shocking.tol", options.shocking.tol)?;
    let relaxation = options.shocking.relaxation;
    if !(relaxation > 0.0 && relaxation <= 1.0) {
        return Err(invalid(
            "options.shocking.relaxation",
            relaxation,
            "must lie in (0, 1]",
        ));
    }
    if options.shocking.max_iterations == 0 {
        return Err(invalid(
            "options.shocking.max_iterations",
            0.0,
            "must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_case() -> Case {
        Case {
            version: CURRENT_VERSION,
            name: "unit".to_string(),
            mixture: "air5".to_string(),
            free_stream: FreeStreamDef {
                temperature_k: 220.0,
                pressure_pa: 1000.0,
                mach: 8.0,
            },
            facility: FacilityDef {
                throat_area_m2: 1e-4,
                nose_radius_m: 0.025,
                wall_temperature_k: 300.0,
                prandtl: 0.71,
                lewis: 1.0,
            },
            measurements: vec![Measurement::HeatFlux, Measurement::FreeStreamPressure],
            options: ForwardOptions::default(),
            print_info: false,
            sweep: vec![],
        }
    }

    #[test]
    fn base_case_validates() {
        validate_case(&base_case()).unwrap();
    }

    #[test]
    fn duplicate_measurement_rejected() {
        let mut case = base_case();
        case.measurements.push(Measurement::HeatFlux);
        assert_eq!(
            validate_case(&case),
            Err(ValidationError::DuplicateMeasurement {
                measurement: Measurement::HeatFlux
            })
        );
    }

    #[test]
    fn subsonic_sweep_entry_rejected_for_shock_measurements() {
        let mut case = base_case();
        case.sweep.push(FreeStreamDef {
            temperature_k: 220.0,
            pressure_pa: 1000.0,
            mach: 0.9,
        });
        let err = validate_case(&case).unwrap_err();
        assert!(err.to_string().contains("sweep[0].mach"));
    }

    #[test]
    fn subsonic_allowed_for_free_stream_only() {
        let mut case = base_case();
        case.measurements = vec![Measurement::FreeStreamPressure];
        case.free_stream.mach = 0.5;
        validate_case(&case).unwrap();
    }

    #[test]
    fn unknown_mixture_and_version() {
        let mut case = base_case();
        case.mixture = "argon".to_string();
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::UnknownMixture { .. })
        ));

        let mut case = base_case();
        case.version = 7;
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::UnsupportedVersion { version: 7 })
        ));
    }

    #[test]
    fn relaxation_out_of_range() {
        let mut case = base_case();
        case.options.shocking.relaxation = 1.5;
        assert!(validate_case(&case).is_err());
    }
}
