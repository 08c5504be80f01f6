//! Forward model: measurements from a pre-shock state.
//!
//! Each group of measurements is tied to one chain of sub-solvers, and a chain
//! only runs when at least one of its measurements is requested:
//!
//! | Measurements                                        | Chain                      |
//! |-----------------------------------------------------|----------------------------|
//! | reservoir temperature / pressure                    | reservoir                  |
//! | mass flow                                           | sonic throat               |
//! | stagnation pressure / density, total enthalpy, heat flux | shock, total, heat flux |
//! | free-stream pressure                                | none                       |

use crate::error::{AppError, AppResult};
use crate::measurement_set::MeasurementSet;
use hf_case::{FacilityDef, Measurement};
use hf_core::units::{Area, Length, Temperature, k, m, m2};
use hf_gas::GasModel;
use hf_solver::{
    ForwardOptions, HeatFluxInput, PreShock, free_stream, heatflux, massflow, normal_shock,
    reservoir, total,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Facility geometry and wall conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Facility {
    pub throat_area: Area,
    /// Effective nose radius of the stagnation probe
    pub nose_radius: Length,
    pub wall_temperature: Temperature,
    pub prandtl: f64,
    pub lewis: f64,
}

impl Facility {
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("throat area", self.throat_area.value),
            ("nose radius", self.nose_radius.value),
            ("wall temperature", self.wall_temperature.value),
            ("Prandtl number", self.prandtl),
            ("Lewis number", self.lewis),
        ];
        for (what, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(AppError::InvalidInput(format!(
                    "{what} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl From<&FacilityDef> for Facility {
    fn from(def: &FacilityDef) -> Self {
        Self {
            throat_area: m2(def.throat_area_m2),
            nose_radius: m(def.nose_radius_m),
            wall_temperature: k(def.wall_temperature_k),
            prandtl: def.prandtl,
            lewis: def.lewis,
        }
    }
}

/// Evaluate the requested measurements for one pre-shock state.
///
/// Results come back in request order; a repeated request yields one entry.
pub fn forward(
    model: &dyn GasModel,
    preshock: &PreShock,
    facility: &Facility,
    requested: &[Measurement],
    options: &ForwardOptions,
) -> AppResult<MeasurementSet> {
    if options.print_info {
        info!(
            t = preshock.t.value,
            p = preshock.p.value,
            mach = preshock.mach,
            "pre-shock state"
        );
    }
    facility.validate()?;

    let fs = free_stream(model, preshock)?;
    if options.print_info {
        let pack = model.property_pack(&fs.state)?;
        info!(v = fs.v.value, h_total = fs.h_total, "free stream {}", pack.summary());
    }
    let wants = |pred: fn(&Measurement) -> bool| requested.iter().any(pred);
    let mut values: HashMap<Measurement, f64> = HashMap::new();

    if wants(|m| m.needs_reservoir()) {
        let res = reservoir(model, &fs, &options.reservoir)?;
        values.insert(Measurement::ReservoirTemperature, res.t.value);
        values.insert(Measurement::ReservoirPressure, res.p.value);
    }

    if wants(|m| *m == Measurement::MassFlow) {
        let throat = massflow(model, &fs, facility.throat_area, &options.massflow)?;
        values.insert(Measurement::MassFlow, throat.mdot.value);
    }

    if wants(|m| m.needs_shock()) {
        let post = normal_shock(model, &fs, &options.shocking)?;
        let stag = total(model, &post, &options.total)?;
        let ht2 = model.h(&stag.state)?;
        let rho_t2 = model.rho(&stag.state)?.value;

        values.insert(Measurement::StagnationPressure, stag.p.value);
        values.insert(Measurement::TotalEnthalpy, ht2);
        values.insert(Measurement::StagnationDensity, rho_t2);

        if wants(|m| *m == Measurement::HeatFlux) {
            let q = heatflux(
                model,
                &HeatFluxInput {
                    prandtl: facility.prandtl,
                    lewis: facility.lewis,
                    p_inf: fs.pressure(),
                    p_e: stag.p,
                    t_e: stag.t,
                    h_e: ht2,
                    nose_radius: facility.nose_radius,
                    t_wall: facility.wall_temperature,
                },
            )?;
            values.insert(Measurement::HeatFlux, q.q.value);
        }
    }

    values.insert(Measurement::FreeStreamPressure, preshock.p.value);

    let mut set = MeasurementSet::new();
    for &measurement in requested {
        let value = values.get(&measurement).copied().ok_or_else(|| {
            AppError::Solver(format!("no solver produced {measurement}"))
        })?;
        set.insert(measurement, value);
    }
    debug!(count = set.len(), "forward model evaluated");
    Ok(set)
}
