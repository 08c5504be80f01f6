//! Fay-Riddell stagnation-point heat flux.

use crate::error::{SolverError, SolverResult};
use hf_core::units::{HeatFlux, Length, Pressure, Temperature, w_per_m2};
use hf_gas::{GasModel, StateInput};
use tracing::debug;

/// Fay-Riddell leading coefficient for an axisymmetric stagnation point.
const FAY_RIDDELL: f64 = 0.763;

/// Edge and wall conditions for the heat-flux correlation.
#[derive(Clone, Copy, Debug)]
pub struct HeatFluxInput {
    pub prandtl: f64,
    pub lewis: f64,
    /// Free-stream static pressure
    pub p_inf: Pressure,
    /// Boundary-layer edge (stagnation) pressure
    pub p_e: Pressure,
    /// Boundary-layer edge (stagnation) temperature
    pub t_e: Temperature,
    /// Edge total enthalpy [J/kg]
    pub h_e: f64,
    /// Effective nose radius
    pub nose_radius: Length,
    pub t_wall: Temperature,
}

/// Heat flux together with the intermediate edge and wall quantities.
#[derive(Clone, Copy, Debug)]
pub struct HeatFluxState {
    pub q: HeatFlux,
    /// Newtonian stagnation-point velocity gradient [1/s]
    pub velocity_gradient: f64,
    pub rho_e: f64,
    pub mu_e: f64,
    pub rho_w: f64,
    pub mu_w: f64,
    pub h_w: f64,
    /// Chemical (dissociation) enthalpy at the edge [J/kg]
    pub h_d: f64,
}

fn require_positive(value: f64, what: &str) -> SolverResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SolverError::invalid(format!("{what} must be positive, got {value}")))
    }
}

/// Equilibrium stagnation-point heat flux to a cold wall.
///
/// ```text
/// q = 0.763 Pr^-0.6 (rho_w mu_w)^0.1 (rho_e mu_e)^0.4 sqrt(du/dx) (h_e - h_w)
///     [1 + (Le^0.52 - 1) h_D / h_e]
/// du/dx = sqrt(2 (p_e - p_inf) / rho_e) / R
/// ```
pub fn heatflux(model: &dyn GasModel, input: &HeatFluxInput) -> SolverResult<HeatFluxState> {
    require_positive(input.prandtl, "Prandtl number")?;
    require_positive(input.lewis, "Lewis number")?;
    require_positive(input.nose_radius.value, "nose radius")?;
    require_positive(input.t_wall.value, "wall temperature")?;
    require_positive(input.t_e.value, "edge temperature")?;
    if !input.h_e.is_finite() || input.h_e == 0.0 {
        return Err(SolverError::invalid("edge enthalpy must be finite and non-zero"));
    }
    let p_inf = input.p_inf.value;
    let p_e = input.p_e.value;
    if !(p_e.is_finite() && p_inf.is_finite() && p_e > p_inf) {
        return Err(SolverError::invalid(format!(
            "stagnation pressure {p_e} must exceed free-stream pressure {p_inf}"
        )));
    }

    let edge = model.state(StateInput::PT {
        p: input.p_e,
        t: input.t_e,
    })?;
    let wall = model.state(StateInput::PT {
        p: input.p_e,
        t: input.t_wall,
    })?;

    let rho_e = model.rho(&edge)?.value;
    let mu_e = model.mu(&edge)?;
    let h_d = model.chemical_enthalpy(&edge)?;
    let rho_w = model.rho(&wall)?.value;
    let mu_w = model.mu(&wall)?;
    let h_w = model.h(&wall)?;

    let velocity_gradient = (2.0 * (p_e - p_inf) / rho_e).sqrt() / input.nose_radius.value;
    let diffusion = 1.0 + (input.lewis.powf(0.52) - 1.0) * h_d / input.h_e;

    let q = FAY_RIDDELL
        * input.prandtl.powf(-0.6)
        * (rho_w * mu_w).powf(0.1)
        * (rho_e * mu_e).powf(0.4)
        * velocity_gradient.sqrt()
        * (input.h_e - h_w)
        * diffusion;

    if !q.is_finite() {
        return Err(SolverError::Numeric {
            what: "heat flux evaluated to a non-finite value".into(),
        });
    }
    debug!(q, velocity_gradient, h_d, "stagnation heat flux");

    Ok(HeatFluxState {
        q: w_per_m2(q),
        velocity_gradient,
        rho_e,
        mu_e,
        rho_w,
        mu_w,
        h_w,
        h_d,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::units::{k, m, pa};
    use hf_gas::EquilibriumGas;

    fn input(gas: &EquilibriumGas) -> HeatFluxInput {
        let edge = gas
            .state(StateInput::PT {
                p: pa(5.0e4),
                t: k(4000.0),
            })
            .unwrap();
        HeatFluxInput {
            prandtl: 0.71,
            lewis: 1.0,
            p_inf: pa(200.0),
            p_e: pa(5.0e4),
            t_e: k(4000.0),
            h_e: gas.h(&edge).unwrap(),
            nose_radius: m(0.025),
            t_wall: k(300.0),
        }
    }

    #[test]
    fn unit_lewis_number_drops_diffusion_term() {
        let gas = EquilibriumGas::air5();
        let inp = input(&gas);
        let out = heatflux(&gas, &inp).unwrap();

        let expected = 0.763
            * 0.71_f64.powf(-0.6)
            * (out.rho_w * out.mu_w).powf(0.1)
            * (out.rho_e * out.mu_e).powf(0.4)
            * out.velocity_gradient.sqrt()
            * (inp.h_e - out.h_w);
        assert!((out.q.value - expected).abs() <= 1e-9 * expected.abs());
        assert!(out.q.value > 0.0);
        assert!(out.h_d > 0.0);
    }

    #[test]
    fn lewis_number_above_one_increases_flux() {
        let gas = EquilibriumGas::air5();
        let base = heatflux(&gas, &input(&gas)).unwrap();
        let le14 = heatflux(
            &gas,
            &HeatFluxInput {
                lewis: 1.4,
                ..input(&gas)
            },
        )
        .unwrap();
        assert!(le14.q.value > base.q.value);
    }

    #[test]
    fn larger_nose_lowers_flux() {
        let gas = EquilibriumGas::air5();
        let small = heatflux(&gas, &input(&gas)).unwrap();
        let big = heatflux(
            &gas,
            &HeatFluxInput {
                nose_radius: m(0.1),
                ..input(&gas)
            },
        )
        .unwrap();
        // q scales with R^-1/2
        assert!((small.q.value / big.q.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_invalid_geometry_and_pressures() {
        let gas = EquilibriumGas::air5();
        let bad_radius = HeatFluxInput {
            nose_radius: m(0.0),
            ..input(&gas)
        };
        assert!(heatflux(&gas, &bad_radius).is_err());

        let bad_pressure = HeatFluxInput {
            p_inf: pa(6.0e4),
            ..input(&gas)
        };
        assert!(heatflux(&gas, &bad_pressure).is_err());

        let bad_prandtl = HeatFluxInput {
            prandtl: -0.7,
            ..input(&gas)
        };
        assert!(heatflux(&gas, &bad_prandtl).is_err());
    }
}
