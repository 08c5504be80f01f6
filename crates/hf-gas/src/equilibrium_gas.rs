//! Equilibrium gas backend built on the element-potential solver.

use crate::equilibrium::solve_equilibrium;
use crate::error::{GasError, GasResult};
use crate::mixture::Mixture;
use crate::model::{GasModel, validation};
use crate::state::{GasState, StateInput};
use crate::thermo::species_thermo;
use crate::transport::wilke_viscosity;
use hf_core::HfError;
use hf_core::constants::{P_STANDARD, R_UNIVERSAL};
use hf_core::roots::{BrentConfig, brent};
use hf_core::units::{
    Density, SpecEnthalpy, SpecEntropy, SpecHeatCapacity, Velocity, k, kg_per_m3, mps, pa,
};
use tracing::trace;

/// Temperature range searched by the (p,h) and (p,s) inversions [K].
pub const DEFAULT_TEMPERATURE_RANGE: [f64; 2] = [50.0, 30_000.0];

/// Relative pressure step for the equilibrium sound speed difference.
const SOUND_SPEED_STEP: f64 = 1e-4;

/// Half-width of the first, narrow inversion bracket around a temperature hint.
const HINT_HALF_WIDTH: f64 = 0.05;

/// Chemical-equilibrium gas mixture model.
#[derive(Debug, Clone)]
pub struct EquilibriumGas {
    mixture: Mixture,
    t_range: [f64; 2],
}

impl EquilibriumGas {
    pub fn new(mixture: Mixture) -> Self {
        Self {
            mixture,
            t_range: DEFAULT_TEMPERATURE_RANGE,
        }
    }

    /// Five-species air.
    pub fn air5() -> Self {
        Self::new(Mixture::air5())
    }

    /// Restrict or widen the temperature range used by state inversions.
    pub fn with_temperature_range(mut self, lo: f64, hi: f64) -> GasResult<Self> {
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && hi > lo) {
            return Err(GasError::InvalidArg {
                what: "temperature range must satisfy 0 < lo < hi",
            });
        }
        self.t_range = [lo, hi];
        Ok(self)
    }

    pub fn temperature_range(&self) -> [f64; 2] {
        self.t_range
    }

    fn equilibrate(&self, p: f64, t: f64, guess: Option<&[f64]>) -> GasResult<GasState> {
        let eq = solve_equilibrium(&self.mixture, t, p, guess)?;
        GasState::new(pa(p), k(t), eq.mole_fractions, eq.potentials)
    }

    /// Find the temperature at pressure `p` where `residual` vanishes.
    ///
    /// `residual` must increase monotonically with temperature.
    fn solve_temperature<F>(
        &self,
        p: f64,
        what: &'static str,
        hint: Option<&GasState>,
        residual: F,
    ) -> GasResult<GasState>
    where
        F: Fn(&GasState) -> GasResult<f64>,
    {
        let [mut lo, mut hi] = self.t_range;
        let config = BrentConfig {
            x_abs_tol: 1e-10,
            x_rel_tol: 1e-13,
            residual_tol: 0.0,
            max_iters: 200,
        };

        let mut potentials: Option<Vec<f64>> = hint.map(|s| s.potentials().to_vec());
        let mut eval = |t: f64| -> GasResult<f64> {
            let state = self.equilibrate(p, t, potentials.as_deref())?;
            let r = residual(&state)?;
            potentials = Some(state.potentials().to_vec());
            Ok(r)
        };

        // The search range always covers the hint, which may lie outside `t_range`.
        let narrow = hint.map(|s| {
            let t0 = s.temperature().value;
            [t0 * (1.0 - HINT_HALF_WIDTH), t0 * (1.0 + HINT_HALF_WIDTH)]
        });
        if let Some([a, b]) = narrow {
            lo = lo.min(a);
            hi = hi.max(b);
        }

        let root = match narrow.map(|b| brent(&mut eval, b, &config)) {
            Some(Ok(root)) => root,
            Some(Err(GasError::Numeric(HfError::NoBracket { .. }))) | None => {
                brent(&mut eval, [lo, hi], &config).map_err(|e| match e {
                    GasError::Numeric(HfError::NoBracket { .. }) => GasError::OutOfRange { what },
                    other => other,
                })?
            }
            Some(Err(e)) => return Err(e),
        };
        trace!(what, t = root.x, iterations = root.iterations, "temperature inversion");

        self.equilibrate(p, root.x, potentials.as_deref())
    }

    fn mass_weighted(&self, state: &GasState, f: impl Fn(usize, f64) -> f64) -> f64 {
        let x = state.mole_fractions();
        let molar: f64 = (0..x.len()).map(|i| x[i] * f(i, x[i])).sum();
        molar / self.mixture.molar_mass(x)
    }
}

impl GasModel for EquilibriumGas {
    fn name(&self) -> &str {
        self.mixture.name()
    }

    fn mixture(&self) -> &Mixture {
        &self.mixture
    }

    fn state(&self, input: StateInput) -> GasResult<GasState> {
        match input {
            StateInput::PT { p, t } => self.equilibrate(p.value, t.value, None),
            StateInput::PH { p, h } => {
                validation::validate_finite(h, "target enthalpy must be finite")?;
                self.solve_temperature(p.value, "temperature from (p, h)", None, |st| {
                    Ok(self.h(st)? - h)
                })
            }
            StateInput::PS { p, s } => {
                validation::validate_finite(s, "target entropy must be finite")?;
                self.solve_temperature(p.value, "temperature from (p, s)", None, |st| {
                    Ok(self.s(st)? - s)
                })
            }
        }
    }

    fn isentropic_state(&self, state: &GasState, p: f64) -> GasResult<GasState> {
        let s0 = self.s(state)?;
        self.solve_temperature(p, "isentropic temperature", Some(state), |st| {
            Ok(self.s(st)? - s0)
        })
    }

    fn rho(&self, state: &GasState) -> GasResult<Density> {
        let m = self.molar_mass(state);
        let rho = kg_per_m3(state.pressure().value * m / (R_UNIVERSAL * state.temperature().value));
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn h(&self, state: &GasState) -> GasResult<SpecEnthalpy> {
        let t = state.temperature().value;
        let species = self.mixture.species();
        let h = self.mass_weighted(state, |i, _| species_thermo(species[i], t).h);
        validation::validate_finite(h, "enthalpy must be finite")?;
        Ok(h)
    }

    fn s(&self, state: &GasState) -> GasResult<SpecEntropy> {
        let t = state.temperature().value;
        let ln_p = (state.pressure().value / P_STANDARD).ln();
        let species = self.mixture.species();
        let s = self.mass_weighted(state, |i, xi| {
            if xi > 0.0 {
                species_thermo(species[i], t).s - R_UNIVERSAL * (xi.ln() + ln_p)
            } else {
                0.0
            }
        });
        validation::validate_finite(s, "entropy must be finite")?;
        Ok(s)
    }

    fn cp(&self, state: &GasState) -> GasResult<SpecHeatCapacity> {
        let t = state.temperature().value;
        let species = self.mixture.species();
        let cp = self.mass_weighted(state, |i, _| species_thermo(species[i], t).cp);
        validation::validate_cp(cp)?;
        Ok(cp)
    }

    fn gamma(&self, state: &GasState) -> GasResult<f64> {
        let cp = self.cp(state)?;
        let r = R_UNIVERSAL / self.molar_mass(state);
        let gamma = cp / (cp - r);
        validation::validate_gamma(gamma)?;
        Ok(gamma)
    }

    fn a_frozen(&self, state: &GasState) -> GasResult<Velocity> {
        let gamma = self.gamma(state)?;
        let r = R_UNIVERSAL / self.molar_mass(state);
        let a = mps((gamma * r * state.temperature().value).sqrt());
        validation::validate_speed_of_sound(a)?;
        Ok(a)
    }

    fn a(&self, state: &GasState) -> GasResult<Velocity> {
        let p = state.pressure().value;
        let dp = SOUND_SPEED_STEP * p;
        let plus = self.isentropic_state(state, p + dp)?;
        let minus = self.isentropic_state(state, p - dp)?;
        let drho = self.rho(&plus)?.value - self.rho(&minus)?.value;
        if drho <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "isentropic compressibility must be positive",
            });
        }
        let a = mps((2.0 * dp / drho).sqrt());
        validation::validate_speed_of_sound(a)?;
        Ok(a)
    }

    fn mu(&self, state: &GasState) -> GasResult<f64> {
        let mu = wilke_viscosity(
            self.mixture.species(),
            state.mole_fractions(),
            state.temperature().value,
        );
        if !mu.is_finite() || mu <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "viscosity must be positive and finite",
            });
        }
        Ok(mu)
    }

    fn chemical_enthalpy(&self, state: &GasState) -> GasResult<SpecEnthalpy> {
        let species = self.mixture.species();
        Ok(self.mass_weighted(state, |i, _| species[i].data().hf298))
    }
}
