//! Per-species statistical thermodynamics (rigid rotor, harmonic oscillator).
//!
//! All quantities are molar: enthalpy [J/mol], entropy and heat capacity
//! [J/(mol·K)]. Entropy is evaluated at the standard-state pressure.

use crate::species::Species;
use hf_core::constants::{H_PLANCK, K_BOLTZMANN, N_AVOGADRO, P_STANDARD, R_UNIVERSAL, T_REFERENCE};
use std::f64::consts::PI;

/// Molar thermodynamic properties of one species at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesThermo {
    /// Absolute enthalpy (formation + sensible from 298.15 K) [J/mol]
    pub h: f64,
    /// Standard-state entropy [J/(mol·K)]
    pub s: f64,
    /// Constant-pressure heat capacity [J/(mol·K)]
    pub cp: f64,
}

impl SpeciesThermo {
    /// Dimensionless standard Gibbs energy g/(RT).
    pub fn g_over_rt(&self, t: f64) -> f64 {
        (self.h - t * self.s) / (R_UNIVERSAL * t)
    }
}

/// Sensible contributions (h measured from 0 K) as (h, s, cp) in units of R.
fn internal_modes(species: Species, t: f64) -> (f64, f64, f64) {
    let data = species.data();
    let mut h = 0.0;
    let mut s = 0.0;
    let mut cp = 0.0;

    if let Some(rotor) = data.rotor {
        h += t;
        cp += 1.0;
        s += (t / (rotor.sigma * rotor.theta_r)).ln() + 1.0;
    }

    if let Some(theta_v) = data.theta_v {
        let x = theta_v / t;
        let emx = (-x).exp();
        let one_minus = -(-x).exp_m1();
        h += theta_v * emx / one_minus;
        cp += x * x * emx / (one_minus * one_minus);
        s += x * emx / one_minus - (-emx).ln_1p();
    }

    // Electronic partition function over the tabulated levels
    let mut q = 0.0;
    let mut m1 = 0.0;
    let mut m2 = 0.0;
    for &(g, theta) in data.levels {
        let w = g * (-theta / t).exp();
        q += w;
        m1 += w * theta;
        m2 += w * theta * theta;
    }
    if q > 0.0 {
        let mean = m1 / q;
        let mean_sq = m2 / q;
        h += mean;
        cp += (mean_sq - mean * mean) / (t * t);
        s += q.ln() + mean / t;
    }

    (h, s, cp)
}

fn translational_entropy(species: Species, t: f64) -> f64 {
    let mass = species.molar_mass() / N_AVOGADRO;
    let lambda = 2.0 * PI * mass * K_BOLTZMANN * t / (H_PLANCK * H_PLANCK);
    (lambda.powf(1.5) * K_BOLTZMANN * t / P_STANDARD).ln() + 2.5
}

fn sensible_enthalpy(species: Species, t: f64) -> f64 {
    let (h_int, _, _) = internal_modes(species, t);
    R_UNIVERSAL * (2.5 * t + h_int)
}

/// Evaluate the molar thermodynamic properties of `species` at `t` [K].
pub fn species_thermo(species: Species, t: f64) -> SpeciesThermo {
    let (h_int, s_int, cp_int) = internal_modes(species, t);
    let h_sens = R_UNIVERSAL * (2.5 * t + h_int);
    let h_ref = sensible_enthalpy(species, T_REFERENCE);

    SpeciesThermo {
        h: species.data().hf298 + h_sens - h_ref,
        s: R_UNIVERSAL * (translational_entropy(species, t) + s_int),
        cp: R_UNIVERSAL * (2.5 + cp_int),
    }
}

/// Blottner curve-fit viscosity [Pa·s].
pub fn species_viscosity(species: Species, t: f64) -> f64 {
    let [a, b, c] = species.data().blottner;
    let ln_t = t.ln();
    0.1 * ((a * ln_t + b) * ln_t + c).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn standard_entropies_match_tables() {
        // JANAF values at 298.15 K, 1 bar
        let cases = [
            (Species::N2, 191.61),
            (Species::O2, 205.15),
            (Species::NO, 210.76),
            (Species::N, 153.30),
            (Species::O, 161.06),
        ];
        for (species, s_ref) in cases {
            let s = species_thermo(species, T_REFERENCE).s;
            assert!(rel(s, s_ref) < 5e-3, "{species}: s = {s}, expected {s_ref}");
        }
    }

    #[test]
    fn enthalpy_at_reference_is_heat_of_formation() {
        for species in Species::ALL {
            let h = species_thermo(species, T_REFERENCE).h;
            assert!((h - species.data().hf298).abs() < 1e-6);
        }
    }

    #[test]
    fn heat_capacity_limits() {
        // Diatomics at room temperature: cp ≈ 7/2 R
        let cp = species_thermo(Species::N2, 300.0).cp;
        assert!(rel(cp, 3.5 * R_UNIVERSAL) < 0.01, "cp = {cp}");

        // Vibration fully excited at high temperature: cp → 9/2 R
        let cp = species_thermo(Species::N2, 20_000.0).cp;
        assert!(cp > 4.4 * R_UNIVERSAL, "cp = {cp}");

        // Monatomic ground-state nitrogen: cp ≈ 5/2 R
        let cp = species_thermo(Species::N, 300.0).cp;
        assert!(rel(cp, 2.5 * R_UNIVERSAL) < 1e-6);
    }

    #[test]
    fn heat_capacity_is_enthalpy_derivative() {
        for species in Species::ALL {
            for t in [300.0, 2000.0, 8000.0] {
                let dt = 1e-3 * t;
                let dh = species_thermo(species, t + dt).h - species_thermo(species, t - dt).h;
                let cp_fd = dh / (2.0 * dt);
                let cp = species_thermo(species, t).cp;
                assert!(rel(cp_fd, cp) < 1e-5, "{species} at {t} K");
            }
        }
    }

    #[test]
    fn entropy_is_consistent_with_heat_capacity() {
        // ds/dT = cp/T at constant pressure
        for species in Species::ALL {
            let t = 3000.0;
            let dt = 1.0;
            let ds = species_thermo(species, t + dt).s - species_thermo(species, t - dt).s;
            let cp = species_thermo(species, t).cp;
            assert!(rel(ds / (2.0 * dt), cp / t) < 1e-5, "{species}");
        }
    }

    #[test]
    fn nitrogen_viscosity_near_room_temperature() {
        let mu = species_viscosity(Species::N2, 300.0);
        assert!(mu > 1.6e-5 && mu < 1.9e-5, "mu = {mu}");
    }
}
