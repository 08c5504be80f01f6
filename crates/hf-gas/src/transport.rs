//! Mixture viscosity (Blottner species fits, Wilke mixing rule).

use crate::species::Species;
use crate::thermo::species_viscosity;

/// Wilke semi-empirical mixing rule [Pa·s].
///
/// `x` holds mole fractions aligned with `species`. Species with zero mole
/// fraction are ignored.
pub fn wilke_viscosity(species: &[Species], x: &[f64], t: f64) -> f64 {
    let mu: Vec<f64> = species.iter().map(|s| species_viscosity(*s, t)).collect();
    let mw: Vec<f64> = species.iter().map(|s| s.molar_mass()).collect();

    let mut total = 0.0;
    for i in 0..species.len() {
        if x[i] <= 0.0 {
            continue;
        }
        let mut denom = 0.0;
        for j in 0..species.len() {
            if x[j] <= 0.0 {
                continue;
            }
            let num = 1.0 + (mu[i] / mu[j]).sqrt() * (mw[j] / mw[i]).powf(0.25);
            let phi = num * num / (8.0 * (1.0 + mw[i] / mw[j])).sqrt();
            denom += x[j] * phi;
        }
        total += x[i] * mu[i] / denom;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_species_reduces_to_species_viscosity() {
        let mu = wilke_viscosity(&[Species::N2, Species::N], &[1.0, 0.0], 2000.0);
        let expected = species_viscosity(Species::N2, 2000.0);
        assert!((mu - expected).abs() < 1e-15);
    }

    #[test]
    fn cold_air_viscosity() {
        let mu = wilke_viscosity(&[Species::N2, Species::O2], &[0.79, 0.21], 300.0);
        assert!(mu > 1.7e-5 && mu < 2.2e-5, "mu = {mu}");
    }

    #[test]
    fn mixture_lies_between_components() {
        let t = 5000.0;
        let mu_n2 = species_viscosity(Species::N2, t);
        let mu_o = species_viscosity(Species::O, t);
        let mu = wilke_viscosity(&[Species::N2, Species::O], &[0.5, 0.5], t);
        assert!(mu > mu_n2.min(mu_o) && mu < mu_n2.max(mu_o));
    }
}
