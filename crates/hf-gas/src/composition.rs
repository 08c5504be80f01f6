//! Cold molecular composition of a mixture.

use crate::error::{GasError, GasResult};
use crate::species::{Element, Species};

/// Fractions below this are dropped after normalisation.
const NEGLIGIBLE: f64 = 1e-15;

/// Mole fractions of the undissociated gas, normalised to sum to one.
///
/// Repeated species are merged. Only species with a non-negligible fraction
/// are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    fractions: Vec<(Species, f64)>,
}

impl Composition {
    pub fn pure(species: Species) -> Self {
        Self {
            fractions: vec![(species, 1.0)],
        }
    }

    /// Normalise `(species, amount)` pairs into mole fractions.
    ///
    /// Amounts may be in any consistent unit (moles, percent, parts).
    pub fn from_mole_fractions(amounts: Vec<(Species, f64)>) -> GasResult<Self> {
        if amounts.is_empty() {
            return Err(GasError::InvalidArg {
                what: "empty composition",
            });
        }
        if amounts.iter().any(|(_, x)| !x.is_finite() || *x < 0.0) {
            return Err(GasError::NonPhysical {
                what: "mole fractions must be finite and non-negative",
            });
        }

        let mut merged: Vec<(Species, f64)> = Vec::with_capacity(amounts.len());
        for (species, x) in amounts {
            if let Some(entry) = merged.iter_mut().find(|(s, _)| *s == species) {
                entry.1 += x;
            } else {
                merged.push((species, x));
            }
        }

        let total: f64 = merged.iter().map(|(_, x)| x).sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(GasError::NonPhysical {
                what: "mole fractions must have a positive sum",
            });
        }
        merged.retain_mut(|(_, x)| {
            *x /= total;
            *x > NEGLIGIBLE
        });

        Ok(Self { fractions: merged })
    }

    /// Mole fraction of `species`, zero when absent.
    pub fn fraction(&self, species: Species) -> f64 {
        self.fractions
            .iter()
            .find_map(|&(s, x)| (s == species).then_some(x))
            .unwrap_or(0.0)
    }

    pub fn single_species(&self) -> Option<Species> {
        match self.fractions.as_slice() {
            [(species, _)] => Some(*species),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.fractions.iter().copied()
    }

    /// Molar mass [kg/mol].
    pub fn molar_mass(&self) -> f64 {
        self.iter().map(|(s, x)| x * s.molar_mass()).sum()
    }

    /// Atoms of `element` per molecule of the cold gas.
    pub fn atoms_per_molecule(&self, element: Element) -> f64 {
        self.iter().map(|(s, x)| x * s.atoms(element) as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_composition() {
        let comp = Composition::pure(Species::N2);
        assert_eq!(comp.single_species(), Some(Species::N2));
        assert_eq!(comp.fraction(Species::N2), 1.0);
        assert_eq!(comp.fraction(Species::O), 0.0);
        assert_eq!(comp.atoms_per_molecule(Element::N), 2.0);
    }

    #[test]
    fn percentages_are_normalised() {
        let comp =
            Composition::from_mole_fractions(vec![(Species::N2, 79.0), (Species::O2, 21.0)]).unwrap();
        assert_eq!(comp.single_species(), None);
        assert!((comp.fraction(Species::O2) - 0.21).abs() < 1e-12);
        assert!((comp.atoms_per_molecule(Element::O) - 0.42).abs() < 1e-12);
    }

    #[test]
    fn repeated_species_are_merged() {
        let comp = Composition::from_mole_fractions(vec![
            (Species::N2, 0.5),
            (Species::NO, 0.25),
            (Species::N2, 0.25),
        ])
        .unwrap();
        assert_eq!(comp.iter().count(), 2);
        assert!((comp.fraction(Species::N2) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_entries_are_dropped() {
        let comp =
            Composition::from_mole_fractions(vec![(Species::N2, 1.0), (Species::O, 0.0)]).unwrap();
        assert_eq!(comp.single_species(), Some(Species::N2));
    }

    #[test]
    fn air_molar_mass() {
        let comp =
            Composition::from_mole_fractions(vec![(Species::N2, 0.79), (Species::O2, 0.21)])
                .unwrap();
        let m = comp.molar_mass();
        assert!((m - 28.85e-3).abs() < 0.01e-3, "M = {m}");
    }

    #[test]
    fn invalid_inputs() {
        assert!(Composition::from_mole_fractions(vec![]).is_err());
        assert!(
            Composition::from_mole_fractions(vec![(Species::O2, -0.5), (Species::N2, 1.5)]).is_err()
        );
        assert!(
            Composition::from_mole_fractions(vec![(Species::O2, 0.0), (Species::N2, 0.0)]).is_err()
        );
        assert!(Composition::from_mole_fractions(vec![(Species::O2, f64::NAN)]).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fractions_sum_to_one(amounts in prop::collection::vec(0.0_f64..10.0, 1..8)) {
            let input: Vec<(Species, f64)> = amounts
                .iter()
                .enumerate()
                .map(|(i, &x)| (Species::ALL[i % Species::ALL.len()], x))
                .collect();

            if let Ok(comp) = Composition::from_mole_fractions(input) {
                let sum: f64 = comp.iter().map(|(_, x)| x).sum();
                prop_assert!((sum - 1.0).abs() < 1e-9);
                prop_assert!(comp.iter().all(|(_, x)| x > 0.0));
            }
        }
    }
}
