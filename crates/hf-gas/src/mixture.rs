//! Reacting mixtures: species set plus fixed elemental composition.

use crate::composition::Composition;
use crate::error::{GasError, GasResult};
use crate::species::{Element, Species};

/// A reacting gas mixture.
///
/// The species set is fixed; the elemental composition (derived from the cold
/// molecular composition) is conserved by every equilibrium calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    name: String,
    species: Vec<Species>,
    elements: Vec<Element>,
    /// Elemental mole fractions, aligned with `elements`
    element_fractions: Vec<f64>,
    /// Atom counts a[i][e], species-major
    stoich: Vec<Vec<f64>>,
    cold: Composition,
}

impl Mixture {
    /// Five-species dissociating air (N2, O2, NO, N, O).
    pub fn air5() -> Self {
        let cold = Composition::from_mole_fractions(vec![(Species::N2, 0.79), (Species::O2, 0.21)])
            .expect("air cold composition is valid");
        Self::new("air5", Species::ALL.to_vec(), cold).expect("air5 definition is valid")
    }

    /// Two-species dissociating nitrogen (N2, N).
    pub fn nitrogen2() -> Self {
        Self::new(
            "nitrogen2",
            vec![Species::N2, Species::N],
            Composition::pure(Species::N2),
        )
        .expect("nitrogen2 definition is valid")
    }

    /// Build a mixture from a species set and its cold molecular composition.
    pub fn new(name: impl Into<String>, species: Vec<Species>, cold: Composition) -> GasResult<Self> {
        if species.is_empty() {
            return Err(GasError::InvalidArg {
                what: "mixture has no species",
            });
        }

        let mut unique = species.clone();
        unique.sort_by_key(|s| s.key());
        unique.dedup();
        if unique.len() != species.len() {
            return Err(GasError::InvalidArg {
                what: "duplicate species in mixture",
            });
        }

        for (s, _) in cold.iter() {
            if !species.contains(&s) {
                return Err(GasError::NotSupported {
                    what: format!("cold composition species '{s}' is not in the mixture"),
                });
            }
        }

        let mut elements: Vec<Element> = species
            .iter()
            .flat_map(|s| s.data().elements.iter().map(|(e, _)| *e))
            .collect();
        elements.sort();
        elements.dedup();

        // Every element needs an elemental carrier for the equilibrium initial guess
        for e in &elements {
            if !species.iter().any(|s| s.is_elemental() && s.atoms(*e) > 0) {
                return Err(GasError::NotSupported {
                    what: format!("element '{}' has no elemental species", e.key()),
                });
            }
        }

        let mut element_fractions: Vec<f64> = elements
            .iter()
            .map(|e| cold.atoms_per_molecule(*e))
            .collect();
        let total: f64 = element_fractions.iter().sum();
        if total <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "cold composition carries no atoms",
            });
        }
        for b in &mut element_fractions {
            *b /= total;
        }
        if element_fractions.iter().any(|b| *b <= 0.0) {
            return Err(GasError::InvalidArg {
                what: "every mixture element must be present in the cold composition",
            });
        }

        let stoich = species
            .iter()
            .map(|s| elements.iter().map(|e| s.atoms(*e) as f64).collect())
            .collect();

        Ok(Self {
            name: name.into(),
            species,
            elements,
            element_fractions,
            stoich,
            cold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element_fractions(&self) -> &[f64] {
        &self.element_fractions
    }

    pub fn cold_composition(&self) -> &Composition {
        &self.cold
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Atoms of element index `e` in species index `i`.
    pub fn atoms(&self, i: usize, e: usize) -> f64 {
        self.stoich[i][e]
    }

    pub fn index_of(&self, species: Species) -> Option<usize> {
        self.species.iter().position(|s| *s == species)
    }

    /// Molar mass of the mixture at the given mole fractions [kg/mol].
    pub fn molar_mass(&self, x: &[f64]) -> f64 {
        self.species
            .iter()
            .zip(x)
            .map(|(s, xi)| xi * s.molar_mass())
            .sum()
    }

    /// Index of the elemental species carrying element `e` with the most
    /// (`molecular = true`) or fewest atoms.
    pub(crate) fn elemental_carrier(&self, e: usize, molecular: bool) -> usize {
        let carriers = (0..self.species.len())
            .filter(|&i| self.species[i].is_elemental() && self.stoich[i][e] > 0.0);
        let pick = if molecular {
            carriers.max_by(|&a, &b| self.stoich[a][e].total_cmp(&self.stoich[b][e]))
        } else {
            carriers.min_by(|&a, &b| self.stoich[a][e].total_cmp(&self.stoich[b][e]))
        };
        // Guaranteed by construction
        pick.unwrap_or(0)
    }
}

impl std::str::FromStr for Mixture {
    type Err = GasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "air5" | "air_5" | "air" => Ok(Mixture::air5()),
            "nitrogen2" | "n2" | "nitrogen" | "n2_2" => Ok(Mixture::nitrogen2()),
            other => Err(GasError::NotSupported {
                what: format!("unknown mixture '{other}'"),
            }),
        }
    }
}
