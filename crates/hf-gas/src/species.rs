//! Chemical species and elements carried by the high-temperature air models.

use serde::{Deserialize, Serialize};

/// Chemical element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    N,
    O,
}

impl Element {
    pub fn key(&self) -> &'static str {
        match self {
            Element::N => "N",
            Element::O => "O",
        }
    }
}

/// Linear rigid rotor constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotor {
    /// Symmetry number
    pub sigma: f64,
    /// Characteristic rotational temperature [K]
    pub theta_r: f64,
}

/// Static per-species data used by the statistical thermodynamics and transport models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesData {
    /// Molar mass [kg/mol]
    pub molar_mass: f64,
    /// Elemental make-up (element, atom count)
    pub elements: &'static [(Element, u32)],
    /// Heat of formation at 298.15 K [J/mol]
    pub hf298: f64,
    /// Rotor constants (None for atoms)
    pub rotor: Option<Rotor>,
    /// Characteristic vibrational temperature [K] (None for atoms)
    pub theta_v: Option<f64>,
    /// Electronic levels as (degeneracy, characteristic temperature [K])
    pub levels: &'static [(f64, f64)],
    /// Blottner viscosity coefficients (A, B, C)
    pub blottner: [f64; 3],
}

/// Neutral species of dissociating air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Nitric oxide (NO)
    NO,
    /// Atomic nitrogen
    N,
    /// Atomic oxygen
    O,
}

const N2_DATA: SpeciesData = SpeciesData {
    molar_mass: 28.0134e-3,
    elements: &[(Element::N, 2)],
    hf298: 0.0,
    rotor: Some(Rotor {
        sigma: 2.0,
        theta_r: 2.875,
    }),
    theta_v: Some(3395.0),
    levels: &[(1.0, 0.0), (3.0, 72_231.6)],
    blottner: [0.026_814_2, 0.317_783_8, -11.315_551_3],
};

const O2_DATA: SpeciesData = SpeciesData {
    molar_mass: 31.9988e-3,
    elements: &[(Element::O, 2)],
    hf298: 0.0,
    rotor: Some(Rotor {
        sigma: 2.0,
        theta_r: 2.080,
    }),
    theta_v: Some(2239.0),
    levels: &[(3.0, 0.0), (2.0, 11_393.0), (1.0, 18_985.0), (3.0, 47_559.0)],
    blottner: [0.044_929_0, -0.082_615_8, -9.201_947_5],
};

const NO_DATA: SpeciesData = SpeciesData {
    molar_mass: 30.0061e-3,
    elements: &[(Element::N, 1), (Element::O, 1)],
    hf298: 91_271.0,
    rotor: Some(Rotor {
        sigma: 1.0,
        theta_r: 2.406,
    }),
    theta_v: Some(2817.0),
    levels: &[(2.0, 0.0), (2.0, 174.2)],
    blottner: [0.043_637_8, -0.033_551_1, -9.576_743_0],
};

const N_DATA: SpeciesData = SpeciesData {
    molar_mass: 14.0067e-3,
    elements: &[(Element::N, 1)],
    hf298: 472_680.0,
    rotor: None,
    theta_v: None,
    levels: &[(4.0, 0.0), (10.0, 27_658.7), (6.0, 41_495.2)],
    blottner: [0.011_557_2, 0.603_167_9, -12.432_749_5],
};

const O_DATA: SpeciesData = SpeciesData {
    molar_mass: 15.9994e-3,
    elements: &[(Element::O, 1)],
    hf298: 249_175.0,
    rotor: None,
    theta_v: None,
    levels: &[
        (5.0, 0.0),
        (3.0, 227.7),
        (1.0, 326.6),
        (5.0, 22_830.0),
        (1.0, 48_621.0),
    ],
    blottner: [0.020_314_4, 0.429_440_4, -11.603_140_3],
};

impl Species {
    pub const ALL: [Species; 5] = [Species::N2, Species::O2, Species::NO, Species::N, Species::O];

    pub fn key(&self) -> &'static str {
        match self {
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::NO => "NO",
            Species::N => "N",
            Species::O => "O",
        }
    }

    pub fn data(&self) -> &'static SpeciesData {
        match self {
            Species::N2 => &N2_DATA,
            Species::O2 => &O2_DATA,
            Species::NO => &NO_DATA,
            Species::N => &N_DATA,
            Species::O => &O_DATA,
        }
    }

    /// Molar mass [kg/mol].
    pub fn molar_mass(&self) -> f64 {
        self.data().molar_mass
    }

    /// Number of atoms of `element` in one molecule.
    pub fn atoms(&self, element: Element) -> u32 {
        self.data()
            .elements
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Whether the species is made of a single element.
    pub fn is_elemental(&self) -> bool {
        self.data().elements.len() == 1
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N2" | "NITROGEN" => Ok(Species::N2),
            "O2" | "OXYGEN" => Ok(Species::O2),
            "NO" | "NITRIC OXIDE" | "NITRICOXIDE" => Ok(Species::NO),
            "N" => Ok(Species::N),
            "O" => Ok(Species::O),
            _ => Err("unknown species"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_species_keys() {
        for species in Species::ALL {
            let parsed: Species = species.key().parse().unwrap();
            assert_eq!(parsed, species);
        }
        assert_eq!("nitrogen".parse::<Species>(), Ok(Species::N2));
        assert!("Xe".parse::<Species>().is_err());
    }

    #[test]
    fn molar_masses_are_additive() {
        let no = Species::NO.molar_mass();
        let sum = Species::N.molar_mass() + Species::O.molar_mass();
        assert!((no - sum).abs() < 1e-9);

        let n2 = Species::N2.molar_mass();
        assert!((n2 - 2.0 * Species::N.molar_mass()).abs() < 1e-9);
    }

    #[test]
    fn atom_counts() {
        assert_eq!(Species::N2.atoms(Element::N), 2);
        assert_eq!(Species::N2.atoms(Element::O), 0);
        assert_eq!(Species::NO.atoms(Element::N), 1);
        assert_eq!(Species::NO.atoms(Element::O), 1);
        assert!(Species::O2.is_elemental());
        assert!(!Species::NO.is_elemental());
    }

    #[test]
    fn atoms_carry_no_rotor() {
        for species in [Species::N, Species::O] {
            assert!(species.data().rotor.is_none());
            assert!(species.data().theta_v.is_none());
        }
    }
}
