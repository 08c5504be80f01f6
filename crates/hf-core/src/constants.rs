//! Physical constants (SI, CODATA 2018 exact values where defined).

/// Universal gas constant [J/(mol·K)].
pub const R_UNIVERSAL: f64 = 8.314_462_618;

/// Boltzmann constant [J/K].
pub const K_BOLTZMANN: f64 = 1.380_649e-23;

/// Planck constant [J·s].
pub const H_PLANCK: f64 = 6.626_070_15e-34;

/// Avogadro constant [1/mol].
pub const N_AVOGADRO: f64 = 6.022_140_76e23;

/// Standard-state pressure used by the species thermodynamic data [Pa].
pub const P_STANDARD: f64 = 1.0e5;

/// Reference temperature for heats of formation [K].
pub const T_REFERENCE: f64 = 298.15;
