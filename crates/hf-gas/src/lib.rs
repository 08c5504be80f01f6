//! hf-gas: equilibrium gas-mixture thermochemistry for hyperflow.
//!
//! Provides:
//! - Species data (N2, O2, NO, N, O) with statistical-mechanics constants
//! - Mixtures with conserved elemental composition (air5, nitrogen2)
//! - Equilibrium composition by the element-potential method
//! - `GasModel` trait and the `EquilibriumGas` backend
//! - Blottner/Wilke viscosity
//!
//! # Example
//!
//! ```no_run
//! use hf_gas::{EquilibriumGas, GasModel, StateInput};
//! use hf_core::units::{pa, k};
//!
//! let gas = EquilibriumGas::air5();
//! let state = gas
//!     .state(StateInput::PT { p: pa(101325.0), t: k(300.0) })
//!     .unwrap();
//! let rho = gas.rho(&state).unwrap();
//! println!("Density: {} kg/m³", rho.value);
//! ```

pub mod calculator;
pub mod composition;
pub mod equilibrium;
pub mod equilibrium_gas;
pub mod error;
pub mod mixture;
pub mod model;
pub mod species;
pub mod state;
pub mod thermo;
pub mod transport;

// Re-exports for ergonomics
pub use calculator::{EquilibriumReport, EquilibriumState, InputPair, compute_equilibrium_state};
pub use composition::Composition;
pub use equilibrium::{Equilibrium, solve_equilibrium};
pub use equilibrium_gas::EquilibriumGas;
pub use error::{GasError, GasResult};
pub use mixture::Mixture;
pub use model::{GasModel, ThermoPropertyPack};
pub use species::{Element, Species};
pub use state::{GasState, StateInput};
