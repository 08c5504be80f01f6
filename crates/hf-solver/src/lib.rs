//! Physics sub-solvers for shock-tunnel flow rebuilding.
//!
//! Every solver works on a shared [`hf_gas::GasModel`]:
//! - `stagnation`: reservoir and post-shock total conditions (isentropic, adiabatic)
//! - `massflow`: sonic throat on the free-stream isentrope
//! - `shock`: equilibrium normal shock (Rankine-Hugoniot)
//! - `heatflux`: Fay-Riddell stagnation-point heat flux
//!
//! The root finders (`newton`, `jacobian`) are shared with any caller that
//! needs a small nonlinear system solved.

pub mod error;
pub mod free_stream;
pub mod heatflux;
pub mod jacobian;
pub mod massflow;
pub mod newton;
pub mod options;
pub mod shock;
pub mod stagnation;

pub use error::{SolverError, SolverResult};
pub use free_stream::{FreeStream, PreShock, free_stream};
pub use heatflux::{HeatFluxInput, HeatFluxState, heatflux};
pub use massflow::{ThroatState, massflow};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use options::{ForwardOptions, ShockOptions, StagnationOptions, ThroatOptions};
pub use shock::{PostShock, normal_shock, shock};
pub use stagnation::{StagnationInput, StagnationState, reservoir, stagnation, total};
