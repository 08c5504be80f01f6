//! hf-core: stable foundation for hyperflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + finiteness/positivity checks)
//! - constants (physical constants shared by the gas model and solvers)
//! - roots (bracketed scalar root finding)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod roots;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HfError, HfResult};
pub use numeric::*;
pub use units::*;
