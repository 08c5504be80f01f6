//! Application service layer for hyperflow.
//!
//! Hosts the forward model that turns a pre-shock state into the requested
//! facility measurements, the parallel batch runner and case evaluation. The
//! CLI is a thin front end over this crate.

pub mod batch;
pub mod case_service;
pub mod error;
pub mod forward;
pub mod measurement_set;

// Re-export key types for convenience
pub use batch::run_batch;
pub use case_service::{
    CaseReport, PointReport, build_gas_model, load_case, preshock_from_def, run_case,
    run_case_file,
};
pub use error::{AppError, AppResult};
pub use forward::{Facility, forward};
pub use hf_case::Measurement;
pub use measurement_set::MeasurementSet;
