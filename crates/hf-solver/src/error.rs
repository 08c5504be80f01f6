//! Error types for solver operations.

use hf_core::HfError;
use hf_gas::GasError;
use thiserror::Error;

/// Errors that can occur in the physics sub-solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Gas model error: {0}")]
    Gas(#[from] GasError),

    #[error("Root finding error: {0}")]
    Root(#[from] HfError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        SolverError::InvalidInput { what: what.into() }
    }
}
