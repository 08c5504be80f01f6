//! Error types for the hf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the case, gas and solver
/// crates behind one interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Case(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Gas model error: {0}")]
    Gas(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for hf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hf_case::CaseError> for AppError {
    fn from(err: hf_case::CaseError) -> Self {
        match err {
            hf_case::CaseError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Case(other.to_string()),
        }
    }
}

impl From<hf_case::ValidationError> for AppError {
    fn from(err: hf_case::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<hf_gas::GasError> for AppError {
    fn from(err: hf_gas::GasError) -> Self {
        AppError::Gas(err.to_string())
    }
}

impl From<hf_solver::SolverError> for AppError {
    fn from(err: hf_solver::SolverError) -> Self {
        match err {
            hf_solver::SolverError::Gas(gas) => AppError::Gas(gas.to_string()),
            other => AppError::Solver(other.to_string()),
        }
    }
}
