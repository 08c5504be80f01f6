//! Gas model errors.

use hf_core::HfError;
use thiserror::Error;

/// Result type for gas model operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors that can occur during equilibrium gas property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of the model's valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Unknown mixture or unsupported species combination.
    #[error("Not supported: {what}")]
    NotSupported { what: String },

    /// Convergence failure (equilibrium composition, T from (p,h) or (p,s)).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// Root-finding failure in a property inversion.
    #[error("Numeric error: {0}")]
    Numeric(#[from] HfError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GasError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = GasError::NotSupported {
            what: "mixture 'argon'".into(),
        };
        assert!(err.to_string().contains("argon"));
    }

    #[test]
    fn numeric_errors_convert() {
        let err: GasError = HfError::NotConverged { iterations: 3 }.into();
        assert!(matches!(err, GasError::Numeric(_)));
    }
}
