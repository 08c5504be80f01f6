use thiserror::Error;

pub type HfResult<T> = Result<T, HfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("No sign change in bracket [{lo}, {hi}] (f(lo)={f_lo}, f(hi)={f_hi})")]
    NoBracket {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("Root search did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
