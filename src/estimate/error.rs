use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// Arithmetic string is empty, holds disallowed characters or does not parse
    #[error("Invalid expression: {0}")]
    Validation(String),
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
    #[error("Unknown target unit: {0}")]
    UnknownUnit(String),
    #[error("Unknown rate: {0}")]
    UnknownRate(String),
}
