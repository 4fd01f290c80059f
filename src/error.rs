//! Error types.
//!
//! - `FitError` is the library-level taxonomy returned by evaluators, data
//!   containers and fit drivers.
//! - `AppError` is what the `lmc` binary reports: a message plus a process exit
//!   code.

use crate::domain::ModelKind;

/// Errors raised before or around a fit.
///
/// Solver outcomes (convergence, exhausted budget, numerical breakdown) are not
/// errors; they are reported through `FitStatus` on a successful `FitReport`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Parameter vector length does not match the model arity.
    #[error("{model} model takes {expected} parameters, got {actual}")]
    InvalidParameterCount {
        model: ModelKind,
        expected: usize,
        actual: usize,
    },

    /// Data or parameter values violate a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Solver settings are out of range.
    #[error("invalid fit options: {0}")]
    InvalidOptions(String),

    /// The model prediction is not finite at a sample (zero denominator).
    #[error("model is singular at sample {index} (t = {t})")]
    SingularModel { index: usize, t: f64 },
}

impl FitError {
    pub(crate) fn input(message: impl Into<String>) -> Self {
        FitError::InvalidInput(message.into())
    }

    /// Exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InvalidParameterCount { .. }
            | FitError::InvalidInput(_)
            | FitError::InvalidOptions(_) => 2,
            FitError::SingularModel { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let err: AppError = FitError::input("t and y differ in length").into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("t and y differ in length"));

        let err: AppError = FitError::SingularModel { index: 3, t: 2.0 }.into();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("sample 3"));
    }

    #[test]
    fn parameter_count_message_names_the_model() {
        let err = FitError::InvalidParameterCount {
            model: ModelKind::Exponential,
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "exponential model takes 3 parameters, got 2");
    }
}
