//! Error types for the bsengine library.
//!
//! All fallible operations return `Result<T, EngineError>` rather than panicking.
//! Degenerate pricing domains (zero expiry, zero vol) and implied-vol
//! non-convergence are *not* errors: the former have defined boundary values,
//! the latter is reported through [`ImpliedVolEstimate::converged`](crate::types::ImpliedVolEstimate).

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during pricing, solving and simulation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Input data is invalid (e.g., non-positive spot, unknown option side,
    /// inverted bid/ask). The message names the field and the violated rule.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Numerical computation produced a non-finite value.
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_accessible() {
        let err = EngineError::InvalidInput {
            message: "strike must be positive".into(),
        };
        match &err {
            EngineError::InvalidInput { message } => {
                assert!(message.contains("positive"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn error_display_includes_message() {
        let err = EngineError::invalid("bad input");
        assert_eq!(format!("{err}"), "invalid input: bad input");

        let err2 = EngineError::NumericalError {
            message: "NaN detected".into(),
        };
        assert!(format!("{err2}").contains("NaN detected"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
