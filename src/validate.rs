//! Field checks shared by every public entry point.
//!
//! Each check rejects NaN and both infinities before applying its sign rule,
//! and reports the offending field by name.

use crate::error::{EngineError, Result};

fn reject(name: &str, rule: &str, value: f64) -> EngineError {
    EngineError::invalid(format!("{name} must be {rule}, got {value}"))
}

/// Strictly positive and finite: spot, strike, shared chain expiry.
pub(crate) fn validate_positive(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(reject(name, "positive and finite", value))
    }
}

/// Zero or above and finite: expiry, vol, premiums and quotes.
pub(crate) fn validate_non_negative(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(reject(name, "non-negative and finite", value))
    }
}

/// Any finite value: rates and scenario shifts may be negative.
pub(crate) fn validate_finite(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(reject(name, "finite", value))
    }
}
