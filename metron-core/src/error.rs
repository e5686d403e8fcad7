//! Structured errors for unit lookup, conversion and parsing
//!
//! Errors are plain values. Callers branch on them (for example to offer a
//! fallback unit when two units are not convertible).

use crate::NumberError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_NOT_FOUND: &str = "UNIT_NOT_FOUND";
    pub const NOT_CONVERTIBLE: &str = "NOT_CONVERTIBLE";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
}

/// Every failure the unit engine can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Lookup by name, alias or symbol failed in every registered system
    #[error("unknown unit: {lookup}")]
    UnitNotFound { lookup: String },

    /// No chain of conversion edges links the two units
    #[error("cannot convert {from} to {to}")]
    NotConvertible { from: String, to: String },

    /// Invalid registration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input does not match the numeric+unit grammar
    #[error("cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("division by zero")]
    DivisionByZero,
}

impl UnitError {
    pub fn unit_not_found(lookup: impl Into<String>) -> Self {
        UnitError::UnitNotFound { lookup: lookup.into() }
    }

    pub fn not_convertible(from: impl Into<String>, to: impl Into<String>) -> Self {
        UnitError::NotConvertible { from: from.into(), to: to.into() }
    }

    pub fn config(details: impl Into<String>) -> Self {
        UnitError::Config(details.into())
    }

    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        UnitError::Parse { input: input.into(), reason: reason.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::UnitNotFound { .. } => codes::UNIT_NOT_FOUND,
            UnitError::NotConvertible { .. } => codes::NOT_CONVERTIBLE,
            UnitError::Config(_) => codes::CONFIG_ERROR,
            UnitError::Parse { .. } => codes::PARSE_ERROR,
            UnitError::DivisionByZero => codes::DIV_ZERO,
        }
    }

    /// Suggestion for fixing the error, when there is a useful one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            UnitError::UnitNotFound { lookup } => {
                Some(format!("Register '{}' or check spelling", lookup))
            }
            UnitError::NotConvertible { .. } => {
                Some("Register a conversion between the two systems".to_string())
            }
            UnitError::Parse { .. } => {
                Some("Use '<number> <unit>', e.g. '50 km/hr'".to_string())
            }
            UnitError::DivisionByZero => Some("Ensure divisor is not zero".to_string()),
            UnitError::Config(_) => None,
        }
    }

    /// True for failures caused by malformed input rather than an unsupported unit pair
    pub fn is_parse_error(&self) -> bool {
        matches!(self, UnitError::Parse { .. })
    }
}

impl From<NumberError> for UnitError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => UnitError::parse(s, "invalid number"),
            NumberError::NonFinite(s) => UnitError::parse(s, "number is not finite"),
        }
    }
}

/// Serializable view of an error, for JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&UnitError> for ErrorReport {
    fn from(err: &UnitError) -> Self {
        ErrorReport {
            code: err.code().to_string(),
            message: err.to_string(),
            suggestion: err.suggestion(),
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
