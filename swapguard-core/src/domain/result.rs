//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the amount arithmetic
///
/// Both variants are recoverable: amount checks fall back to a numeric
/// comparison instead of surfacing them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input is not a plain decimal (exponent notation, stray characters, several `.`)
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// Value or requested precision does not fit the 128-bit fixed-point form
    #[error("Precision overflow: {0}")]
    PrecisionOverflow(String),
}

impl Error {
    pub fn invalid_decimal(msg: impl Into<String>) -> Self {
        Self::InvalidDecimal(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::PrecisionOverflow(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a successful result with context
    pub fn ok_with_context(data: T, context: HashMap<String, serde_json::Value>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: Some(context),
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
