//! # Error Types
//!
//! Structured error types for cpt_core. Every variant carries enough context
//! for a front end to tell the user which value or file caused the problem.
//!
//! ## Example
//!
//! ```rust
//! use cpt_core::errors::{CalcError, CalcResult};
//!
//! fn validate_stress(p_kpa: f64) -> CalcResult<()> {
//!     if p_kpa <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "p_kpa".to_string(),
//!             value: p_kpa.to_string(),
//!             reason: "Mean effective stress must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cpt_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its documented range or not a number
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A logarithm or power was evaluated outside its domain, or the
    /// result was not finite. Renders fail as a whole when this occurs.
    #[error("Computation fault in {quantity}: {reason}")]
    ComputationFault { quantity: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ComputationFault error
    pub fn computation_fault(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ComputationFault {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True when the user can fix the problem by changing an input value
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ComputationFault { .. } => "COMPUTATION_FAULT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
