//! # Error Types
//!
//! Structured error types for calc_core. Every fallible operation returns a
//! [`CalcResult`], so a UI collaborator can map each variant to a message
//! without string matching. No operation reports `NaN` or infinity as a
//! successful value; those paths surface one of these variants instead.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_years(years: f64) -> CalcResult<()> {
//!     if years < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "years".to_string(),
//!             value: years.to_string(),
//!             reason: "Years cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Unit identifier is not part of the requested category
    #[error("Unknown unit '{unit}' for category '{category}'")]
    UnknownUnit { unit: String, category: String },

    /// Category identifier is not recognized
    #[error("Unknown category: {category}")]
    UnknownCategory { category: String },

    /// An input value is invalid (non-numeric, missing, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing from a structured input
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A divisor (duration, period count, rate, height) is zero
    #[error("Division by zero in {operation}: '{field}' must be non-zero")]
    DivisionByZero { operation: String, field: String },

    /// Formula, category or operation is not registered
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// Calculation produced a value that cannot be reported (overflow, NaN)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// The symbolic-math collaborator could not parse or solve an expression
    #[error("Symbolic evaluation failed for '{expression}': {reason}")]
    SymbolicFailure { expression: String, reason: String },

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

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>, category: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            unit: unit.into(),
            category: category.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(category: impl Into<String>) -> Self {
        CalcError::UnknownCategory {
            category: category.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(operation: impl Into<String>, field: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            operation: operation.into(),
            field: field.into(),
        }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        CalcError::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a SymbolicFailure error
    pub fn symbolic_failure(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::SymbolicFailure {
            expression: expression.into(),
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

    /// Check if the error was caused by user input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::UnknownUnit { .. }
                | CalcError::UnknownCategory { .. }
                | CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::DivisionByZero { .. }
                | CalcError::UnsupportedOperation { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SymbolicFailure { .. } => "SYMBOLIC_FAILURE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Reject non-finite numeric inputs with an `InvalidInput` error.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Reject a computed value that is NaN or infinite.
pub(crate) fn finite_result(calculation_type: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(
            calculation_type,
            format!("result is not a finite number ({})", value),
        ))
    }
}
