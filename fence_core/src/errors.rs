//! # Error Types
//!
//! Structured error types for fence_core. The calculation engine itself is
//! total and never returns an error; these variants come from the layers
//! around it: request validation, configuration parsing, fence type
//! resolution and file I/O.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::errors::{CalcError, CalcResult};
//!
//! fn check_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "fence_length",
//!             length_m.to_string(),
//!             "Fence length must be greater than 0",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fence_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for fence planning operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A value is outside its permitted range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A value is not one of the accepted choices
    #[error("Invalid choice for '{field}': {value} (expected one of: {choices})")]
    InvalidChoice {
        field: String,
        value: String,
        choices: String,
    },

    /// A value has the wrong shape (e.g. text where a number is expected)
    #[error("Type mismatch for '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

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

    /// Engine configuration could not be read
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidChoice error from the list of accepted values
    pub fn invalid_choice(field: impl Into<String>, value: impl Into<String>, choices: &[&str]) -> Self {
        CalcError::InvalidChoice {
            field: field.into(),
            value: value.into(),
            choices: choices.join(", "),
        }
    }

    /// Create a TypeMismatch error
    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        CalcError::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
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

    /// Whether the error was caused by the caller's request data
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::InvalidChoice { .. }
                | CalcError::TypeMismatch { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidChoice { .. } => "INVALID_CHOICE",
            CalcError::TypeMismatch { .. } => "TYPE_MISMATCH",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("fence_length", "-5", "Fence length must be greater than 0");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("fence_length").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::material_not_found("Triplex").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(
            CalcError::invalid_choice("netting_type", "goat", &["none", "sheep", "deer"]).error_code(),
            "INVALID_CHOICE"
        );
    }

    #[test]
    fn test_invalid_choice_message_lists_choices() {
        let error = CalcError::invalid_choice("top_wire_type", "electric", &["standard", "hot", "barb"]);
        assert_eq!(
            error.to_string(),
            "Invalid choice for 'top_wire_type': electric (expected one of: standard, hot, barb)"
        );
    }

    #[test]
    fn test_validation_error_classification() {
        assert!(CalcError::type_mismatch("wire_count", "integer", "\"two\"").is_validation_error());
        assert!(!CalcError::file_error("read", "catalog.json", "not found").is_validation_error());
    }
}
