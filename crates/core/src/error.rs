//! Error types for ComplyForm
//!
//! This module provides unified error handling for everything that does not
//! involve the network: form validation, configuration, `.env` handling,
//! IO and serialization.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ComplyForm
#[derive(Debug, Error)]
pub enum ComplyError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single form field failed validation
    #[error("{field}: {message}")]
    FieldValidation { field: String, message: String },

    /// Operation is not offered for this kind of record
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown environment name
    #[error("Invalid environment '{0}' (valid options: development, production)")]
    InvalidEnvironment(String),

    /// The `.env` file has no line to rewrite
    #[error("ENVIRONMENT variable not found in {0}")]
    EnvironmentLineMissing(PathBuf),

    /// The `.env` file does not exist
    #[error("{0} file not found")]
    EnvFileNotFound(PathBuf),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Another error, prefixed with what was being done
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ComplyError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ComplyError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ComplyError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(resource: &'static str, operation: &'static str) -> Self {
        ComplyError::Unsupported {
            resource,
            operation,
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ComplyError::Validation(_) | ComplyError::FieldValidation { .. }
        )
    }

    /// Check if this error comes from configuration or the `.env` file
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ComplyError::InvalidConfig(_)
                | ComplyError::InvalidEnvironment(_)
                | ComplyError::EnvironmentLineMissing(_)
                | ComplyError::EnvFileNotFound(_)
        )
    }
}

/// Result type alias using ComplyError
pub type ComplyResult<T> = Result<T, ComplyError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ComplyResult<T>;
}

impl<T, E: Into<ComplyError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ComplyResult<T> {
        self.map_err(|e| {
            let err: ComplyError = e.into();
            ComplyError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error() {
        let err = ComplyError::validation("Name is required");
        assert!(err.is_validation());
        assert!(!err.is_config());
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_field_error_reads_like_a_form_message() {
        let err = ComplyError::field("Threshold", "must be a number");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Threshold: must be a number");
    }

    #[test]
    fn test_unsupported_error() {
        let err = ComplyError::unsupported("opportunity", "delete");
        assert_eq!(err.to_string(), "delete is not supported for opportunity");
    }

    #[test]
    fn test_environment_errors_are_config() {
        let err = ComplyError::InvalidEnvironment("staging".to_string());
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Invalid environment 'staging' (valid options: development, production)"
        );

        let err = ComplyError::EnvFileNotFound(PathBuf::from(".env"));
        assert!(err.is_config());
        assert_eq!(err.to_string(), ".env file not found");
    }

    #[test]
    fn test_error_with_context() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let result: Result<(), std::io::Error> = Err(io_err);
        let err = result.with_context("Writing .env").unwrap_err();
        assert_eq!(err.to_string(), "Writing .env: IO error: denied");
    }
}
