//! Core traits for ComplyForm
//!
//! This module defines the behaviors shared by records and form payloads:
//! self-validation before anything is sent to the API, and a stable identity
//! used by list pages for keys, edit targets and delete confirmation.

use crate::error::ComplyResult;
use uuid::Uuid;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Form payloads implement this so that obviously broken input is rejected
/// locally with a field-level message instead of a round trip to the server.
///
/// # Example
///
/// ```rust,ignore
/// use complyform_core::{Validatable, ComplyResult, ComplyError};
///
/// struct OrganizationDraft {
///     name: String,
/// }
///
/// impl Validatable for OrganizationDraft {
///     fn validate(&self) -> ComplyResult<()> {
///         if self.name.trim().is_empty() {
///             return Err(ComplyError::field("Name", "is required"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `ComplyError` describing the problem.
    fn validate(&self) -> ComplyResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Identified Trait
// ============================================================================

/// Records that carry a server-assigned identifier
pub trait Identified {
    /// Server-assigned identifier
    fn id(&self) -> Uuid;

    /// Short human-readable label (used in confirmations and banners)
    fn label(&self) -> String;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComplyError;

    struct Named(String);

    impl Validatable for Named {
        fn validate(&self) -> ComplyResult<()> {
            if self.0.trim().is_empty() {
                return Err(ComplyError::field("Name", "is required"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_validatable_defaults() {
        assert!(Named("Acme".to_string()).is_valid());

        let blank = Named("  ".to_string());
        assert!(!blank.is_valid());
        assert_eq!(blank.validation_errors(), vec!["Name: is required"]);
    }
}
