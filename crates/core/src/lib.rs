//! # ComplyForm Core
//!
//! Core types, traits, and error handling for ComplyForm.
//!
//! This crate provides the foundational building blocks shared by the
//! domain model, the API client, the page controllers and the desktop UI:
//!
//! - **Types**: Rule types, severities, display tones and icons, environments
//! - **Traits**: `Validatable` and `Identified`
//! - **Errors**: Unified error handling with `ComplyError` and `ComplyResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ComplyError, ComplyResult, ResultExt};
pub use traits::{Identified, Validatable};
pub use types::{
    BidId, Environment, Icon, JurisdictionId, OpportunityId, OrganizationId, OutreachId,
    RuleId, RuleType, Severity, SubcontractorId, Tone,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
