//! # UI Hooks
//!
//! Custom Dioxus hooks for ComplyForm pages:
//! - List/filter/form pages driven by a [`CrudSource`](complyform_controller::CrudSource)
//! - Timed success banners

// ============================================================================
// Module Declarations
// ============================================================================

pub mod use_crud;

// ============================================================================
// Re-exports
// ============================================================================

pub use use_crud::{UseCrud, schedule_notice_clear, use_crud};
