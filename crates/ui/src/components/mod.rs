//! # UI Components
//!
//! Building blocks shared by every page:
//! - **Inputs**: text, textarea, select, checkbox and schema-driven fields
//! - **FormView**: inline create/edit form
//! - **Banner / Badge**: status messages and tone-coloured labels
//! - **ConfirmDeleteDialog**: delete confirmation
//! - **Layout**: page header, empty/loading states, table, stat

pub mod banner;
pub mod confirm_delete;
pub mod form_view;
pub mod inputs;
pub mod layout;

pub use banner::{Badge, Banner};
pub use confirm_delete::ConfirmDeleteDialog;
pub use form_view::FormView;
pub use inputs::{Checkbox, FieldInput, Select, SelectOption, TextArea, TextInput};
pub use layout::{DataTable, EmptyState, Loading, PageHeader, Stat};
