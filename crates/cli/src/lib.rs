//! # ComplyForm CLI
//!
//! Command-line interface for ComplyForm.
//!
//! Covers the tasks that are handy without opening the desktop window:
//! switching the backend environment, checking connectivity, searching
//! opportunities, managing compliance rules and running assessments.
//!
//! ## Commands
//!
//! - `env show` / `env switch` - Inspect or rewrite the `.env` environment
//! - `check` - Verify that the backend answers
//! - `opportunities` - Search opportunities
//! - `rules list` / `rules delete` - Compliance rules
//! - `assess` - Pre-bid assessment of one opportunity
//!

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::{AssessArgs, Cli, Commands, EnvAction, EnvironmentArg, OpportunityArgs, RuleAction};
pub use commands::run;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");
