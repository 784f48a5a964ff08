//! # ComplyForm Client
//!
//! Everything that talks to the outside world:
//!
//! - **Settings**: environment variables and `.env` handling, including
//!   switching the backend between development and production
//! - **ApiClient**: `reqwest` wrapper with one method per REST endpoint
//! - **Errors**: `ClientError`, carrying the server's `detail` message

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::ApiClient;
pub use config::{
    ConnectionKind, DatabaseProfile, Settings, default_env_file, read_environment,
    switch_environment,
};
pub use error::{ClientError, ClientResult};
