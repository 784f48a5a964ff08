//! Client settings
//!
//! Settings come from the process environment after an optional `.env` file
//! has been loaded with `dotenvy`. The backend database URLs are only read so
//! that the active connection can be reported; the client never connects to
//! the database itself.
//!
//! ## Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ENVIRONMENT` | `development` |
//! | `DATABASE_URL_LOCAL` / `DATABASE_URL_PRODUCTION` | unset |
//! | `COMPLYFORM_API_URL` | `http://127.0.0.1:8000` |
//! | `API_V1_PREFIX` | `/api/v1` |
//! | `COMPLYFORM_TIMEOUT_SECS` | `30` |
//! | `DEBUG` | `true` |
//! | `COMPLYFORM_ORGANIZATION_ID` | unset |

use complyform_core::{ComplyError, ComplyResult, Environment, OrganizationId, ResultExt};
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default API version prefix
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Name of the backend project, shown in the window title
pub const PROJECT_NAME: &str = "ComplyForm API";

// ============================================================================
// Database Profile
// ============================================================================

/// How the backend reaches its database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Hosted session pooler, reachable over IPv4
    Pooler,
    /// Direct hosted connection, IPv6 only
    Direct,
    /// Plain PostgreSQL, usually on the local machine
    Local,
}

impl ConnectionKind {
    /// Classify a connection string by its host
    pub fn classify(url: &str) -> Self {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_else(|| url.to_lowercase());

        if host.contains("pooler.supabase.com") {
            ConnectionKind::Pooler
        } else if host.starts_with("db.") && host.ends_with(".supabase.co") {
            ConnectionKind::Direct
        } else {
            ConnectionKind::Local
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionKind::Pooler => "Session Pooler (IPv4)",
            ConnectionKind::Direct => "Direct Connection (IPv6)",
            ConnectionKind::Local => "Local PostgreSQL",
        }
    }

    /// Where this kind of connection is meant to be used
    pub fn best_for(&self) -> &'static str {
        match self {
            ConnectionKind::Pooler => "local development on your machine",
            ConnectionKind::Direct => "production deployment",
            ConnectionKind::Local => "offline development",
        }
    }
}

/// The active backend database connection, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseProfile {
    pub kind: ConnectionKind,
    /// Connection string with the password replaced
    pub masked_url: String,
}

impl DatabaseProfile {
    /// Classify and mask a connection string
    pub fn from_url(url: &str) -> Self {
        Self {
            kind: ConnectionKind::classify(url),
            masked_url: mask_password(url),
        }
    }
}

/// Replace the password of a connection string with `****`
pub fn mask_password(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("****")).is_ok() {
                parsed.to_string()
            } else {
                "****".to_string()
            }
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => "****".to_string(),
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Runtime settings of the client
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: Environment,
    pub database_url_local: Option<String>,
    pub database_url_production: Option<String>,
    /// Backend address without the version prefix
    pub api_url: String,
    /// Version prefix, e.g. `/api/v1`
    pub api_prefix: String,
    pub timeout: Duration,
    pub debug: bool,
    /// Organization selected when the app starts
    pub organization_id: Option<OrganizationId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            database_url_local: None,
            database_url_production: None,
            api_url: DEFAULT_API_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: true,
            organization_id: None,
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read settings from the environment
    pub fn load() -> ComplyResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a lookup function
    pub fn from_lookup<F>(lookup: F) -> ComplyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let environment = get("ENVIRONMENT")
            .map(|raw| parse_environment(&raw))
            .unwrap_or(defaults.environment);

        let api_url = get("COMPLYFORM_API_URL")
            .unwrap_or(defaults.api_url)
            .trim_end_matches('/')
            .to_string();
        Url::parse(&api_url)
            .map_err(|e| ComplyError::InvalidConfig(format!("COMPLYFORM_API_URL: {e}")))?;

        let api_prefix = normalize_prefix(&get("API_V1_PREFIX").unwrap_or(defaults.api_prefix));

        let timeout = match get("COMPLYFORM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    ComplyError::InvalidConfig(format!(
                        "COMPLYFORM_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let debug = get("DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.debug);

        let organization_id = match get("COMPLYFORM_ORGANIZATION_ID") {
            Some(raw) => Some(raw.parse::<OrganizationId>().map_err(|_| {
                ComplyError::InvalidConfig(format!(
                    "COMPLYFORM_ORGANIZATION_ID is not a valid id: '{raw}'"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            environment,
            database_url_local: get("DATABASE_URL_LOCAL"),
            database_url_production: get("DATABASE_URL_PRODUCTION"),
            api_url,
            api_prefix,
            timeout,
            debug,
            organization_id,
        })
    }

    /// Database URL of the active environment
    pub fn database_url(&self) -> Option<&str> {
        match self.environment {
            Environment::Production => self.database_url_production.as_deref(),
            Environment::Development => self.database_url_local.as_deref(),
        }
    }

    /// Profile of the active database connection
    pub fn database_profile(&self) -> Option<DatabaseProfile> {
        self.database_url().map(DatabaseProfile::from_url)
    }

    /// Base of every endpoint: address plus version prefix
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_url, self.api_prefix)
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Anything but a known name falls back to development
fn parse_environment(raw: &str) -> Environment {
    raw.parse::<Environment>().unwrap_or_else(|_| {
        tracing::warn!(value = %raw, "Unknown ENVIRONMENT, using development");
        Environment::Development
    })
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

// ============================================================================
// Environment Switching
// ============================================================================

/// Default location of the `.env` file
pub fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

/// Rewrite the `ENVIRONMENT=` line of a `.env` file
///
/// Only the first `ENVIRONMENT=` line is replaced; every other line is kept
/// as is.
pub fn switch_environment(path: &Path, environment: Environment) -> ComplyResult<()> {
    if !path.exists() {
        return Err(ComplyError::EnvFileNotFound(path.to_path_buf()));
    }

    let contents =
        fs::read_to_string(path).with_context(format!("Reading {}", path.display()))?;
    let mut replaced = false;
    let mut output = String::with_capacity(contents.len());

    for line in contents.split_inclusive('\n') {
        if !replaced && line.starts_with("ENVIRONMENT=") {
            output.push_str(&format!("ENVIRONMENT={}\n", environment.as_str()));
            replaced = true;
        } else {
            output.push_str(line);
        }
    }

    if !replaced {
        return Err(ComplyError::EnvironmentLineMissing(path.to_path_buf()));
    }

    fs::write(path, output).with_context(format!("Writing {}", path.display()))?;
    tracing::info!(environment = %environment, path = %path.display(), "Environment switched");
    Ok(())
}

/// Read the `ENVIRONMENT=` value of a `.env` file, if any
///
/// Unknown names read as development, the same as [`Settings::load`].
pub fn read_environment(path: &Path) -> ComplyResult<Option<Environment>> {
    if !path.exists() {
        return Err(ComplyError::EnvFileNotFound(path.to_path_buf()));
    }
    let contents =
        fs::read_to_string(path).with_context(format!("Reading {}", path.display()))?;
    Ok(contents
        .lines()
        .find_map(|line| line.strip_prefix("ENVIRONMENT="))
        .map(|value| parse_environment(value.trim().trim_matches('"'))))
}

// ============================================================================
// Tests
// ============================================================================
