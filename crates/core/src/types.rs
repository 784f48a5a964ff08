//! Core types used throughout ComplyForm
//!
//! This module contains the small closed vocabularies shared by every layer:
//! compliance rule types and severities, display tones and icons, and the
//! deployment environment of the backend.

use crate::error::ComplyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Identifier of a procurement opportunity
pub type OpportunityId = uuid::Uuid;

/// Identifier of a bid
pub type BidId = uuid::Uuid;

/// Identifier of an organization
pub type OrganizationId = uuid::Uuid;

/// Identifier of a subcontractor (network or directory)
pub type SubcontractorId = uuid::Uuid;

/// Identifier of a compliance rule
pub type RuleId = uuid::Uuid;

/// Identifier of a jurisdiction
pub type JurisdictionId = uuid::Uuid;

/// Identifier of an outreach record
pub type OutreachId = uuid::Uuid;

// ============================================================================
// Display Vocabulary
// ============================================================================

/// Colour family used for badges, rows and banners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    Red,
    Yellow,
    Blue,
    Purple,
    Green,
    #[default]
    Neutral,
}

impl Tone {
    /// CSS classes for a pill-shaped badge in this tone
    pub fn badge_class(&self) -> &'static str {
        match self {
            Tone::Red => "bg-red-500/20 text-red-300 border border-red-500/40",
            Tone::Yellow => "bg-amber-500/20 text-amber-300 border border-amber-500/40",
            Tone::Blue => "bg-sky-500/20 text-sky-300 border border-sky-500/40",
            Tone::Purple => "bg-purple-500/20 text-purple-300 border border-purple-500/40",
            Tone::Green => "bg-emerald-500/20 text-emerald-300 border border-emerald-500/40",
            Tone::Neutral => "bg-slate-600/30 text-slate-300 border border-slate-500/40",
        }
    }

    /// CSS class for plain text in this tone
    pub fn text_class(&self) -> &'static str {
        match self {
            Tone::Red => "text-red-400",
            Tone::Yellow => "text-amber-400",
            Tone::Blue => "text-sky-400",
            Tone::Purple => "text-purple-400",
            Tone::Green => "text-emerald-400",
            Tone::Neutral => "text-slate-300",
        }
    }
}

/// Small status glyphs shown next to severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Alert,
    Triangle,
    Info,
    Shield,
}

impl Icon {
    /// Glyph used to render the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Alert => "⛔",
            Icon::Triangle => "⚠️",
            Icon::Info => "ℹ️",
            Icon::Shield => "🛡️",
        }
    }
}

// ============================================================================
// Compliance Rule Vocabulary
// ============================================================================

/// Category of a compliance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// Minority business enterprise participation goal
    #[default]
    Mbe,
    /// Veteran-owned small business enterprise participation goal
    Vsbe,
    /// Disadvantaged business enterprise participation goal
    Dbe,
    /// Local preference
    LocalPref,
    /// NAICS code requirement
    Naics,
    /// Certification requirement
    Certification,
    /// Any rule type this client does not know about
    #[serde(other)]
    Other,
}

impl RuleType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RuleType::Mbe => "MBE",
            RuleType::Vsbe => "VSBE",
            RuleType::Dbe => "DBE",
            RuleType::LocalPref => "Local Preference",
            RuleType::Naics => "NAICS",
            RuleType::Certification => "Certification",
            RuleType::Other => "Other",
        }
    }

    /// Wire code sent to and received from the API
    pub fn code(&self) -> &'static str {
        match self {
            RuleType::Mbe => "MBE",
            RuleType::Vsbe => "VSBE",
            RuleType::Dbe => "DBE",
            RuleType::LocalPref => "LOCAL_PREF",
            RuleType::Naics => "NAICS",
            RuleType::Certification => "CERTIFICATION",
            RuleType::Other => "OTHER",
        }
    }

    /// Badge colour for the rule type
    pub fn tone(&self) -> Tone {
        match self {
            RuleType::Mbe => Tone::Blue,
            RuleType::Vsbe => Tone::Purple,
            RuleType::LocalPref => Tone::Green,
            _ => Tone::Neutral,
        }
    }

    /// All rule types a user may pick from
    pub fn all() -> &'static [RuleType] {
        &[
            RuleType::Mbe,
            RuleType::Vsbe,
            RuleType::Dbe,
            RuleType::LocalPref,
            RuleType::Naics,
            RuleType::Certification,
        ]
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for RuleType {
    type Err = ComplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleType::all()
            .iter()
            .copied()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ComplyError::field("Rule type", format!("unknown rule type '{s}'")))
    }
}

/// How strongly a compliance rule violation is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
    /// Any severity this client does not know about
    #[serde(other)]
    Other,
}

impl Severity {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
            Severity::Other => "Unknown",
        }
    }

    /// Wire code sent to and received from the API
    pub fn code(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Other => "OTHER",
        }
    }

    /// Colour for the severity
    pub fn tone(&self) -> Tone {
        match self {
            Severity::Error => Tone::Red,
            Severity::Warning => Tone::Yellow,
            Severity::Info => Tone::Blue,
            Severity::Other => Tone::Neutral,
        }
    }

    /// Icon for the severity
    pub fn icon(&self) -> Icon {
        match self {
            Severity::Error => Icon::Alert,
            Severity::Warning => Icon::Triangle,
            Severity::Info => Icon::Info,
            Severity::Other => Icon::Shield,
        }
    }

    /// All severities a user may pick from
    pub fn all() -> &'static [Severity] {
        &[Severity::Error, Severity::Warning, Severity::Info]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Severity {
    type Err = ComplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::all()
            .iter()
            .copied()
            .find(|sev| sev.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ComplyError::field("Severity", format!("unknown severity '{s}'")))
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Deployment environment of the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (session pooler, IPv4)
    #[default]
    Development,
    /// Hosted production (direct connection, IPv6)
    Production,
}

impl Environment {
    /// Value written to the `ENVIRONMENT` variable
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Check if this is the production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ComplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(ComplyError::InvalidEnvironment(other.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
