//! Subcontractors
//!
//! Two record shapes exist: members of an organization's own network
//! ([`Subcontractor`], with certifications) and entries of the shared
//! subcontractor directory ([`DirectoryEntry`], searchable, read-only).

use crate::filters::{FilterSet, QueryParams, split_codes};
use crate::form::{FieldSpec, FormModel, FormValues};
use crate::serde_helpers::{lenient_f64, nullable_vec};
use complyform_core::{
    ComplyError, ComplyResult, Identified, OrganizationId, SubcontractorId, Validatable,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static FEDERAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-?\d{7}$").expect("valid federal id pattern"));

static NAICS_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,6}$").expect("valid NAICS pattern"));

/// Check a federal tax id (`12-3456789` or `123456789`)
pub fn is_valid_federal_id(raw: &str) -> bool {
    FEDERAL_ID.is_match(raw.trim())
}

/// Check a NAICS code (2 to 6 digits)
pub fn is_valid_naics(raw: &str) -> bool {
    NAICS_CODE.is_match(raw.trim())
}

// ============================================================================
// Network Subcontractors
// ============================================================================

/// A certification held by a network subcontractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub id: Option<uuid::Uuid>,
    #[serde(default)]
    pub cert_type: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub naics_codes: Vec<String>,
}

/// A subcontractor in an organization's network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcontractor {
    pub id: SubcontractorId,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    pub legal_name: String,
    #[serde(default)]
    pub federal_id: Option<String>,
    #[serde(default)]
    pub is_mbe: bool,
    #[serde(default)]
    pub is_vsbe: bool,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub certifications: Vec<Certification>,
}

impl Subcontractor {
    /// Certification types, comma separated
    pub fn certification_summary(&self) -> String {
        let types: Vec<&str> = self
            .certifications
            .iter()
            .filter_map(|c| c.cert_type.as_deref())
            .collect();
        types.join(", ")
    }

    /// Whether the subcontractor can cover a certification type for the given NAICS codes
    ///
    /// A certification matches when its type contains `cert_type`
    /// (case-insensitive) and, when both sides list NAICS codes, they share
    /// at least one. Subcontractors flagged MBE always count for MBE.
    pub fn covers(&self, cert_type: &str, naics_codes: &[String]) -> bool {
        let wanted = cert_type.to_uppercase();
        let certified = self.certifications.iter().any(|cert| {
            let Some(kind) = cert.cert_type.as_deref() else {
                return false;
            };
            if !kind.to_uppercase().contains(&wanted) {
                return false;
            }
            if naics_codes.is_empty() || cert.naics_codes.is_empty() {
                return true;
            }
            naics_codes.iter().any(|code| cert.naics_codes.contains(code))
        });
        certified || (wanted == "MBE" && self.is_mbe)
    }
}

impl Identified for Subcontractor {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.legal_name.clone()
    }
}

/// Network members able to cover a certification type
pub fn network_capacity<'a>(
    network: &'a [Subcontractor],
    cert_type: &str,
    naics_codes: &[String],
) -> Vec<&'a Subcontractor> {
    network
        .iter()
        .filter(|sub| sub.covers(cert_type, naics_codes))
        .collect()
}

/// Create payload; the organization comes from the active organization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcontractorDraft {
    pub organization_id: Option<OrganizationId>,
    pub legal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_id: Option<String>,
    pub is_mbe: bool,
    pub is_vsbe: bool,
}

impl SubcontractorDraft {
    /// Assign the owning organization
    pub fn for_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }
}

impl Validatable for SubcontractorDraft {
    fn validate(&self) -> ComplyResult<()> {
        if self.legal_name.trim().is_empty() {
            return Err(ComplyError::field("Legal name", "is required"));
        }
        if let Some(fid) = &self.federal_id {
            if !is_valid_federal_id(fid) {
                return Err(ComplyError::field(
                    "Federal ID",
                    "must look like 12-3456789",
                ));
            }
        }
        Ok(())
    }
}

impl FormModel for SubcontractorDraft {
    fn fields(_ctx: &()) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("legal_name", "Legal name").required(),
            FieldSpec::text("federal_id", "Federal ID").with_placeholder("12-3456789"),
            FieldSpec::checkbox("is_mbe", "MBE certified"),
            FieldSpec::checkbox("is_vsbe", "VSBE certified"),
        ]
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        let draft = Self {
            organization_id: None,
            legal_name: form.required_text("legal_name", "Legal name")?,
            federal_id: form.text("federal_id"),
            is_mbe: form.flag("is_mbe"),
            is_vsbe: form.flag("is_vsbe"),
        };
        draft.validate()?;
        Ok(draft)
    }
}

// ============================================================================
// Directory
// ============================================================================

/// An entry of the shared subcontractor directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: SubcontractorId,
    pub legal_name: String,
    #[serde(default)]
    pub federal_id: Option<String>,
    #[serde(default)]
    pub certifications: Value,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub jurisdiction_codes: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub naics_codes: Vec<String>,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub projects_completed: Option<i64>,
    #[serde(default)]
    pub is_verified: bool,
}

impl DirectoryEntry {
    /// Certification labels from either a list or an object of flags
    ///
    /// Accepts `["MBE", "DBE"]`, `[{"type": "MBE"}]` and `{"MBE": true}`.
    pub fn certification_labels(&self) -> Vec<String> {
        json_labels(&self.certifications)
    }

    /// Capability labels in the same shapes as certifications
    pub fn capability_labels(&self) -> Vec<String> {
        json_labels(&self.capabilities)
    }

    /// Rating out of five, one decimal
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(r) => format!("{r:.1} / 5"),
            None => "Unrated".to_string(),
        }
    }
}

impl Identified for DirectoryEntry {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.legal_name.clone()
    }
}

fn json_labels(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => ["type", "cert_type", "name"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_str))
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Bool(false) | Value::Null))
            .map(|(k, _)| k.clone())
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Minimum rating used when matching directory entries for an assessment
pub const MATCH_MIN_RATING: f64 = 2.0;

/// Filter bar of the directory page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryFilters {
    /// Comma or space separated NAICS codes
    pub naics: String,
    pub jurisdiction_code: String,
    pub mbe_only: bool,
    pub vsbe_only: bool,
    pub min_rating: String,
}

impl FilterSet for DirectoryFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .each("naics_codes", split_codes(&self.naics))
            .text("jurisdiction_code", &self.jurisdiction_code)
            .flag("is_mbe", self.mbe_only.then_some(true))
            .flag("is_vsbe", self.vsbe_only.then_some(true))
            .number("min_rating", &self.min_rating)
    }
}

// ============================================================================
// Tests
// ============================================================================
