//! Subcontractor outreach tracking
//!
//! Outreach records track which subcontractors an organization contacted
//! for an opportunity and how far each conversation got.

use crate::filters::{FilterSet, QueryParams};
use crate::form::{FieldSpec, FormModel, FormValues, SelectChoice};
use crate::opportunity::Opportunity;
use crate::serde_helpers::{lenient_date, lenient_f64_or_zero};
use crate::subcontractor::DirectoryEntry;
use chrono::NaiveDate;
use complyform_core::{
    ComplyError, ComplyResult, Identified, OpportunityId, OrganizationId, OutreachId,
    SubcontractorId, Tone,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Status
// ============================================================================

/// Progress of an outreach conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutreachStatus {
    #[default]
    Contacted,
    Responded,
    Committed,
    Declined,
    #[serde(other)]
    Other,
}

impl OutreachStatus {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            OutreachStatus::Contacted => "Contacted",
            OutreachStatus::Responded => "Responded",
            OutreachStatus::Committed => "Committed",
            OutreachStatus::Declined => "Declined",
            OutreachStatus::Other => "Unknown",
        }
    }

    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            OutreachStatus::Contacted => "CONTACTED",
            OutreachStatus::Responded => "RESPONDED",
            OutreachStatus::Committed => "COMMITTED",
            OutreachStatus::Declined => "DECLINED",
            OutreachStatus::Other => "OTHER",
        }
    }

    /// Badge colour
    pub fn tone(&self) -> Tone {
        match self {
            OutreachStatus::Contacted => Tone::Blue,
            OutreachStatus::Responded => Tone::Yellow,
            OutreachStatus::Committed => Tone::Green,
            OutreachStatus::Declined => Tone::Red,
            OutreachStatus::Other => Tone::Neutral,
        }
    }

    /// Statuses a user may set
    pub fn all() -> &'static [OutreachStatus] {
        &[
            OutreachStatus::Contacted,
            OutreachStatus::Responded,
            OutreachStatus::Committed,
            OutreachStatus::Declined,
        ]
    }

    /// Still awaiting a reply
    pub fn is_pending(&self) -> bool {
        matches!(self, OutreachStatus::Contacted)
    }
}

impl std::fmt::Display for OutreachStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for OutreachStatus {
    type Err = ComplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutreachStatus::all()
            .iter()
            .copied()
            .find(|st| st.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ComplyError::field("Status", format!("unknown status '{s}'")))
    }
}

fn status_choices() -> Vec<SelectChoice> {
    OutreachStatus::all()
        .iter()
        .map(|s| SelectChoice::new(s.code(), s.display_name()))
        .collect()
}

// ============================================================================
// Record
// ============================================================================

/// Name of the subcontractor embedded in detailed outreach responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachParty {
    #[serde(default)]
    pub legal_name: String,
}

/// Title of the opportunity embedded in detailed outreach responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachOpportunity {
    #[serde(default)]
    pub title: String,
}

/// An outreach record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outreach {
    pub id: OutreachId,
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
    pub subcontractor_id: SubcontractorId,
    #[serde(default)]
    pub status: OutreachStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub contact_date: Option<NaiveDate>,
    #[serde(default)]
    pub subcontractor: Option<OutreachParty>,
    #[serde(default)]
    pub opportunity: Option<OutreachOpportunity>,
}

impl Outreach {
    /// Subcontractor name, or its id when the response is not detailed
    pub fn subcontractor_name(&self) -> String {
        self.subcontractor
            .as_ref()
            .map(|s| s.legal_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.subcontractor_id.to_string())
    }

    /// Opportunity title, or its id when the response is not detailed
    pub fn opportunity_title(&self) -> String {
        self.opportunity
            .as_ref()
            .map(|o| o.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.opportunity_id.to_string())
    }

    /// Form values for a status update
    pub fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("status", self.status.code())
            .with("notes", self.notes.clone().unwrap_or_default())
    }
}

impl Identified for Outreach {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        format!("outreach to {}", self.subcontractor_name())
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Reference data for the outreach form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutreachLookups {
    pub opportunities: Vec<Opportunity>,
    pub subcontractors: Vec<DirectoryEntry>,
}

/// Create payload; the organization comes from the active organization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutreachDraft {
    pub organization_id: Option<OrganizationId>,
    pub opportunity_id: OpportunityId,
    pub subcontractor_id: SubcontractorId,
    pub status: OutreachStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_date: Option<NaiveDate>,
}

impl OutreachDraft {
    /// Assign the owning organization
    pub fn for_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }
}

impl FormModel<OutreachLookups> for OutreachDraft {
    fn fields(lookups: &OutreachLookups) -> Vec<FieldSpec> {
        let opportunities = lookups
            .opportunities
            .iter()
            .map(|o| SelectChoice::new(o.id.to_string(), o.label()))
            .collect();
        let subcontractors = lookups
            .subcontractors
            .iter()
            .map(|s| SelectChoice::new(s.id.to_string(), s.legal_name.clone()))
            .collect();
        vec![
            FieldSpec::select("opportunity_id", "Opportunity", opportunities).required(),
            FieldSpec::select("subcontractor_id", "Subcontractor", subcontractors).required(),
            FieldSpec::select("status", "Status", status_choices())
                .with_default(OutreachStatus::default().code()),
            FieldSpec::text("contact_date", "Contact date").with_placeholder("YYYY-MM-DD"),
            FieldSpec::text_area("notes", "Notes"),
        ]
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        let contact_date = match form.text("contact_date") {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| ComplyError::field("Contact date", "must be YYYY-MM-DD"))?,
            ),
            None => None,
        };
        let status = match form.text("status") {
            Some(code) => code.parse::<OutreachStatus>()?,
            None => OutreachStatus::default(),
        };
        Ok(Self {
            organization_id: None,
            opportunity_id: form.required_uuid("opportunity_id", "Opportunity")?,
            subcontractor_id: form.required_uuid("subcontractor_id", "Subcontractor")?,
            status,
            notes: form.text("notes"),
            contact_date,
        })
    }
}

/// Status/notes update payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutreachPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OutreachStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FormModel<OutreachLookups> for OutreachPatch {
    fn fields(_lookups: &OutreachLookups) -> Vec<FieldSpec> {
        vec![
            FieldSpec::select("status", "Status", status_choices()).required(),
            FieldSpec::text_area("notes", "Notes"),
        ]
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        Ok(Self {
            status: Some(
                form.required_text("status", "Status")?
                    .parse::<OutreachStatus>()?,
            ),
            notes: form.text("notes"),
        })
    }
}

/// Bulk creation of outreach records after an assessment
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutreach {
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
    pub subcontractor_ids: Vec<SubcontractorId>,
    pub initial_status: OutreachStatus,
    pub notes: Option<String>,
}

impl BulkOutreach {
    /// Query parameters; the subcontractor ids travel in the body
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .id("organization_id", Some(self.organization_id))
            .id("opportunity_id", Some(self.opportunity_id))
            .text("initial_status", self.initial_status.code())
            .text("notes", self.notes.as_deref().unwrap_or(""))
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Outreach statistics for an organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutreachStats {
    #[serde(default, alias = "total_outreach")]
    pub total: u64,
    #[serde(default, alias = "status_breakdown", alias = "by_status")]
    pub status_counts: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub response_rate: f64,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub commitment_rate: f64,
}

impl OutreachStats {
    /// Count for one status
    pub fn count(&self, status: OutreachStatus) -> u64 {
        self.status_counts.get(status.code()).copied().unwrap_or(0)
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Filter bar of the outreach page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutreachFilters {
    /// Only records still awaiting a reply
    pub pending_only: bool,
    pub opportunity_id: Option<OpportunityId>,
}

impl FilterSet for OutreachFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .flag("pending_only", self.pending_only.then_some(true))
            .id("opportunity_id", self.opportunity_id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn test_status_tones() {
        assert_eq!(OutreachStatus::Contacted.tone(), Tone::Blue);
        assert_eq!(OutreachStatus::Committed.tone(), Tone::Green);
        assert_eq!(OutreachStatus::Declined.tone(), Tone::Red);
        let unknown: OutreachStatus = serde_json::from_str("\"GHOSTED\"").unwrap();
        assert_eq!(unknown.tone(), Tone::Neutral);
    }

    #[test]
    fn test_outreach_names_fall_back_to_ids() {
        let record: Outreach = serde_json::from_str(
            r#"{
                "id": "6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01",
                "organization_id": "0b8d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b02",
                "opportunity_id": "1c2d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b03",
                "subcontractor_id": "2d3e8a52-5d8b-4d5a-9a0c-5a7f2f0c1b04",
                "status": "RESPONDED",
                "contact_date": "2025-02-01T14:00:00",
                "subcontractor": {"legal_name": "Harbor Steel"}
            }"#,
        )
        .unwrap();
        assert_eq!(record.subcontractor_name(), "Harbor Steel");
        assert_eq!(
            record.opportunity_title(),
            "1c2d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b03"
        );
        assert_eq!(record.contact_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(record.to_form().get("status"), "RESPONDED");
    }

    #[test]
    fn test_draft_from_form() {
        let opp = Uuid::new_v4();
        let sub = Uuid::new_v4();
        let form = OutreachDraft::blank(&OutreachLookups::default())
            .with("opportunity_id", opp.to_string())
            .with("subcontractor_id", sub.to_string())
            .with("contact_date", "2025-02-01");
        let draft = OutreachDraft::from_form(&form).unwrap();
        assert_eq!(draft.status, OutreachStatus::Contacted);
        assert_eq!(draft.contact_date, NaiveDate::from_ymd_opt(2025, 2, 1));

        let bad = form.with("contact_date", "Feb 1");
        assert!(OutreachDraft::from_form(&bad).is_err());
    }

    #[test]
    fn test_patch_serializes_status_only_when_set() {
        let patch = OutreachPatch::from_form(&FormValues::new().with("status", "committed")).unwrap();
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"status": "COMMITTED"}));
    }

    #[test]
    fn test_bulk_query() {
        let bulk = BulkOutreach {
            organization_id: Uuid::new_v4(),
            opportunity_id: Uuid::new_v4(),
            subcontractor_ids: vec![Uuid::new_v4()],
            initial_status: OutreachStatus::Contacted,
            notes: None,
        };
        let q = bulk.to_query();
        assert_eq!(q.get("initial_status"), Some("CONTACTED"));
        assert!(!q.contains("notes"));
    }

    #[test]
    fn test_stats_accept_alias_keys() {
        let stats: OutreachStats = serde_json::from_str(
            r#"{
                "total_outreach": 10,
                "by_status": {"CONTACTED": 4, "COMMITTED": 3},
                "response_rate": 60.0,
                "commitment_rate": "30.0"
            }"#,
        )
        .unwrap();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.count(OutreachStatus::Committed), 3);
        assert_eq!(stats.count(OutreachStatus::Declined), 0);
        assert_eq!(stats.commitment_rate, 30.0);
    }
}
