//! Procurement opportunities
//!
//! Opportunities are read-only in the client. The list page narrows them with
//! [`OpportunityFilters`] and opens a pre-bid assessment for a single one.

use crate::display::{DueUrgency, days_until_due};
use crate::filters::{FilterSet, QueryParams};
use crate::jurisdiction::Jurisdiction;
use crate::serde_helpers::{lenient_date, lenient_f64, nullable_vec};
use chrono::{DateTime, NaiveDate, Utc};
use complyform_core::{Identified, JurisdictionId, OpportunityId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Record
// ============================================================================

/// A published procurement opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    #[serde(default)]
    pub solicitation_number: Option<String>,
    #[serde(default)]
    pub jurisdiction_id: Option<JurisdictionId>,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub posted_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub relevance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mbe_goal: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vsbe_goal: Option<f64>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub naics_codes: Vec<String>,
    #[serde(default)]
    pub opportunity_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Opportunity {
    /// Days until the due date, rounded up
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<i64> {
        days_until_due(self.due_date, now)
    }

    /// Urgency of the due date
    pub fn urgency(&self, now: DateTime<Utc>) -> DueUrgency {
        DueUrgency::from_days(self.days_until_due(now))
    }

    /// Jurisdiction code, when the record embeds its jurisdiction
    pub fn jurisdiction_code(&self) -> Option<&str> {
        self.jurisdiction.as_ref().map(|j| j.code.as_str())
    }

    /// Participation goal for MBE, zero when unset
    pub fn mbe_goal_or_zero(&self) -> f64 {
        self.mbe_goal.unwrap_or(0.0)
    }

    /// Participation goal for VSBE, zero when unset
    pub fn vsbe_goal_or_zero(&self) -> f64 {
        self.vsbe_goal.unwrap_or(0.0)
    }
}

impl Identified for Opportunity {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        match &self.solicitation_number {
            Some(number) => format!("{} ({number})", self.title),
            None => self.title.clone(),
        }
    }
}

// ============================================================================
// Listing and Search
// ============================================================================

/// Paging options of the plain opportunity listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpportunityListQuery {
    pub skip: u32,
    pub limit: u32,
    pub active_only: bool,
}

impl Default for OpportunityListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            active_only: true,
        }
    }
}

impl OpportunityListQuery {
    /// Query parameters for the listing endpoint
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .integer("skip", &self.skip.to_string())
            .integer("limit", &self.limit.to_string())
            .flag("active_only", Some(self.active_only))
    }
}

/// Filter bar of the opportunities page; raw user input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityFilters {
    pub jurisdiction: String,
    pub naics: String,
    pub min_value: String,
    pub max_value: String,
    pub is_active: Option<bool>,
    pub days_until_due: String,
}

impl FilterSet for OpportunityFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .text("jurisdiction", &self.jurisdiction)
            .text("naics", &self.naics)
            .number("min_value", &self.min_value)
            .number("max_value", &self.max_value)
            .flag("is_active", self.is_active)
            .integer("days_until_due", &self.days_until_due)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use complyform_core::Tone;
    use pretty_assertions::assert_eq;

    fn sample_json() -> &'static str {
        r#"{
            "id": "6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01",
            "title": "Bridge Deck Rehabilitation",
            "solicitation_number": "MDOT-2025-114",
            "jurisdiction_id": "0b8d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b02",
            "jurisdiction": {
                "id": "0b8d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b02",
                "code": "MD",
                "name": "Maryland"
            },
            "agency": "MDOT SHA",
            "total_value": "2500000.00",
            "due_date": "2025-03-15",
            "posted_date": null,
            "mbe_goal": 25.0,
            "vsbe_goal": "3.00",
            "naics_codes": ["237310"],
            "opportunity_url": null
        }"#
    }

    #[test]
    fn test_deserialize_opportunity() {
        let opp: Opportunity = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(opp.total_value, Some(2_500_000.0));
        assert_eq!(opp.vsbe_goal, Some(3.0));
        assert_eq!(opp.jurisdiction_code(), Some("MD"));
        assert!(opp.is_active);
        assert_eq!(opp.label(), "Bridge Deck Rehabilitation (MDOT-2025-114)");
    }

    #[test]
    fn test_urgency_from_record() {
        let opp: Opportunity = serde_json::from_str(sample_json()).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(opp.days_until_due(now), Some(5));
        assert_eq!(opp.urgency(now).tone(), Tone::Red);
    }

    #[test]
    fn test_filters_only_emit_set_fields() {
        let filters = OpportunityFilters {
            jurisdiction: "MD".to_string(),
            min_value: "100000".to_string(),
            ..Default::default()
        };
        let q = filters.to_query();
        assert_eq!(q.get("jurisdiction"), Some("MD"));
        assert_eq!(q.get("min_value"), Some("100000"));
        assert!(!q.contains("naics"));
        assert!(!q.contains("max_value"));
        assert!(!q.contains("days_until_due"));
        assert!(!q.contains("is_active"));
    }

    #[test]
    fn test_default_filters_are_empty() {
        assert!(OpportunityFilters::default().is_empty());
        let filters = OpportunityFilters {
            max_value: "not a number".to_string(),
            ..Default::default()
        };
        assert!(filters.is_empty());
    }

    #[test]
    fn test_list_query_defaults() {
        let q = OpportunityListQuery::default().to_query();
        assert_eq!(q.get("skip"), Some("0"));
        assert_eq!(q.get("limit"), Some("100"));
        assert_eq!(q.get("active_only"), Some("true"));
    }
}
