//! Bids and their subcontractor participation

use crate::form::{FieldSpec, FormModel, FormValues};
use crate::organization::{Organization, organization_choices};
use crate::serde_helpers::{lenient_f64, lenient_f64_or_zero, nullable_vec};
use complyform_core::{
    BidId, ComplyError, ComplyResult, Identified, OrganizationId, SubcontractorId, Validatable,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// One subcontractor's share of a bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidSubcontractor {
    #[serde(default)]
    pub subcontractor_id: Option<SubcontractorId>,
    #[serde(default, alias = "legal_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub amount: f64,
    #[serde(default)]
    pub is_mbe: bool,
}

/// A submitted or draft bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub organization_id: OrganizationId,
    pub solicitation_number: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mbe_goal: Option<f64>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub subcontractors: Vec<BidSubcontractor>,
}

impl Bid {
    /// Sum of amounts assigned to MBE subcontractors
    pub fn mbe_amount(&self) -> f64 {
        self.subcontractors
            .iter()
            .filter(|s| s.is_mbe)
            .map(|s| s.amount)
            .sum()
    }

    /// MBE participation as a percentage of the total amount
    ///
    /// `None` when the bid has no positive total.
    pub fn mbe_participation(&self) -> Option<f64> {
        match self.total_amount {
            Some(total) if total > 0.0 => Some(self.mbe_amount() / total * 100.0),
            _ => None,
        }
    }

    /// Whether participation reaches the goal; `None` when either is unknown
    pub fn meets_mbe_goal(&self) -> Option<bool> {
        let goal = self.mbe_goal?;
        let participation = self.mbe_participation()?;
        Some(participation >= goal)
    }
}

impl Identified for Bid {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.solicitation_number.clone()
    }
}

// ============================================================================
// Create Payload
// ============================================================================

/// A subcontractor line entered on the create-bid page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidLine {
    pub name: String,
    pub amount: f64,
    pub is_mbe: bool,
}

/// Create payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidDraft {
    pub organization_id: OrganizationId,
    pub solicitation_number: String,
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbe_goal: Option<f64>,
    pub subcontractors: Vec<BidLine>,
}

impl BidDraft {
    /// Append a subcontractor line
    pub fn with_line(mut self, line: BidLine) -> Self {
        self.subcontractors.push(line);
        self
    }
}

impl Validatable for BidDraft {
    fn validate(&self) -> ComplyResult<()> {
        if self.solicitation_number.trim().is_empty() {
            return Err(ComplyError::field("Solicitation number", "is required"));
        }
        if self.total_amount <= 0.0 {
            return Err(ComplyError::field("Total amount", "must be greater than zero"));
        }
        if self.mbe_goal.is_some_and(|goal| !(0.0..=100.0).contains(&goal)) {
            return Err(ComplyError::field("MBE goal", "must be between 0 and 100"));
        }
        let assigned: f64 = self.subcontractors.iter().map(|l| l.amount).sum();
        if assigned > self.total_amount {
            return Err(ComplyError::field(
                "Subcontractors",
                "amounts exceed the bid total",
            ));
        }
        Ok(())
    }
}

impl FormModel<Vec<Organization>> for BidDraft {
    fn fields(organizations: &Vec<Organization>) -> Vec<FieldSpec> {
        let default_org = organizations
            .first()
            .map(|o| o.id.to_string())
            .unwrap_or_default();
        vec![
            FieldSpec::select(
                "organization_id",
                "Organization",
                organization_choices(organizations),
            )
            .required()
            .with_default(default_org),
            FieldSpec::text("solicitation_number", "Solicitation number")
                .required()
                .with_placeholder("MDOT-2025-114"),
            FieldSpec::number("total_amount", "Total amount").required(),
            FieldSpec::percent("mbe_goal", "MBE goal (%)"),
        ]
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        let draft = Self {
            organization_id: form.required_uuid("organization_id", "Organization")?,
            solicitation_number: form.required_text("solicitation_number", "Solicitation number")?,
            total_amount: form.required_number("total_amount", "Total amount")?,
            mbe_goal: form.number("mbe_goal", "MBE goal")?,
            subcontractors: Vec::new(),
        };
        draft.validate()?;
        Ok(draft)
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

    fn bid(total: Option<f64>, goal: Option<f64>) -> Bid {
        Bid {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            solicitation_number: "MDOT-2025-114".to_string(),
            total_amount: total,
            mbe_goal: goal,
            subcontractors: vec![
                BidSubcontractor {
                    subcontractor_id: None,
                    name: "Chesapeake Paving".to_string(),
                    amount: 150_000.0,
                    is_mbe: true,
                },
                BidSubcontractor {
                    subcontractor_id: None,
                    name: "Harbor Steel".to_string(),
                    amount: 300_000.0,
                    is_mbe: false,
                },
            ],
        }
    }

    #[test]
    fn test_mbe_participation() {
        let b = bid(Some(1_000_000.0), Some(15.0));
        assert_eq!(b.mbe_amount(), 150_000.0);
        assert_eq!(b.mbe_participation(), Some(15.0));
        assert_eq!(b.meets_mbe_goal(), Some(true));

        let b = bid(Some(1_000_000.0), Some(20.0));
        assert_eq!(b.meets_mbe_goal(), Some(false));
    }

    #[test]
    fn test_participation_without_total() {
        assert_eq!(bid(None, Some(10.0)).mbe_participation(), None);
        assert_eq!(bid(Some(0.0), Some(10.0)).meets_mbe_goal(), None);
    }

    #[test]
    fn test_draft_from_form() {
        let org = Uuid::new_v4();
        let form = FormValues::new()
            .with("organization_id", org.to_string())
            .with("solicitation_number", "BPW-77")
            .with("total_amount", "250000")
            .with("mbe_goal", "");
        let draft = BidDraft::from_form(&form).unwrap();
        assert_eq!(draft.organization_id, org);
        assert_eq!(draft.total_amount, 250_000.0);
        assert_eq!(draft.mbe_goal, None);
    }

    #[test]
    fn test_draft_rejects_bad_goal_and_overallocation() {
        let org = Uuid::new_v4();
        let form = FormValues::new()
            .with("organization_id", org.to_string())
            .with("solicitation_number", "BPW-77")
            .with("total_amount", "1000")
            .with("mbe_goal", "140");
        assert!(BidDraft::from_form(&form).is_err());

        let draft = BidDraft {
            organization_id: org,
            solicitation_number: "BPW-77".to_string(),
            total_amount: 1000.0,
            mbe_goal: None,
            subcontractors: Vec::new(),
        }
        .with_line(BidLine {
            name: "Harbor Steel".to_string(),
            amount: 1500.0,
            is_mbe: false,
        });
        assert!(!draft.is_valid());
    }

    #[test]
    fn test_organization_field_defaults_to_first() {
        let orgs = vec![Organization {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
        }];
        let blank = BidDraft::blank(&orgs);
        assert_eq!(blank.get("organization_id"), orgs[0].id.to_string());
    }
}
