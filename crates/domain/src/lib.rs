//! # ComplyForm Domain
//!
//! Records exchanged with the backend and the pure logic built on them.
//!
//! - **Records**: opportunities, bids, organizations, subcontractors,
//!   directory entries, compliance rules, jurisdictions, outreach, assessments
//! - **Forms**: field schemas and payload construction from raw input
//! - **Filters**: query construction that only emits fields the user set
//! - **Display**: due-date arithmetic, urgency colouring, formatting
//! - **Assessment preview**: local scoring of an opportunity

pub mod assessment;
pub mod bid;
pub mod compliance_rule;
pub mod display;
pub mod filters;
pub mod form;
pub mod jurisdiction;
pub mod opportunity;
pub mod organization;
pub mod outreach;
pub mod serde_helpers;
pub mod subcontractor;

pub use assessment::{
    AssessmentInputs, AssessmentPreview, AssessmentRecord, AssessmentReport, AssessmentRequest,
    AssessmentSummary, FactorLevel, NetworkStats, Recommendation, RiskFactor, assess_opportunity,
    directory_match_filters,
};
pub use bid::{Bid, BidDraft, BidLine, BidSubcontractor};
pub use compliance_rule::{ComplianceRule, RuleDefinition, RuleDraft, RuleFilters, RulePatch};
pub use display::{DueUrgency, days_until_due, due_label, format_currency, format_percent};
pub use filters::{FilterSet, NoFilters, QueryParams};
pub use form::{FieldKind, FieldSpec, FormModel, FormValues, ReadOnly, SelectChoice};
pub use jurisdiction::Jurisdiction;
pub use opportunity::{Opportunity, OpportunityFilters, OpportunityListQuery};
pub use organization::{Organization, OrganizationDraft};
pub use outreach::{
    BulkOutreach, Outreach, OutreachDraft, OutreachFilters, OutreachLookups, OutreachPatch,
    OutreachStats, OutreachStatus,
};
pub use subcontractor::{
    Certification, DirectoryEntry, DirectoryFilters, Subcontractor, SubcontractorDraft,
    network_capacity,
};
