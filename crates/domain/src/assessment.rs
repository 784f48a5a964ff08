//! Pre-bid assessments
//!
//! The server runs the authoritative assessment and stores it. The client
//! also computes a [`preview`](assess_opportunity) from data it already has
//! (the organization network and directory matches) so the page can show the
//! expected outcome before anything is persisted. The preview follows the
//! same scoring rules as the server.

use crate::filters::split_codes;
use crate::form::format_number;
use crate::opportunity::Opportunity;
use crate::serde_helpers::{lenient_date, lenient_f64_or_zero, nullable_vec};
use crate::subcontractor::{DirectoryEntry, DirectoryFilters, MATCH_MIN_RATING, Subcontractor, network_capacity};
use chrono::NaiveDate;
use complyform_core::{Identified, OpportunityId, OrganizationId, Tone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Scoring Constants
// ============================================================================

/// Risk score at or above which the recommendation is NO_BID
pub const NO_BID_THRESHOLD: u32 = 60;

/// Risk score at or above which the recommendation is CAUTION
pub const CAUTION_THRESHOLD: u32 = 30;

/// Contract value above which the team needs extra capacity
pub const HIGH_VALUE: f64 = 10_000_000.0;

/// Contract value below which margins are thin
pub const LOW_VALUE: f64 = 100_000.0;

const MBE_NETWORK_TARGET: usize = 3;
const VSBE_NETWORK_TARGET: usize = 2;

// ============================================================================
// Recommendation
// ============================================================================

/// Outcome of an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    #[default]
    Bid,
    Caution,
    NoBid,
    #[serde(other)]
    Other,
}

impl Recommendation {
    /// Recommendation for a risk score
    pub fn from_score(score: u32) -> Self {
        if score >= NO_BID_THRESHOLD {
            Recommendation::NoBid
        } else if score >= CAUTION_THRESHOLD {
            Recommendation::Caution
        } else {
            Recommendation::Bid
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Recommendation::Bid => "Bid",
            Recommendation::Caution => "Caution",
            Recommendation::NoBid => "No Bid",
            Recommendation::Other => "Unknown",
        }
    }

    /// Badge colour
    pub fn tone(&self) -> Tone {
        match self {
            Recommendation::Bid => Tone::Green,
            Recommendation::Caution => Tone::Yellow,
            Recommendation::NoBid => Tone::Red,
            Recommendation::Other => Tone::Neutral,
        }
    }

    /// Standard explanation for the recommendation
    pub fn reason(&self) -> &'static str {
        match self {
            Recommendation::NoBid => {
                "HIGH RISK: Significant compliance gaps or timing constraints. \
                 Recommend passing on this opportunity."
            }
            Recommendation::Caution => {
                "MODERATE RISK: Some concerns identified. \
                 Proceed with careful planning and strong subcontractor commitments."
            }
            Recommendation::Bid => {
                "LOW RISK: Good subcontractor availability and reasonable timeline. \
                 Strong opportunity to pursue."
            }
            Recommendation::Other => "",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Risk Factors
// ============================================================================

/// Severity prefix of a risk factor message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorLevel {
    Critical,
    Warning,
    Caution,
    Info,
    Good,
    Excellent,
}

impl FactorLevel {
    /// Prefix used in factor messages
    pub fn prefix(&self) -> &'static str {
        match self {
            FactorLevel::Critical => "CRITICAL",
            FactorLevel::Warning => "WARNING",
            FactorLevel::Caution => "CAUTION",
            FactorLevel::Info => "INFO",
            FactorLevel::Good => "GOOD",
            FactorLevel::Excellent => "EXCELLENT",
        }
    }

    /// Colour of the factor
    pub fn tone(&self) -> Tone {
        match self {
            FactorLevel::Critical => Tone::Red,
            FactorLevel::Warning | FactorLevel::Caution => Tone::Yellow,
            FactorLevel::Info => Tone::Blue,
            FactorLevel::Good | FactorLevel::Excellent => Tone::Green,
        }
    }

    const ALL: [FactorLevel; 6] = [
        FactorLevel::Critical,
        FactorLevel::Warning,
        FactorLevel::Caution,
        FactorLevel::Info,
        FactorLevel::Good,
        FactorLevel::Excellent,
    ];
}

/// One line of an assessment's risk breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFactor {
    pub level: Option<FactorLevel>,
    pub message: String,
}

impl RiskFactor {
    fn new(level: FactorLevel, detail: impl AsRef<str>) -> Self {
        Self {
            level: Some(level),
            message: format!("{}: {}", level.prefix(), detail.as_ref()),
        }
    }

    /// Classify a factor message by its prefix
    pub fn parse(message: &str) -> Self {
        let level = FactorLevel::ALL
            .into_iter()
            .find(|l| message.starts_with(&format!("{}:", l.prefix())));
        Self {
            level,
            message: message.to_string(),
        }
    }

    /// Colour of the factor, neutral when unclassified
    pub fn tone(&self) -> Tone {
        self.level.map(|l| l.tone()).unwrap_or_default()
    }
}

// ============================================================================
// Server Records
// ============================================================================

/// Request body of the assess endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssessmentRequest {
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
}

/// Size of the organization's own network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub mbe_count: usize,
    #[serde(default)]
    pub vsbe_count: usize,
}

/// Full report returned by the assess endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub id: uuid::Uuid,
    #[serde(default)]
    pub assessed_at: Option<String>,
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
    #[serde(default)]
    pub overall_risk_score: u32,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub mbe_gap_percentage: f64,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub vsbe_gap_percentage: f64,
    #[serde(default)]
    pub available_subcontractors_count: usize,
    #[serde(default)]
    pub recommendation: Recommendation,
    #[serde(default)]
    pub recommendation_reason: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub risk_factors: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub matching_subcontractors: Vec<DirectoryEntry>,
    #[serde(default)]
    pub opportunity: Option<Opportunity>,
    #[serde(default)]
    pub organization_network: Option<NetworkStats>,
}

impl AssessmentReport {
    /// Risk factors with their levels
    pub fn factors(&self) -> Vec<RiskFactor> {
        self.risk_factors.iter().map(|f| RiskFactor::parse(f)).collect()
    }
}

/// A stored assessment from an organization's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: uuid::Uuid,
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
    #[serde(default)]
    pub overall_risk_score: Option<u32>,
    #[serde(default)]
    pub recommendation: Recommendation,
    #[serde(default)]
    pub recommendation_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub assessed_at: Option<NaiveDate>,
    #[serde(default)]
    pub opportunity: Option<Opportunity>,
}

impl Identified for AssessmentRecord {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.opportunity
            .as_ref()
            .map(|o| o.title.clone())
            .unwrap_or_else(|| self.opportunity_id.to_string())
    }
}

/// Counts and average score over an organization's assessments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    #[serde(default)]
    pub total_assessments: usize,
    #[serde(default)]
    pub bid_recommended: usize,
    #[serde(default)]
    pub caution_recommended: usize,
    #[serde(default)]
    pub no_bid_recommended: usize,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub average_risk_score: f64,
}

impl AssessmentSummary {
    /// Summarize a list of assessments; the average is rounded to 2 decimals
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let count = |r: Recommendation| records.iter().filter(|a| a.recommendation == r).count();
        let total = records.len();
        let average = if total == 0 {
            0.0
        } else {
            let sum: u32 = records
                .iter()
                .map(|a| a.overall_risk_score.unwrap_or(0))
                .sum();
            (f64::from(sum) / total as f64 * 100.0).round() / 100.0
        };
        Self {
            total_assessments: total,
            bid_recommended: count(Recommendation::Bid),
            caution_recommended: count(Recommendation::Caution),
            no_bid_recommended: count(Recommendation::NoBid),
            average_risk_score: average,
        }
    }
}

// ============================================================================
// Local Preview
// ============================================================================

/// Directory filters used to find matches for a goal category
///
/// `None` when the opportunity lists no NAICS codes, has no embedded
/// jurisdiction, or has no positive goal for the category.
pub fn directory_match_filters(opportunity: &Opportunity, mbe: bool) -> Option<DirectoryFilters> {
    let goal = if mbe {
        opportunity.mbe_goal_or_zero()
    } else {
        opportunity.vsbe_goal_or_zero()
    };
    if opportunity.naics_codes.is_empty() || goal <= 0.0 {
        return None;
    }
    let jurisdiction = opportunity.jurisdiction_code()?;
    Some(DirectoryFilters {
        naics: opportunity.naics_codes.join(","),
        jurisdiction_code: jurisdiction.to_string(),
        mbe_only: mbe,
        vsbe_only: !mbe,
        min_rating: format_number(MATCH_MIN_RATING),
    })
}

/// Data the preview is computed from
#[derive(Debug, Clone, Copy)]
pub struct AssessmentInputs<'a> {
    pub opportunity: &'a Opportunity,
    pub network: &'a [Subcontractor],
    pub directory_mbe: &'a [DirectoryEntry],
    pub directory_vsbe: &'a [DirectoryEntry],
    pub today: NaiveDate,
}

/// Locally computed assessment
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentPreview {
    pub risk_score: u32,
    pub mbe_gap_percentage: f64,
    pub vsbe_gap_percentage: f64,
    pub available_subcontractors_count: usize,
    pub recommendation: Recommendation,
    pub factors: Vec<RiskFactor>,
    pub network: NetworkStats,
}

/// Score an opportunity for an organization
pub fn assess_opportunity(inputs: AssessmentInputs<'_>) -> AssessmentPreview {
    let opp = inputs.opportunity;
    let naics: Vec<String> = opp
        .naics_codes
        .iter()
        .flat_map(|c| split_codes(c))
        .map(str::to_string)
        .collect();

    let network_mbe = network_capacity(inputs.network, "MBE", &naics).len();
    let network_vsbe = network_capacity(inputs.network, "VSBE", &naics).len();
    let directory_mbe = inputs.directory_mbe.len();
    let directory_vsbe = inputs.directory_vsbe.len();

    let available: HashSet<uuid::Uuid> = inputs
        .directory_mbe
        .iter()
        .chain(inputs.directory_vsbe)
        .map(|e| e.id)
        .collect();

    let mut risk: u32 = 0;
    let mut factors = Vec::new();
    let mut mbe_gap = 0.0;
    let mut vsbe_gap = 0.0;

    let mbe_goal = opp.mbe_goal_or_zero();
    if mbe_goal > 0.0 {
        let goal = format_number(mbe_goal);
        let total = network_mbe + directory_mbe;
        if total == 0 {
            mbe_gap = -mbe_goal;
            risk += 40;
            factors.push(RiskFactor::new(
                FactorLevel::Critical,
                format!(
                    "No MBE subcontractors in your network or directory. Need {goal}% participation."
                ),
            ));
        } else if network_mbe >= MBE_NETWORK_TARGET {
            factors.push(RiskFactor::new(
                FactorLevel::Excellent,
                format!(
                    "You have {network_mbe} MBE subcontractors in your network to meet {goal}% goal."
                ),
            ));
        } else if total < MBE_NETWORK_TARGET {
            mbe_gap = -10.0;
            risk += 25;
            factors.push(RiskFactor::new(
                FactorLevel::Warning,
                format!(
                    "Only {total} MBE subcontractors available ({network_mbe} in your network, \
                     {directory_mbe} in directory). Limited options to meet {goal}% goal."
                ),
            ));
        } else {
            factors.push(RiskFactor::new(
                FactorLevel::Good,
                format!(
                    "{total} MBE subcontractors available ({network_mbe} in your network, \
                     {directory_mbe} in directory) to meet {goal}% goal."
                ),
            ));
        }
    }

    let vsbe_goal = opp.vsbe_goal_or_zero();
    if vsbe_goal > 0.0 {
        let goal = format_number(vsbe_goal);
        let total = network_vsbe + directory_vsbe;
        if total == 0 {
            vsbe_gap = -vsbe_goal;
            risk += 20;
            factors.push(RiskFactor::new(
                FactorLevel::Warning,
                format!(
                    "No VSBE subcontractors in your network or directory. Need {goal}% participation."
                ),
            ));
        } else if network_vsbe >= VSBE_NETWORK_TARGET {
            factors.push(RiskFactor::new(
                FactorLevel::Good,
                format!("You have {network_vsbe} VSBE subcontractors in your network."),
            ));
        } else if total < VSBE_NETWORK_TARGET {
            vsbe_gap = -5.0;
            risk += 10;
            factors.push(RiskFactor::new(
                FactorLevel::Caution,
                format!(
                    "Only {total} VSBE subcontractors available ({network_vsbe} in your network, \
                     {directory_vsbe} in directory)."
                ),
            ));
        } else {
            factors.push(RiskFactor::new(
                FactorLevel::Good,
                format!("{total} VSBE subcontractors available."),
            ));
        }
    }

    if let Some(value) = opp.total_value.filter(|v| *v > 0.0) {
        if value > HIGH_VALUE {
            risk += 15;
            factors.push(RiskFactor::new(
                FactorLevel::Caution,
                "High-value contract ($10M+) requires strong team and capacity.",
            ));
        } else if value < LOW_VALUE {
            factors.push(RiskFactor::new(
                FactorLevel::Info,
                "Small contract value may have lower margins.",
            ));
        }
    }

    if let Some(due) = opp.due_date {
        let days = (due - inputs.today).num_days();
        if days < 7 {
            risk += 30;
            factors.push(RiskFactor::new(
                FactorLevel::Critical,
                format!("Only {days} days until due date. Very tight timeline."),
            ));
        } else if days < 14 {
            risk += 15;
            factors.push(RiskFactor::new(
                FactorLevel::Warning,
                format!("Only {days} days until due date. Limited prep time."),
            ));
        } else {
            factors.push(RiskFactor::new(
                FactorLevel::Good,
                format!("{days} days until due date. Adequate preparation time."),
            ));
        }
    }

    AssessmentPreview {
        risk_score: risk.min(100),
        mbe_gap_percentage: mbe_gap,
        vsbe_gap_percentage: vsbe_gap,
        available_subcontractors_count: available.len(),
        recommendation: Recommendation::from_score(risk),
        factors,
        network: NetworkStats {
            total_count: inputs.network.len(),
            mbe_count: network_mbe,
            vsbe_count: network_vsbe,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdiction::Jurisdiction;
    use crate::subcontractor::Certification;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn opportunity(mbe: Option<f64>, vsbe: Option<f64>, value: Option<f64>, due_in: Option<i64>) -> Opportunity {
        Opportunity {
            id: Uuid::new_v4(),
            title: "Bridge Deck Rehabilitation".to_string(),
            solicitation_number: None,
            jurisdiction_id: None,
            jurisdiction: Some(Jurisdiction {
                id: Uuid::new_v4(),
                code: "MD".to_string(),
                name: "Maryland".to_string(),
            }),
            agency: None,
            total_value: value,
            due_date: due_in.map(|d| today() + chrono::Duration::days(d)),
            posted_date: None,
            relevance_score: None,
            mbe_goal: mbe,
            vsbe_goal: vsbe,
            naics_codes: vec!["237310".to_string()],
            opportunity_url: None,
            is_active: true,
        }
    }

    fn network_sub(is_mbe: bool, cert: Option<&str>) -> Subcontractor {
        Subcontractor {
            id: Uuid::new_v4(),
            organization_id: None,
            legal_name: "Network Sub".to_string(),
            federal_id: None,
            is_mbe,
            is_vsbe: false,
            certifications: cert
                .map(|c| {
                    vec![Certification {
                        id: None,
                        cert_type: Some(c.to_string()),
                        naics_codes: Vec::new(),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    fn directory(n: usize) -> Vec<DirectoryEntry> {
        (0..n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": Uuid::new_v4(),
                    "legal_name": format!("Directory Sub {i}"),
                }))
                .unwrap()
            })
            .collect()
    }

    fn run(opp: &Opportunity, network: &[Subcontractor], mbe: &[DirectoryEntry], vsbe: &[DirectoryEntry]) -> AssessmentPreview {
        assess_opportunity(AssessmentInputs {
            opportunity: opp,
            network,
            directory_mbe: mbe,
            directory_vsbe: vsbe,
            today: today(),
        })
    }

    #[test]
    fn test_no_goals_far_due_date_is_bid() {
        let opp = opportunity(None, None, Some(500_000.0), Some(30));
        let preview = run(&opp, &[], &[], &[]);
        assert_eq!(preview.risk_score, 0);
        assert_eq!(preview.recommendation, Recommendation::Bid);
        assert_eq!(preview.factors.len(), 1);
        assert_eq!(preview.factors[0].level, Some(FactorLevel::Good));
    }

    #[test]
    fn test_missing_mbe_capacity_is_critical() {
        let opp = opportunity(Some(25.0), None, None, Some(30));
        let preview = run(&opp, &[], &[], &[]);
        assert_eq!(preview.risk_score, 40);
        assert_eq!(preview.mbe_gap_percentage, -25.0);
        assert_eq!(preview.recommendation, Recommendation::Caution);
        assert!(preview.factors[0].message.starts_with("CRITICAL: No MBE"));
    }

    #[test]
    fn test_strong_mbe_network_is_excellent() {
        let opp = opportunity(Some(25.0), None, None, None);
        let network = vec![
            network_sub(true, None),
            network_sub(false, Some("MBE")),
            network_sub(false, Some("MDOT MBE/DBE")),
        ];
        let preview = run(&opp, &network, &[], &[]);
        assert_eq!(preview.risk_score, 0);
        assert_eq!(preview.mbe_gap_percentage, 0.0);
        assert_eq!(preview.network.mbe_count, 3);
        assert_eq!(preview.factors[0].level, Some(FactorLevel::Excellent));
    }

    #[test]
    fn test_limited_mbe_options_warn() {
        let opp = opportunity(Some(25.0), None, None, None);
        let network = vec![network_sub(true, None)];
        let preview = run(&opp, &network, &directory(1), &[]);
        assert_eq!(preview.risk_score, 25);
        assert_eq!(preview.mbe_gap_percentage, -10.0);
        assert_eq!(preview.factors[0].level, Some(FactorLevel::Warning));
    }

    #[test]
    fn test_combined_mbe_capacity_is_good() {
        let opp = opportunity(Some(25.0), None, None, None);
        let preview = run(&opp, &[network_sub(true, None)], &directory(2), &[]);
        assert_eq!(preview.risk_score, 0);
        assert_eq!(preview.available_subcontractors_count, 2);
        assert_eq!(preview.factors[0].level, Some(FactorLevel::Good));
    }

    #[test]
    fn test_vsbe_rules() {
        let opp = opportunity(None, Some(3.0), None, None);
        let none = run(&opp, &[], &[], &[]);
        assert_eq!(none.risk_score, 20);
        assert_eq!(none.vsbe_gap_percentage, -3.0);

        let limited = run(&opp, &[], &[], &directory(1));
        assert_eq!(limited.risk_score, 10);
        assert_eq!(limited.vsbe_gap_percentage, -5.0);
        assert_eq!(limited.factors[0].level, Some(FactorLevel::Caution));

        let network = vec![network_sub(false, Some("VSBE")), network_sub(false, Some("vsbe"))];
        let strong = run(&opp, &network, &[], &[]);
        assert_eq!(strong.risk_score, 0);
        assert_eq!(strong.network.vsbe_count, 2);
    }

    #[test]
    fn test_value_and_due_date_factors() {
        let big = opportunity(None, None, Some(12_000_000.0), Some(5));
        let preview = run(&big, &[], &[], &[]);
        assert_eq!(preview.risk_score, 45);
        assert_eq!(preview.recommendation, Recommendation::Caution);

        let small = opportunity(None, None, Some(50_000.0), Some(10));
        let preview = run(&small, &[], &[], &[]);
        assert_eq!(preview.risk_score, 15);
        assert_eq!(preview.factors[0].level, Some(FactorLevel::Info));
        assert_eq!(preview.factors[1].level, Some(FactorLevel::Warning));
    }

    #[test]
    fn test_high_risk_is_no_bid_and_capped() {
        let opp = opportunity(Some(25.0), Some(3.0), Some(20_000_000.0), Some(2));
        let preview = run(&opp, &[], &[], &[]);
        // 40 + 20 + 15 + 30
        assert_eq!(preview.risk_score, 100);
        assert_eq!(preview.recommendation, Recommendation::NoBid);
    }

    #[test]
    fn test_available_count_is_distinct() {
        let opp = opportunity(Some(10.0), Some(3.0), None, None);
        let shared = directory(2);
        let preview = run(&opp, &[], &shared, &shared);
        assert_eq!(preview.available_subcontractors_count, 2);
    }

    #[test]
    fn test_directory_match_filters() {
        let opp = opportunity(Some(10.0), None, None, None);
        let mbe = directory_match_filters(&opp, true).unwrap();
        assert_eq!(mbe.jurisdiction_code, "MD");
        assert!(mbe.mbe_only);
        assert_eq!(mbe.min_rating, "2");
        assert!(directory_match_filters(&opp, false).is_none());

        let mut no_naics = opp.clone();
        no_naics.naics_codes.clear();
        assert!(directory_match_filters(&no_naics, true).is_none());
    }

    #[test]
    fn test_recommendation_wire_format_and_tone() {
        let rec: Recommendation = serde_json::from_str("\"NO_BID\"").unwrap();
        assert_eq!(rec, Recommendation::NoBid);
        assert_eq!(rec.tone(), Tone::Red);
        assert_eq!(Recommendation::Caution.tone(), Tone::Yellow);
        assert_eq!(Recommendation::Bid.tone(), Tone::Green);
    }

    #[test]
    fn test_parse_server_factors() {
        let f = RiskFactor::parse("CRITICAL: Only 3 days until due date.");
        assert_eq!(f.level, Some(FactorLevel::Critical));
        assert_eq!(f.tone(), Tone::Red);
        assert_eq!(RiskFactor::parse("Something else").level, None);
    }

    #[test]
    fn test_summary_from_records() {
        let record = |score: Option<u32>, rec: Recommendation| AssessmentRecord {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            opportunity_id: Uuid::new_v4(),
            overall_risk_score: score,
            recommendation: rec,
            recommendation_reason: None,
            assessed_at: None,
            opportunity: None,
        };
        let records = vec![
            record(Some(10), Recommendation::Bid),
            record(Some(45), Recommendation::Caution),
            record(None, Recommendation::Bid),
        ];
        let summary = AssessmentSummary::from_records(&records);
        assert_eq!(summary.total_assessments, 3);
        assert_eq!(summary.bid_recommended, 2);
        assert_eq!(summary.caution_recommended, 1);
        assert_eq!(summary.no_bid_recommended, 0);
        assert_eq!(summary.average_risk_score, 18.33);
        assert_eq!(AssessmentSummary::from_records(&[]).average_risk_score, 0.0);
    }
}
