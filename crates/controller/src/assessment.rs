//! Pre-bid assessment page
//!
//! For one opportunity: pick an organization, see a local preview computed
//! from the organization's network and directory matches, run the stored
//! server assessment, and invite the matching subcontractors in bulk.

use crate::state::{BANNER_TIMEOUT, Notice, Phase};
use chrono::NaiveDate;
use complyform_client::{ApiClient, ClientResult};
use complyform_core::{OpportunityId, OrganizationId};
use complyform_domain::{
    AssessmentInputs, AssessmentPreview, AssessmentRecord, AssessmentReport, AssessmentRequest,
    AssessmentSummary, BulkOutreach, DirectoryEntry, DirectoryFilters, Opportunity, Organization,
    OutreachStatus, assess_opportunity, directory_match_filters,
};
use std::time::Duration;

// ============================================================================
// Fetching
// ============================================================================

/// The opportunity and the organizations to choose from
pub async fn load_context(
    client: &ApiClient,
    opportunity_id: OpportunityId,
) -> ClientResult<(Opportunity, Vec<Organization>)> {
    tokio::try_join!(
        client.get_opportunity(opportunity_id),
        client.list_organizations()
    )
}

async fn directory_matches(
    client: &ApiClient,
    filters: Option<DirectoryFilters>,
) -> ClientResult<Vec<DirectoryEntry>> {
    match filters {
        Some(filters) => client.search_directory(&filters).await,
        None => Ok(Vec::new()),
    }
}

/// Compute the local preview for an organization
///
/// Network, MBE matches and VSBE matches are fetched concurrently.
pub async fn build_preview(
    client: &ApiClient,
    opportunity: &Opportunity,
    organization_id: OrganizationId,
    today: NaiveDate,
) -> ClientResult<AssessmentPreview> {
    let (network, directory_mbe, directory_vsbe) = tokio::try_join!(
        client.organization_network(organization_id),
        directory_matches(client, directory_match_filters(opportunity, true)),
        directory_matches(client, directory_match_filters(opportunity, false)),
    )?;
    tracing::debug!(
        %organization_id,
        network = network.len(),
        mbe_matches = directory_mbe.len(),
        vsbe_matches = directory_vsbe.len(),
        "Computing assessment preview"
    );
    Ok(assess_opportunity(AssessmentInputs {
        opportunity,
        network: &network,
        directory_mbe: &directory_mbe,
        directory_vsbe: &directory_vsbe,
        today,
    }))
}

/// Assessment history of an organization and its summary
pub async fn load_history(
    client: &ApiClient,
    organization_id: OrganizationId,
) -> ClientResult<(Vec<AssessmentRecord>, AssessmentSummary)> {
    tokio::try_join!(
        client.assessments_for_organization(organization_id),
        client.assessment_summary(organization_id)
    )
}

/// Bulk outreach payload for every subcontractor the report matched
pub fn invitation_for(report: &AssessmentReport, notes: Option<String>) -> BulkOutreach {
    BulkOutreach {
        organization_id: report.organization_id,
        opportunity_id: report.opportunity_id,
        subcontractor_ids: report.matching_subcontractors.iter().map(|s| s.id).collect(),
        initial_status: OutreachStatus::Contacted,
        notes,
    }
}

// ============================================================================
// Page State
// ============================================================================

/// View state of the assessment page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentState {
    pub opportunity: Option<Opportunity>,
    pub organizations: Vec<Organization>,
    pub organization_id: Option<OrganizationId>,
    pub preview: Option<AssessmentPreview>,
    pub report: Option<AssessmentReport>,
    pub history: Vec<AssessmentRecord>,
    pub summary: Option<AssessmentSummary>,
    pub phase: Phase,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    next_token: u64,
}

impl AssessmentState {
    /// Record a failure
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Idle;
        self.error = Some(message.into());
    }

    /// Show a success banner; returns the token and delay of its clear
    pub fn succeed(&mut self, message: impl Into<String>) -> (u64, Duration) {
        self.phase = Phase::Idle;
        self.error = None;
        self.next_token += 1;
        self.notice = Some(Notice {
            message: message.into(),
            token: self.next_token,
        });
        (self.next_token, BANNER_TIMEOUT)
    }

    /// Clear the banner if the token is still current
    pub fn expire(&mut self, token: u64) {
        if self.notice.as_ref().is_some_and(|n| n.token == token) {
            self.notice = None;
        }
    }

    /// Switch organization; everything computed for the previous one is dropped
    pub fn select_organization(&mut self, organization_id: Option<OrganizationId>) {
        if self.organization_id != organization_id {
            self.preview = None;
            self.report = None;
            self.history.clear();
            self.summary = None;
        }
        self.organization_id = organization_id;
    }

    /// Number of subcontractors an invitation would go to
    pub fn invitable_count(&self) -> usize {
        self.report
            .as_ref()
            .map(|r| r.matching_subcontractors.len())
            .unwrap_or(0)
    }
}

// ============================================================================
// Headless Driver
// ============================================================================

/// Assessment page without a window
pub struct AssessmentPage {
    client: ApiClient,
    opportunity_id: OpportunityId,
    state: AssessmentState,
}

impl AssessmentPage {
    pub fn new(client: ApiClient, opportunity_id: OpportunityId) -> Self {
        Self {
            client,
            opportunity_id,
            state: AssessmentState::default(),
        }
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    /// Load the opportunity and organizations; keeps a preselected organization
    pub async fn load(&mut self, organization_id: Option<OrganizationId>) {
        self.state.phase = Phase::Loading;
        match load_context(&self.client, self.opportunity_id).await {
            Ok((opportunity, organizations)) => {
                self.state.opportunity = Some(opportunity);
                self.state.organizations = organizations;
                self.state.phase = Phase::Idle;
                self.state.error = None;
            }
            Err(e) => {
                tracing::error!(opportunity = %self.opportunity_id, error = %e, "Failed to load opportunity");
                self.state.fail("Failed to load opportunity");
                return;
            }
        }
        if let Some(id) = organization_id {
            self.select_organization(id).await;
        }
    }

    /// Choose an organization, then compute its preview and history
    pub async fn select_organization(&mut self, organization_id: OrganizationId) {
        self.state.select_organization(Some(organization_id));
        let Some(opportunity) = self.state.opportunity.clone() else {
            return;
        };
        let today = chrono::Utc::now().date_naive();
        self.refresh(&opportunity, organization_id, today).await;
    }

    async fn refresh(
        &mut self,
        opportunity: &Opportunity,
        organization_id: OrganizationId,
        today: NaiveDate,
    ) {
        self.state.phase = Phase::Loading;
        let result = tokio::try_join!(
            build_preview(&self.client, opportunity, organization_id, today),
            load_history(&self.client, organization_id)
        );
        match result {
            Ok((preview, (history, summary))) => {
                self.state.preview = Some(preview);
                self.state.history = history;
                self.state.summary = Some(summary);
                self.state.phase = Phase::Idle;
            }
            Err(e) => {
                tracing::error!(%organization_id, error = %e, "Failed to build preview");
                self.state.fail("Failed to load assessment data");
            }
        }
    }

    /// Run and store the server assessment
    pub async fn assess(&mut self) {
        let Some(organization_id) = self.state.organization_id else {
            self.state.fail("Select an organization first");
            return;
        };
        self.state.phase = Phase::Submitting;
        let request = AssessmentRequest {
            organization_id,
            opportunity_id: self.opportunity_id,
        };
        match self.client.assess(&request).await {
            Ok(report) => {
                tracing::info!(
                    %organization_id,
                    score = report.overall_risk_score,
                    recommendation = %report.recommendation.display_name(),
                    "Assessment stored"
                );
                self.state.report = Some(report);
                self.state.succeed("Assessment completed");
                if let Ok((history, summary)) = load_history(&self.client, organization_id).await {
                    self.state.history = history;
                    self.state.summary = Some(summary);
                }
            }
            Err(e) => {
                tracing::error!(%organization_id, error = %e, "Assessment failed");
                self.state.fail(e.detail_or("Failed to run assessment"));
            }
        }
    }

    /// Create outreach records for every matched subcontractor
    pub async fn invite_matches(&mut self, notes: Option<String>) {
        let Some(report) = &self.state.report else {
            self.state.fail("Run an assessment first");
            return;
        };
        let bulk = invitation_for(report, notes);
        self.state.phase = Phase::Submitting;
        match self.client.bulk_create_outreach(&bulk).await {
            Ok(created) => {
                self.state.succeed(format!("Contacted {} subcontractors", created.len()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Bulk outreach failed");
                self.state.fail(e.detail_or("Failed to create outreach records"));
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use complyform_domain::Recommendation;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use uuid::Uuid;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn opportunity_json(id: Uuid, due: &str) -> Value {
        json!({
            "id": id,
            "title": "Route 50 resurfacing",
            "solicitation_number": "SHA-2025-014",
            "jurisdiction": {"id": Uuid::new_v4(), "code": "MD", "name": "Maryland"},
            "total_value": "2500000.00",
            "due_date": due,
            "mbe_goal": "20.00",
            "vsbe_goal": null,
            "naics_codes": ["237310"]
        })
    }

    fn directory_json(name: &str) -> Value {
        json!({"id": Uuid::new_v4(), "legal_name": name, "rating": 4.0})
    }

    async fn mount_get(server: &MockServer, route: String, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_preview_uses_network_and_directory() {
        let server = MockServer::start().await;
        let opp_id = Uuid::new_v4();
        let org = Uuid::new_v4();

        mount_get(
            &server,
            format!("/api/v1/organizations/{org}/network"),
            json!([{
                "id": Uuid::new_v4(),
                "organization_id": org,
                "legal_name": "Chesapeake Paving",
                "is_mbe": true,
                "certifications": [{"id": Uuid::new_v4(), "cert_type": "MBE", "naics_codes": ["237310"]}]
            }]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/subcontractor-directory/search"))
            .and(query_param("is_mbe", "true"))
            .and(query_param("jurisdiction_code", "MD"))
            .and(query_param("min_rating", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([directory_json("Bay Concrete")])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/api/v1", server.uri())).unwrap();
        let opportunity: Opportunity =
            serde_json::from_value(opportunity_json(opp_id, "2025-04-30")).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

        let preview = build_preview(&client, &opportunity, org, today).await.unwrap();
        assert_eq!(preview.network.mbe_count, 1);
        assert_eq!(preview.available_subcontractors_count, 1);
        assert_eq!(preview.mbe_gap_percentage, -10.0);
        assert_eq!(preview.risk_score, 25);
        assert_eq!(preview.recommendation, Recommendation::Bid);
    }

    #[tokio::test]
    async fn test_assess_then_invite() {
        let server = MockServer::start().await;
        let opp_id = Uuid::new_v4();
        let org = Uuid::new_v4();
        let sub = Uuid::new_v4();

        mount_get(
            &server,
            format!("/api/v1/opportunities/{opp_id}"),
            opportunity_json(opp_id, "2099-01-01"),
        )
        .await;
        mount_get(
            &server,
            "/api/v1/organizations/".to_string(),
            json!([{"id": org, "name": "Acme Construction"}]),
        )
        .await;
        mount_get(
            &server,
            format!("/api/v1/pre-bid-assessments/organization/{org}"),
            json!([]),
        )
        .await;
        mount_get(
            &server,
            format!("/api/v1/pre-bid-assessments/organization/{org}/summary"),
            json!({"total_assessments": 0}),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/pre-bid-assessments/assess"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": Uuid::new_v4(),
                "organization_id": org,
                "opportunity_id": opp_id,
                "overall_risk_score": 65,
                "recommendation": "NO_BID",
                "recommendation_reason": "HIGH RISK",
                "risk_factors": ["CRITICAL: No MBE subcontractors available"],
                "matching_subcontractors": [{"id": sub, "legal_name": "Bay Concrete"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/outreach/bulk-create"))
            .and(query_param("initial_status", "CONTACTED"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
                "id": Uuid::new_v4(),
                "organization_id": org,
                "opportunity_id": opp_id,
                "subcontractor_id": sub,
                "status": "CONTACTED"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/api/v1", server.uri())).unwrap();
        let mut page = AssessmentPage::new(client, opp_id);

        page.invite_matches(None).await;
        assert_eq!(page.state().error.as_deref(), Some("Run an assessment first"));

        page.load(None).await;
        assert_eq!(page.state().organizations.len(), 1);
        page.assess().await;
        assert_eq!(page.state().error.as_deref(), Some("Select an organization first"));

        page.state.select_organization(Some(org));
        page.assess().await;
        assert_eq!(page.state().error, None);
        assert_eq!(page.state().invitable_count(), 1);
        assert_eq!(
            page.state().report.as_ref().map(|r| r.recommendation),
            Some(Recommendation::NoBid)
        );

        page.invite_matches(Some("Please quote by Friday".into())).await;
        assert_eq!(
            page.state().notice.as_ref().map(|n| n.message.as_str()),
            Some("Contacted 1 subcontractors")
        );
    }

    #[test]
    fn test_switching_organization_drops_results() {
        let mut state = AssessmentState {
            organization_id: Some(Uuid::new_v4()),
            summary: Some(AssessmentSummary::default()),
            ..Default::default()
        };
        state.select_organization(Some(Uuid::new_v4()));
        assert_eq!(state.summary, None);

        let (token, delay) = state.succeed("done");
        assert_eq!(delay, BANNER_TIMEOUT);
        state.expire(token + 1);
        assert!(state.notice.is_some());
        state.expire(token);
        assert!(state.notice.is_none());
    }
}
