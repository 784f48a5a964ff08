use crate::{ApiClient, ClientResult};
use complyform_core::OrganizationId;
use complyform_domain::{AssessmentRecord, AssessmentReport, AssessmentRequest, AssessmentSummary};

impl ApiClient {
    /// Run and store a pre-bid assessment
    pub async fn assess(&self, request: &AssessmentRequest) -> ClientResult<AssessmentReport> {
        self.post("/pre-bid-assessments/assess", request).await
    }

    /// Assessment history of an organization, newest first
    pub async fn assessments_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> ClientResult<Vec<AssessmentRecord>> {
        self.get(&format!("/pre-bid-assessments/organization/{organization_id}"))
            .await
    }

    /// Summary of an organization's assessments
    pub async fn assessment_summary(
        &self,
        organization_id: OrganizationId,
    ) -> ClientResult<AssessmentSummary> {
        self.get(&format!(
            "/pre-bid-assessments/organization/{organization_id}/summary"
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::mock_client;
    use complyform_domain::{AssessmentRequest, FactorLevel, Recommendation};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_assess_parses_report() {
        let (server, client) = mock_client().await;
        let request = AssessmentRequest {
            organization_id: Uuid::new_v4(),
            opportunity_id: Uuid::new_v4(),
        };

        Mock::given(method("POST"))
            .and(path("/api/v1/pre-bid-assessments/assess"))
            .and(body_json(json!({
                "organization_id": request.organization_id,
                "opportunity_id": request.opportunity_id
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": Uuid::new_v4(),
                "assessed_at": "2025-03-10T12:00:00",
                "organization_id": request.organization_id,
                "opportunity_id": request.opportunity_id,
                "overall_risk_score": 45,
                "mbe_gap_percentage": -10.0,
                "vsbe_gap_percentage": 0.0,
                "available_subcontractors_count": 2,
                "recommendation": "CAUTION",
                "recommendation_reason": "MODERATE RISK",
                "risk_factors": ["WARNING: Only 2 MBE subcontractors available", "GOOD: 30 days until due date."],
                "matching_subcontractors": [],
                "organization_network": {"total_count": 4, "mbe_count": 1, "vsbe_count": 0}
            })))
            .mount(&server)
            .await;

        let report = client.assess(&request).await.unwrap();
        assert_eq!(report.recommendation, Recommendation::Caution);
        assert_eq!(report.overall_risk_score, 45);
        assert_eq!(report.organization_network.unwrap().mbe_count, 1);
        let levels: Vec<_> = report.factors().iter().map(|f| f.level).collect();
        assert_eq!(levels, vec![Some(FactorLevel::Warning), Some(FactorLevel::Good)]);
    }

    #[tokio::test]
    async fn test_summary() {
        let (server, client) = mock_client().await;
        let org = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/pre-bid-assessments/organization/{org}/summary")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_assessments": 3,
                "bid_recommended": 2,
                "caution_recommended": 1,
                "no_bid_recommended": 0,
                "average_risk_score": 18.33
            })))
            .mount(&server)
            .await;

        let summary = client.assessment_summary(org).await.unwrap();
        assert_eq!(summary.total_assessments, 3);
        assert_eq!(summary.average_risk_score, 18.33);
    }
}
