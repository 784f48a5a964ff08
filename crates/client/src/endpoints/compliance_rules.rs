use crate::{ApiClient, ClientResult};
use complyform_core::{JurisdictionId, RuleId, Validatable};
use complyform_domain::{ComplianceRule, RuleDraft, RulePatch};

impl ApiClient {
    /// List all compliance rules
    pub async fn list_compliance_rules(&self) -> ClientResult<Vec<ComplianceRule>> {
        self.get("/compliance-rules/").await
    }

    /// Rules of one jurisdiction
    pub async fn rules_for_jurisdiction(
        &self,
        jurisdiction_id: JurisdictionId,
    ) -> ClientResult<Vec<ComplianceRule>> {
        self.get(&format!("/compliance-rules/jurisdiction/{jurisdiction_id}"))
            .await
    }

    /// Create a rule
    pub async fn create_compliance_rule(&self, draft: &RuleDraft) -> ClientResult<ComplianceRule> {
        draft.validate()?;
        self.post("/compliance-rules/", draft).await
    }

    /// Partially update a rule
    pub async fn update_compliance_rule(
        &self,
        id: RuleId,
        patch: &RulePatch,
    ) -> ClientResult<ComplianceRule> {
        self.put(&format!("/compliance-rules/{id}"), patch).await
    }

    /// Delete a rule
    pub async fn delete_compliance_rule(&self, id: RuleId) -> ClientResult<()> {
        self.delete(&format!("/compliance-rules/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::ClientError;
    use crate::endpoints::test_support::mock_client;
    use complyform_core::Severity;
    use complyform_domain::RulePatch;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let (server, client) = mock_client().await;
        let id = Uuid::new_v4();
        let jurisdiction = Uuid::new_v4();

        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/compliance-rules/{id}")))
            .and(body_json(json!({"severity": "INFO"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "jurisdiction_id": jurisdiction,
                "rule_name": "MBE goal",
                "rule_type": "MBE",
                "rule_definition": {"threshold": 25},
                "severity": "INFO"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let patch = RulePatch {
            severity: Some(Severity::Info),
            ..Default::default()
        };
        let rule = client.update_compliance_rule(id, &patch).await.unwrap();
        assert_eq!(rule.severity(), Severity::Info);
    }

    #[tokio::test]
    async fn test_validation_detail_is_joined() {
        let (server, client) = mock_client().await;
        let id = Uuid::new_v4();

        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/compliance-rules/{id}")))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": [{"msg": "value is not a valid uuid"}, {"msg": "rule in use"}]
            })))
            .mount(&server)
            .await;

        let err = client.delete_compliance_rule(id).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 422, .. }));
        assert_eq!(
            err.detail_or("Failed to delete rule"),
            "value is not a valid uuid; rule in use"
        );
    }

    #[tokio::test]
    async fn test_rules_for_jurisdiction_path() {
        let (server, client) = mock_client().await;
        let jurisdiction = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/compliance-rules/jurisdiction/{jurisdiction}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.rules_for_jurisdiction(jurisdiction).await.unwrap().is_empty());
    }
}
