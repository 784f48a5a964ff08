use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_domain::{ComplianceRule, FormValues, Jurisdiction, RuleDraft, RuleFilters, RulePatch};
use uuid::Uuid;

/// Compliance rules; full CRUD, filtered by jurisdiction
#[derive(Debug, Clone)]
pub struct RuleSource {
    client: ApiClient,
}

impl RuleSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrudSource for RuleSource {
    type Record = ComplianceRule;
    type Lookups = Vec<Jurisdiction>;
    type Filters = RuleFilters;
    type Draft = RuleDraft;
    type Patch = RulePatch;

    const TITLE: &'static str = "Compliance Rules";
    const NOUN: &'static str = "Compliance Rule";

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            search: true,
            create: true,
            update: true,
            delete: true,
        }
    }

    async fn list(&self) -> ClientResult<Vec<ComplianceRule>> {
        self.client.list_compliance_rules().await
    }

    async fn search(&self, filters: &RuleFilters) -> ClientResult<Vec<ComplianceRule>> {
        match filters.jurisdiction_id {
            Some(id) => self.client.rules_for_jurisdiction(id).await,
            None => self.list().await,
        }
    }

    async fn lookups(&self) -> ClientResult<Vec<Jurisdiction>> {
        self.client.list_jurisdictions().await
    }

    async fn create(&self, draft: RuleDraft) -> ClientResult<ComplianceRule> {
        self.client.create_compliance_rule(&draft).await
    }

    async fn update(&self, id: Uuid, patch: RulePatch) -> ClientResult<ComplianceRule> {
        self.client.update_compliance_rule(id, &patch).await
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete_compliance_rule(id).await
    }

    fn edit_values(&self, record: &ComplianceRule) -> FormValues {
        record.to_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::CrudPage;
    use complyform_core::{Severity, Tone};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rule(id: Uuid, jurisdiction: Uuid, name: &str, severity: &str) -> Value {
        json!({
            "id": id,
            "jurisdiction_id": jurisdiction,
            "rule_name": name,
            "rule_type": "MBE",
            "rule_definition": {"threshold": 25, "description": "Prime must meet MBE goal"},
            "severity": severity
        })
    }

    async fn page(server: &MockServer) -> CrudPage<RuleSource> {
        let client = ApiClient::new(format!("{}/api/v1", server.uri())).unwrap();
        CrudPage::new(RuleSource::new(client))
    }

    #[tokio::test]
    async fn test_created_warning_rule_appears_after_reload() {
        let server = MockServer::start().await;
        let md = Uuid::new_v4();
        let va = Uuid::new_v4();
        let created = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/api/v1/jurisdictions/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": md, "code": "MD", "name": "Maryland"},
                {"id": va, "code": "VA", "name": "Virginia"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/compliance-rules/"))
            .and(body_partial_json(json!({"severity": "WARNING", "rule_name": "MBE 25%"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(rule(created, md, "MBE 25%", "WARNING")),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/compliance-rules/jurisdiction/{md}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([rule(created, md, "MBE 25%", "WARNING")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/compliance-rules/jurisdiction/{va}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut page = page(&server).await;
        page.set_filters(RuleFilters {
            jurisdiction_id: Some(md),
        });
        page.load_data().await;
        assert_eq!(page.state().lookups.len(), 2);

        page.open_create();
        assert_eq!(page.state().form.get("severity"), "ERROR");
        page.set_field("jurisdiction_id", md.to_string());
        page.set_field("rule_name", "MBE 25%");
        page.set_field("rule_type", "MBE");
        page.set_field("threshold", "25");
        page.set_field("severity", "WARNING");
        page.submit().await;

        assert_eq!(page.state().error, None);
        let listed = &page.state().items;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].severity(), Severity::Warning);
        assert_eq!(listed[0].severity().tone(), Tone::Yellow);

        page.search(RuleFilters {
            jurisdiction_id: Some(va),
        })
        .await;
        assert!(page.state().items.is_empty());
    }

    #[tokio::test]
    async fn test_editing_severity_sends_back_the_whole_definition() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        let md = Uuid::new_v4();
        let mut stored = rule(id, md, "VSBE goal", "WARNING");
        stored["rule_definition"]["source"] = json!("COMAR");
        let mut updated = stored.clone();
        updated["severity"] = json!("INFO");

        Mock::given(method("GET"))
            .and(path("/api/v1/compliance-rules/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jurisdictions/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/compliance-rules/{id}")))
            .and(body_partial_json(json!({
                "severity": "INFO",
                "rule_definition": {"threshold": 25.0, "source": "COMAR"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .expect(1)
            .mount(&server)
            .await;

        let mut page = page(&server).await;
        page.load_data().await;
        assert!(page.open_edit(id));
        page.set_field("severity", "INFO");
        page.submit().await;

        assert_eq!(page.state().error, None);
    }

    #[tokio::test]
    async fn test_failed_delete_shows_server_detail() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        let md = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/api/v1/compliance-rules/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([rule(id, md, "MBE 25%", "ERROR")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jurisdictions/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/compliance-rules/{id}")))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"detail": "Rule is referenced by a bid"})),
            )
            .mount(&server)
            .await;

        let mut page = page(&server).await;
        page.load_data().await;
        page.request_delete(id);
        assert_eq!(page.state().pending_delete_label().as_deref(), Some("MBE 25%"));
        page.confirm_delete().await;

        assert_eq!(page.state().error.as_deref(), Some("Rule is referenced by a bid"));
        assert_eq!(page.state().items.len(), 1);
    }
}
