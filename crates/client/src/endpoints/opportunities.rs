use crate::{ApiClient, ClientResult};
use complyform_core::OpportunityId;
use complyform_domain::{FilterSet, Opportunity, OpportunityFilters, OpportunityListQuery};

impl ApiClient {
    /// List opportunities, one page at a time
    pub async fn list_opportunities(
        &self,
        query: &OpportunityListQuery,
    ) -> ClientResult<Vec<Opportunity>> {
        self.get_query("/opportunities/", &query.to_query()).await
    }

    /// Search opportunities with the fields the user set
    pub async fn search_opportunities(
        &self,
        filters: &OpportunityFilters,
    ) -> ClientResult<Vec<Opportunity>> {
        self.get_query("/opportunities/search", &filters.to_query())
            .await
    }

    /// Fetch one opportunity
    pub async fn get_opportunity(&self, id: OpportunityId) -> ClientResult<Opportunity> {
        self.get(&format!("/opportunities/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::mock_client;
    use complyform_domain::OpportunityFilters;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn opportunity_json() -> serde_json::Value {
        json!({
            "id": "6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01",
            "title": "Bridge Deck Rehabilitation",
            "total_value": "2500000.00",
            "due_date": "2025-03-15",
            "naics_codes": ["237310"]
        })
    }

    #[tokio::test]
    async fn test_search_sends_only_set_filters() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/opportunities/search"))
            .and(query_param("jurisdiction", "MD"))
            .and(query_param("min_value", "100000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([opportunity_json()])))
            .expect(1)
            .mount(&server)
            .await;

        let filters = OpportunityFilters {
            jurisdiction: "MD".to_string(),
            min_value: "100000".to_string(),
            ..Default::default()
        };
        let found = client.search_opportunities(&filters).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].total_value, Some(2_500_000.0));

        let requests = server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap_or_default().to_string();
        assert!(!query.contains("naics"));
        assert!(!query.contains("max_value"));
        assert!(!query.contains("days_until_due"));
    }

    #[tokio::test]
    async fn test_list_uses_paging_defaults() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/opportunities/"))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "100"))
            .and(query_param("active_only", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let list = client
            .list_opportunities(&Default::default())
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_get_not_found_carries_detail() {
        let (server, client) = mock_client().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/opportunities/6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Opportunity not found"})),
            )
            .mount(&server)
            .await;

        let id = "6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01".parse().unwrap();
        let err = client.get_opportunity(id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Opportunity not found");
    }
}
