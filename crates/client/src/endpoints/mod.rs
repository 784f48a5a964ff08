//! Per-resource endpoint methods on [`ApiClient`](crate::ApiClient)

mod assessments;
mod bids;
mod compliance_rules;
mod directory;
mod jurisdictions;
mod opportunities;
mod organizations;
mod outreach;
mod subcontractors;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ApiClient;
    use wiremock::MockServer;

    /// Client pointed at a mock server, with the default version prefix
    pub async fn mock_client() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let client = ApiClient::new(format!("{}/api/v1", server.uri())).unwrap();
        (server, client)
    }
}
