use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_domain::{Jurisdiction, Opportunity, OpportunityFilters, OpportunityListQuery, ReadOnly};

/// Procurement opportunities; read-only, searchable
#[derive(Debug, Clone)]
pub struct OpportunitySource {
    client: ApiClient,
}

impl OpportunitySource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrudSource for OpportunitySource {
    type Record = Opportunity;
    type Lookups = Vec<Jurisdiction>;
    type Filters = OpportunityFilters;
    type Draft = ReadOnly;
    type Patch = ReadOnly;

    const TITLE: &'static str = "Opportunities";
    const NOUN: &'static str = "Opportunity";

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            search: true,
            ..Capabilities::READ_ONLY
        }
    }

    async fn list(&self) -> ClientResult<Vec<Opportunity>> {
        self.client
            .list_opportunities(&OpportunityListQuery::default())
            .await
    }

    async fn search(&self, filters: &OpportunityFilters) -> ClientResult<Vec<Opportunity>> {
        self.client.search_opportunities(filters).await
    }

    async fn lookups(&self) -> ClientResult<Vec<Jurisdiction>> {
        self.client.list_jurisdictions().await
    }
}
