use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_domain::{NoFilters, Organization, OrganizationDraft, ReadOnly};

#[derive(Debug, Clone)]
pub struct OrganizationSource {
    client: ApiClient,
}

impl OrganizationSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrudSource for OrganizationSource {
    type Record = Organization;
    type Lookups = ();
    type Filters = NoFilters;
    type Draft = OrganizationDraft;
    type Patch = ReadOnly;

    const TITLE: &'static str = "Organizations";
    const NOUN: &'static str = "Organization";

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            create: true,
            ..Capabilities::READ_ONLY
        }
    }

    async fn list(&self) -> ClientResult<Vec<Organization>> {
        self.client.list_organizations().await
    }

    async fn create(&self, draft: OrganizationDraft) -> ClientResult<Organization> {
        self.client.create_organization(&draft).await
    }
}
