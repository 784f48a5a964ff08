use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_core::OrganizationId;
use complyform_domain::{NoFilters, ReadOnly, Subcontractor, SubcontractorDraft};
use uuid::Uuid;

/// The active organization's subcontractor network
///
/// Without an active organization the list is empty and creation is refused.
#[derive(Debug, Clone)]
pub struct SubcontractorSource {
    client: ApiClient,
    organization_id: Option<OrganizationId>,
}

impl SubcontractorSource {
    pub fn new(client: ApiClient, organization_id: Option<OrganizationId>) -> Self {
        Self {
            client,
            organization_id,
        }
    }
}

#[async_trait]
impl CrudSource for SubcontractorSource {
    type Record = Subcontractor;
    type Lookups = ();
    type Filters = NoFilters;
    type Draft = SubcontractorDraft;
    type Patch = ReadOnly;

    const TITLE: &'static str = "Subcontractors";
    const NOUN: &'static str = "Subcontractor";

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            create: self.organization_id.is_some(),
            delete: true,
            ..Capabilities::READ_ONLY
        }
    }

    async fn list(&self) -> ClientResult<Vec<Subcontractor>> {
        match self.organization_id {
            Some(id) => self.client.organization_network(id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, draft: SubcontractorDraft) -> ClientResult<Subcontractor> {
        let draft = match self.organization_id {
            Some(id) => draft.for_organization(id),
            None => draft,
        };
        self.client.create_subcontractor(&draft).await
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete_subcontractor(id).await
    }
}
