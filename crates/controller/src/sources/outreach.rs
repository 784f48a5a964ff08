use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_core::OrganizationId;
use complyform_domain::{
    FormValues, Outreach, OutreachDraft, OutreachFilters, OutreachLookups, OutreachPatch,
};
use uuid::Uuid;

/// Outreach records of the active organization
#[derive(Debug, Clone)]
pub struct OutreachSource {
    client: ApiClient,
    organization_id: Option<OrganizationId>,
}

impl OutreachSource {
    pub fn new(client: ApiClient, organization_id: Option<OrganizationId>) -> Self {
        Self {
            client,
            organization_id,
        }
    }
}

#[async_trait]
impl CrudSource for OutreachSource {
    type Record = Outreach;
    type Lookups = OutreachLookups;
    type Filters = OutreachFilters;
    type Draft = OutreachDraft;
    type Patch = OutreachPatch;

    const TITLE: &'static str = "Outreach";
    const NOUN: &'static str = "Outreach Record";

    fn capabilities(&self) -> Capabilities {
        let scoped = self.organization_id.is_some();
        Capabilities {
            search: scoped,
            create: scoped,
            update: true,
            delete: true,
        }
    }

    async fn list(&self) -> ClientResult<Vec<Outreach>> {
        match self.organization_id {
            Some(id) => self.client.outreach_for_organization(id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn search(&self, filters: &OutreachFilters) -> ClientResult<Vec<Outreach>> {
        let Some(organization_id) = self.organization_id else {
            return Ok(Vec::new());
        };
        if filters.pending_only {
            return self
                .client
                .pending_outreach(organization_id, filters.opportunity_id)
                .await;
        }
        match filters.opportunity_id {
            Some(opportunity_id) => {
                let mut records = self.client.outreach_for_opportunity(opportunity_id).await?;
                records.retain(|r| r.organization_id == organization_id);
                Ok(records)
            }
            None => self.list().await,
        }
    }

    async fn lookups(&self) -> ClientResult<OutreachLookups> {
        if self.organization_id.is_none() {
            return Ok(OutreachLookups::default());
        }
        let query = Default::default();
        let (opportunities, subcontractors) = tokio::try_join!(
            self.client.list_opportunities(&query),
            self.client.list_directory()
        )?;
        Ok(OutreachLookups {
            opportunities,
            subcontractors,
        })
    }

    async fn create(&self, draft: OutreachDraft) -> ClientResult<Outreach> {
        let draft = match self.organization_id {
            Some(id) => draft.for_organization(id),
            None => draft,
        };
        self.client.create_outreach(&draft).await
    }

    async fn update(&self, id: Uuid, patch: OutreachPatch) -> ClientResult<Outreach> {
        self.client.update_outreach(id, &patch).await
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete_outreach(id).await
    }

    fn edit_values(&self, record: &Outreach) -> FormValues {
        record.to_form()
    }
}
