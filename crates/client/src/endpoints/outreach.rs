use crate::{ApiClient, ClientResult};
use complyform_core::{ComplyError, OpportunityId, OrganizationId, OutreachId, SubcontractorId};
use complyform_domain::{
    BulkOutreach, Outreach, OutreachDraft, OutreachPatch, OutreachStats, QueryParams,
};

impl ApiClient {
    /// Record a new outreach
    pub async fn create_outreach(&self, draft: &OutreachDraft) -> ClientResult<Outreach> {
        if draft.organization_id.is_none() {
            return Err(ComplyError::field("Organization", "select an organization first").into());
        }
        self.post("/outreach/", draft).await
    }

    /// Fetch one outreach record
    pub async fn get_outreach(&self, id: OutreachId) -> ClientResult<Outreach> {
        self.get(&format!("/outreach/{id}")).await
    }

    /// Outreach for an opportunity
    pub async fn outreach_for_opportunity(
        &self,
        opportunity_id: OpportunityId,
    ) -> ClientResult<Vec<Outreach>> {
        self.get(&format!("/outreach/opportunity/{opportunity_id}"))
            .await
    }

    /// Outreach of an organization
    pub async fn outreach_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> ClientResult<Vec<Outreach>> {
        self.get(&format!("/outreach/organization/{organization_id}"))
            .await
    }

    /// Outreach to one subcontractor
    pub async fn outreach_for_subcontractor(
        &self,
        subcontractor_id: SubcontractorId,
    ) -> ClientResult<Vec<Outreach>> {
        self.get(&format!("/outreach/subcontractor/{subcontractor_id}"))
            .await
    }

    /// Outreach still awaiting a reply, optionally for one opportunity
    pub async fn pending_outreach(
        &self,
        organization_id: OrganizationId,
        opportunity_id: Option<OpportunityId>,
    ) -> ClientResult<Vec<Outreach>> {
        let query = QueryParams::new().id("opportunity_id", opportunity_id);
        self.get_query(
            &format!("/outreach/pending/organization/{organization_id}"),
            &query,
        )
        .await
    }

    /// Change status or notes
    pub async fn update_outreach(
        &self,
        id: OutreachId,
        patch: &OutreachPatch,
    ) -> ClientResult<Outreach> {
        self.put(&format!("/outreach/{id}"), patch).await
    }

    /// Delete an outreach record
    pub async fn delete_outreach(&self, id: OutreachId) -> ClientResult<()> {
        self.delete(&format!("/outreach/{id}")).await
    }

    /// Outreach statistics of an organization
    pub async fn outreach_statistics(
        &self,
        organization_id: OrganizationId,
    ) -> ClientResult<OutreachStats> {
        self.get(&format!("/outreach/statistics/organization/{organization_id}"))
            .await
    }

    /// Create outreach records for many subcontractors; duplicates are skipped by the server
    pub async fn bulk_create_outreach(&self, bulk: &BulkOutreach) -> ClientResult<Vec<Outreach>> {
        if bulk.subcontractor_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.post_query("/outreach/bulk-create", &bulk.to_query(), &bulk.subcontractor_ids)
            .await
    }
}
