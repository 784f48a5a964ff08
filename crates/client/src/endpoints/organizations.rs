use crate::{ApiClient, ClientResult};
use complyform_core::{OrganizationId, Validatable};
use complyform_domain::{Organization, OrganizationDraft, Subcontractor};

impl ApiClient {
    /// List all organizations
    pub async fn list_organizations(&self) -> ClientResult<Vec<Organization>> {
        self.get("/organizations/").await
    }

    /// Fetch one organization
    pub async fn get_organization(&self, id: OrganizationId) -> ClientResult<Organization> {
        self.get(&format!("/organizations/{id}")).await
    }

    /// Create an organization
    pub async fn create_organization(
        &self,
        draft: &OrganizationDraft,
    ) -> ClientResult<Organization> {
        draft.validate()?;
        self.post("/organizations/", draft).await
    }

    /// Subcontractors in an organization's network, with certifications
    pub async fn organization_network(
        &self,
        id: OrganizationId,
    ) -> ClientResult<Vec<Subcontractor>> {
        self.get(&format!("/organizations/{id}/network")).await
    }
}
