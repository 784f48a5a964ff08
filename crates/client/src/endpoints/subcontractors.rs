use crate::{ApiClient, ClientResult};
use complyform_core::{ComplyError, SubcontractorId, Validatable};
use complyform_domain::{Subcontractor, SubcontractorDraft};

impl ApiClient {
    /// Add a subcontractor to an organization's network
    pub async fn create_subcontractor(
        &self,
        draft: &SubcontractorDraft,
    ) -> ClientResult<Subcontractor> {
        draft.validate()?;
        if draft.organization_id.is_none() {
            return Err(ComplyError::field("Organization", "select an organization first").into());
        }
        self.post("/subcontractors/", draft).await
    }

    /// Remove a subcontractor
    pub async fn delete_subcontractor(&self, id: SubcontractorId) -> ClientResult<()> {
        self.delete(&format!("/subcontractors/{id}")).await
    }
}
