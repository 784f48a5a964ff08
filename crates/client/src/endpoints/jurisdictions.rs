use crate::{ApiClient, ClientResult};
use complyform_domain::Jurisdiction;

impl ApiClient {
    /// List all jurisdictions
    pub async fn list_jurisdictions(&self) -> ClientResult<Vec<Jurisdiction>> {
        self.get("/jurisdictions/").await
    }
}
