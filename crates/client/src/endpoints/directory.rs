use crate::{ApiClient, ClientResult};
use complyform_domain::{DirectoryEntry, DirectoryFilters, FilterSet};

impl ApiClient {
    /// List the subcontractor directory
    pub async fn list_directory(&self) -> ClientResult<Vec<DirectoryEntry>> {
        self.get("/subcontractor-directory/").await
    }

    /// Search the directory
    pub async fn search_directory(
        &self,
        filters: &DirectoryFilters,
    ) -> ClientResult<Vec<DirectoryEntry>> {
        self.get_query("/subcontractor-directory/search", &filters.to_query())
            .await
    }
}
