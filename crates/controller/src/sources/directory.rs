use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_domain::{DirectoryEntry, DirectoryFilters, ReadOnly};

/// Public subcontractor directory; read-only, searchable
#[derive(Debug, Clone)]
pub struct DirectorySource {
    client: ApiClient,
}

impl DirectorySource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrudSource for DirectorySource {
    type Record = DirectoryEntry;
    type Lookups = ();
    type Filters = DirectoryFilters;
    type Draft = ReadOnly;
    type Patch = ReadOnly;

    const TITLE: &'static str = "Subcontractor Directory";
    const NOUN: &'static str = "Directory Entry";

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            search: true,
            ..Capabilities::READ_ONLY
        }
    }

    async fn list(&self) -> ClientResult<Vec<DirectoryEntry>> {
        self.client.list_directory().await
    }

    async fn search(&self, filters: &DirectoryFilters) -> ClientResult<Vec<DirectoryEntry>> {
        self.client.search_directory(filters).await
    }
}
