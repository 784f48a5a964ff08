use crate::source::{Capabilities, CrudSource};
use async_trait::async_trait;
use complyform_client::{ApiClient, ClientResult};
use complyform_domain::{Bid, BidDraft, NoFilters, Organization, ReadOnly};

/// Bids; listed and created, never edited in place
#[derive(Debug, Clone)]
pub struct BidSource {
    client: ApiClient,
}

impl BidSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrudSource for BidSource {
    type Record = Bid;
    type Lookups = Vec<Organization>;
    type Filters = NoFilters;
    type Draft = BidDraft;
    type Patch = ReadOnly;

    const TITLE: &'static str = "Bids";
    const NOUN: &'static str = "Bid";

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            create: true,
            ..Capabilities::READ_ONLY
        }
    }

    async fn list(&self) -> ClientResult<Vec<Bid>> {
        self.client.list_bids().await
    }

    async fn lookups(&self) -> ClientResult<Vec<Organization>> {
        self.client.list_organizations().await
    }

    async fn create(&self, draft: BidDraft) -> ClientResult<Bid> {
        self.client.create_bid(&draft).await
    }
}
