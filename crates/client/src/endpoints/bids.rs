use crate::{ApiClient, ClientResult};
use complyform_core::{BidId, Validatable};
use complyform_domain::{Bid, BidDraft};

impl ApiClient {
    /// List all bids
    pub async fn list_bids(&self) -> ClientResult<Vec<Bid>> {
        self.get("/bids/").await
    }

    /// Fetch one bid with its subcontractor lines
    pub async fn get_bid(&self, id: BidId) -> ClientResult<Bid> {
        self.get(&format!("/bids/{id}")).await
    }

    /// Create a bid
    pub async fn create_bid(&self, draft: &BidDraft) -> ClientResult<Bid> {
        draft.validate()?;
        self.post("/bids/", draft).await
    }
}
