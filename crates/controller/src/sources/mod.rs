//! One [`CrudSource`](crate::CrudSource) per entity page, backed by
//! [`ApiClient`](complyform_client::ApiClient)

mod bids;
mod compliance_rules;
mod directory;
mod opportunities;
mod organizations;
mod outreach;
mod subcontractors;

pub use bids::BidSource;
pub use compliance_rules::RuleSource;
pub use directory::DirectorySource;
pub use opportunities::OpportunitySource;
pub use organizations::OrganizationSource;
pub use outreach::OutreachSource;
pub use subcontractors::SubcontractorSource;
