//! # Pages
//!
//! One component per navigation target. List pages share their chrome
//! through [`shared`].

pub mod assessment;
pub mod bids;
pub mod compliance_rules;
pub mod create_bid;
pub mod directory;
pub mod home;
pub mod opportunities;
pub mod organizations;
pub mod outreach;
pub mod shared;
pub mod subcontractors;

pub use assessment::AssessmentPage;
pub use bids::{BidDetailPage, BidsPage};
pub use compliance_rules::ComplianceRulesPage;
pub use create_bid::CreateBidPage;
pub use directory::DirectoryPage;
pub use home::HomePage;
pub use opportunities::OpportunitiesPage;
pub use organizations::OrganizationsPage;
pub use outreach::OutreachPage;
pub use subcontractors::SubcontractorsPage;
