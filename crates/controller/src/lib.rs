//! # ComplyForm Controller
//!
//! Page logic shared by the desktop UI and the tests, with no rendering:
//!
//! - [`state`]: explicit view state of a list page and its events
//! - [`source`]: the [`CrudSource`] trait describing one entity page
//! - [`page`]: async operations over a source, plus the headless [`CrudPage`]
//! - [`sources`]: a source per entity, backed by the API client
//! - [`assessment`]: the pre-bid assessment page

pub mod assessment;
pub mod page;
pub mod source;
pub mod sources;
pub mod state;

pub use assessment::{AssessmentPage, AssessmentState};
pub use page::{CrudPage, SourceEvent, SourceState, fetch_page, fetch_search, remove, submit_form};
pub use source::{Capabilities, CrudSource};
pub use sources::{
    BidSource, DirectorySource, OpportunitySource, OrganizationSource, OutreachSource, RuleSource,
    SubcontractorSource,
};
pub use state::{BANNER_TIMEOUT, Effect, FormMode, Notice, PageEvent, PageState, Phase};
