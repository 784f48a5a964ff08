//! The `CrudSource` trait: everything a list page needs to know about one
//! entity type

use async_trait::async_trait;
use complyform_client::ClientResult;
use complyform_core::{ComplyError, Identified};
use complyform_domain::{FieldSpec, FilterSet, FormModel, FormValues};
use uuid::Uuid;

/// Operations a source offers; the UI hides the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub search: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    /// List only
    pub const READ_ONLY: Self = Self {
        search: false,
        create: false,
        update: false,
        delete: false,
    };

    /// Check if the page shows an inline form
    pub fn has_form(&self) -> bool {
        self.create || self.update
    }
}

/// One entity type behind a list/filter/form page
///
/// Operations a source does not support keep their default body, which
/// returns an "unsupported" error; [`CrudSource::capabilities`] must agree.
#[async_trait]
pub trait CrudSource: Send + Sync + 'static {
    /// Record shown in the list
    type Record: Identified + Clone + PartialEq + Send + Sync + 'static;
    /// Reference data for form selectors
    type Lookups: Clone + Default + PartialEq + Send + Sync + 'static;
    type Filters: FilterSet;
    /// Create payload
    type Draft: FormModel<Self::Lookups> + Send + 'static;
    /// Update payload
    type Patch: FormModel<Self::Lookups> + Send + 'static;

    /// Page heading, plural ("Compliance Rules")
    const TITLE: &'static str;
    /// Singular noun used in banners and form titles ("Compliance Rule")
    const NOUN: &'static str;

    fn capabilities(&self) -> Capabilities;

    /// Full list
    async fn list(&self) -> ClientResult<Vec<Self::Record>>;

    /// List narrowed by filters
    async fn search(&self, _filters: &Self::Filters) -> ClientResult<Vec<Self::Record>> {
        Err(ComplyError::unsupported(Self::TITLE, "search").into())
    }

    /// Reference data, fetched alongside the list
    async fn lookups(&self) -> ClientResult<Self::Lookups> {
        Ok(Self::Lookups::default())
    }

    async fn create(&self, _draft: Self::Draft) -> ClientResult<Self::Record> {
        Err(ComplyError::unsupported(Self::TITLE, "create").into())
    }

    async fn update(&self, _id: Uuid, _patch: Self::Patch) -> ClientResult<Self::Record> {
        Err(ComplyError::unsupported(Self::TITLE, "update").into())
    }

    async fn delete(&self, _id: Uuid) -> ClientResult<()> {
        Err(ComplyError::unsupported(Self::TITLE, "delete").into())
    }

    /// Form values for editing a record
    fn edit_values(&self, _record: &Self::Record) -> FormValues {
        FormValues::new()
    }

    /// Fields of the create form
    fn create_fields(lookups: &Self::Lookups) -> Vec<FieldSpec> {
        Self::Draft::fields(lookups)
    }

    /// Fields of the edit form
    fn edit_fields(lookups: &Self::Lookups) -> Vec<FieldSpec> {
        Self::Patch::fields(lookups)
    }
}
