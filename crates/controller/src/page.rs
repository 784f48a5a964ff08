//! Async operations of a list page and a headless driver
//!
//! The free functions (`fetch_page`, `fetch_search`, `submit_form`,
//! `remove`) talk to a [`CrudSource`] and turn the outcome into a
//! [`PageEvent`]; they never touch state. The desktop UI feeds their events
//! into a signal, [`CrudPage`] feeds them into an owned [`PageState`].

use crate::source::CrudSource;
use crate::state::{Effect, FormMode, PageEvent, PageState};
use complyform_domain::{FilterSet, FormModel, FormValues};
use std::time::Duration;
use uuid::Uuid;

/// Page state for a source
pub type SourceState<S> = PageState<
    <S as CrudSource>::Record,
    <S as CrudSource>::Lookups,
    <S as CrudSource>::Filters,
>;

/// Page event for a source
pub type SourceEvent<S> = PageEvent<
    <S as CrudSource>::Record,
    <S as CrudSource>::Lookups,
    <S as CrudSource>::Filters,
>;

// ============================================================================
// Operations
// ============================================================================

/// Fetch the list and the lookups concurrently
///
/// The list comes from the search endpoint when any filter is set. Either
/// request failing fails the whole load. `request` is the state's
/// [`PageState::current_request`] when the fetch started.
pub async fn fetch_page<S: CrudSource>(
    source: &S,
    filters: &S::Filters,
    request: u64,
) -> SourceEvent<S> {
    let list = async {
        if filters.is_empty() {
            source.list().await
        } else {
            source.search(filters).await
        }
    };

    match tokio::try_join!(list, source.lookups()) {
        Ok((items, lookups)) => {
            tracing::debug!(page = S::TITLE, count = items.len(), "Loaded list");
            PageEvent::LoadSucceeded {
                request,
                items,
                lookups,
            }
        }
        Err(e) => {
            tracing::error!(page = S::TITLE, error = %e, "Failed to load list");
            PageEvent::LoadFailed {
                request,
                message: format!("Failed to load {}", S::TITLE.to_lowercase()),
            }
        }
    }
}

/// Run a search with the given filters; empty filters list everything
pub async fn fetch_search<S: CrudSource>(
    source: &S,
    filters: &S::Filters,
    request: u64,
) -> SourceEvent<S> {
    let query = filters.to_query();
    tracing::debug!(page = S::TITLE, params = query.pairs().len(), "Searching");

    let result = if query.is_empty() {
        source.list().await
    } else {
        source.search(filters).await
    };

    match result {
        Ok(items) => {
            tracing::debug!(page = S::TITLE, count = items.len(), "Search returned");
            PageEvent::SearchSucceeded { request, items }
        }
        Err(e) => {
            tracing::error!(page = S::TITLE, error = %e, "Search failed");
            PageEvent::LoadFailed {
                request,
                message: format!("Failed to search {}", S::TITLE.to_lowercase()),
            }
        }
    }
}

/// Build the payload from the form and send it
///
/// Validation errors never reach the server. Server errors surface their
/// `detail` when one is present.
pub async fn submit_form<S: CrudSource>(
    source: &S,
    mode: FormMode,
    form: &FormValues,
) -> SourceEvent<S> {
    let noun = S::NOUN.to_lowercase();
    let outcome = match mode {
        FormMode::Closed => return PageEvent::FormClosed,
        FormMode::Create => match S::Draft::from_form(form) {
            Ok(draft) => source
                .create(draft)
                .await
                .map(|_| format!("{} created successfully", S::NOUN))
                .map_err(|e| (e, format!("Failed to create {noun}"))),
            Err(e) => return PageEvent::MutationFailed(e.to_string()),
        },
        FormMode::Edit(id) => match S::Patch::from_form(form) {
            Ok(patch) => source
                .update(id, patch)
                .await
                .map(|_| format!("{} updated successfully", S::NOUN))
                .map_err(|e| (e, format!("Failed to update {noun}"))),
            Err(e) => return PageEvent::MutationFailed(e.to_string()),
        },
    };

    match outcome {
        Ok(message) => {
            tracing::info!(page = S::TITLE, ?mode, "Saved");
            PageEvent::MutationSucceeded(message)
        }
        Err((e, fallback)) => {
            tracing::error!(page = S::TITLE, ?mode, error = %e, "Save failed");
            PageEvent::MutationFailed(e.detail_or(&fallback))
        }
    }
}

/// Delete a record
pub async fn remove<S: CrudSource>(source: &S, id: Uuid) -> SourceEvent<S> {
    match source.delete(id).await {
        Ok(()) => {
            tracing::info!(page = S::TITLE, %id, "Deleted");
            PageEvent::MutationSucceeded(format!("{} deleted successfully", S::NOUN))
        }
        Err(e) => {
            tracing::error!(page = S::TITLE, %id, error = %e, "Delete failed");
            PageEvent::MutationFailed(
                e.detail_or(&format!("Failed to delete {}", S::NOUN.to_lowercase())),
            )
        }
    }
}

// ============================================================================
// Headless Driver
// ============================================================================

/// A list page without a window
///
/// Owns the state and runs effects inline: reloads are awaited, banner
/// clears are queued until [`CrudPage::expire_notice`] is called.
pub struct CrudPage<S: CrudSource> {
    source: S,
    state: SourceState<S>,
    timers: Vec<(u64, Duration)>,
}

impl<S: CrudSource> CrudPage<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: PageState::new(),
            timers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SourceState<S> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Banner clears waiting to fire
    pub fn scheduled_clears(&self) -> &[(u64, Duration)] {
        &self.timers
    }

    /// Fetch list and lookups, honouring the current filters
    pub async fn load_data(&mut self) {
        self.state.apply(PageEvent::LoadRequested);
        let request = self.state.current_request();
        let event = fetch_page(&self.source, &self.state.filters, request).await;
        self.state.apply(event);
    }

    /// Replace the filters without searching
    pub fn set_filters(&mut self, filters: S::Filters) {
        self.state.apply(PageEvent::FiltersChanged(filters));
    }

    /// Search with new filters
    pub async fn search(&mut self, filters: S::Filters) {
        self.state.apply(PageEvent::FiltersChanged(filters));
        self.state.apply(PageEvent::LoadRequested);
        let request = self.state.current_request();
        let event = fetch_search(&self.source, &self.state.filters, request).await;
        self.state.apply(event);
    }

    /// Reset the filters and reload
    pub async fn clear_filters(&mut self) {
        let effects = self.state.apply(PageEvent::FiltersCleared);
        self.run(effects).await;
    }

    /// Open an empty create form
    pub fn open_create(&mut self) {
        let values = S::Draft::blank(&self.state.lookups);
        self.state.apply(PageEvent::FormOpened {
            mode: FormMode::Create,
            values,
        });
    }

    /// Open the edit form for a listed record; false when it is not listed
    pub fn open_edit(&mut self, id: Uuid) -> bool {
        let Some(record) = self.state.find(id) else {
            return false;
        };
        let values = self.source.edit_values(record);
        self.state.apply(PageEvent::FormOpened {
            mode: FormMode::Edit(id),
            values,
        });
        true
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        self.state.apply(PageEvent::FieldChanged {
            key: key.to_string(),
            value: value.into(),
        });
    }

    pub fn close_form(&mut self) {
        self.state.apply(PageEvent::FormClosed);
    }

    /// Submit the open form
    pub async fn submit(&mut self) {
        let mode = self.state.form_mode;
        if !mode.is_open() {
            return;
        }
        self.state.apply(PageEvent::MutationStarted);
        let event = submit_form(&self.source, mode, &self.state.form).await;
        let effects = self.state.apply(event);
        self.run(effects).await;
    }

    /// Create a record from the given values
    pub async fn submit_create(&mut self, values: FormValues) {
        self.state.apply(PageEvent::FormOpened {
            mode: FormMode::Create,
            values,
        });
        self.submit().await;
    }

    /// Update a record from the given values
    pub async fn submit_update(&mut self, id: Uuid, values: FormValues) {
        self.state.apply(PageEvent::FormOpened {
            mode: FormMode::Edit(id),
            values,
        });
        self.submit().await;
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, id: Uuid) {
        self.state.apply(PageEvent::DeleteRequested(id));
    }

    /// Dismiss the confirmation without deleting
    pub fn cancel_delete(&mut self) {
        self.state.apply(PageEvent::DeleteCancelled);
    }

    /// Delete the record awaiting confirmation
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.state.pending_delete else {
            return;
        };
        self.state.apply(PageEvent::MutationStarted);
        let event = remove(&self.source, id).await;
        let effects = self.state.apply(event);
        self.run(effects).await;
    }

    /// Fire the oldest queued banner clear
    pub fn expire_notice(&mut self) {
        if self.timers.is_empty() {
            return;
        }
        let (token, _) = self.timers.remove(0);
        self.state.apply(PageEvent::BannerExpired(token));
    }

    async fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Reload => self.load_data().await,
                Effect::ClearNotice { token, delay } => self.timers.push((token, delay)),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
