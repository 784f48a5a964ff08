//! # List Page Hook
//!
//! Binds a [`CrudSource`] to a page: the view state lives in a signal and
//! every operation runs as a task of the page that called the hook, so
//! pending banner timers die with the page.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = use_context::<ApiClient>();
//! let crud = use_crud(move || RuleSource::new(client.clone()));
//!
//! // Change a filter, then search
//! crud.set_filters(RuleFilters { jurisdiction_id: Some(id) });
//! crud.search();
//! ```
//!
//! Children must receive `EventHandler`s created in the page rather than
//! calling the hook methods from their own listeners.

use complyform_controller::{
    Capabilities, CrudSource, Effect, FormMode, PageEvent, SourceEvent, SourceState, fetch_page,
    fetch_search, remove, submit_form,
};
use complyform_domain::{FieldSpec, FormModel};
use dioxus::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// Hook Handle
// ============================================================================

/// Handle returned by [`use_crud`]; cheap to copy into event handlers
pub struct UseCrud<S: CrudSource> {
    /// Page state
    pub state: Signal<SourceState<S>>,
    source: CopyValue<Arc<S>>,
}

impl<S: CrudSource> Clone for UseCrud<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: CrudSource> Copy for UseCrud<S> {}

impl<S: CrudSource> PartialEq for UseCrud<S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

/// Create the page state and start the initial load
pub fn use_crud<S: CrudSource>(make_source: impl FnOnce() -> S) -> UseCrud<S> {
    let state = use_signal(SourceState::<S>::default);
    let source = use_hook(|| CopyValue::new(Arc::new(make_source())));
    let crud = UseCrud { state, source };
    use_hook(move || {
        spawn(async move { crud.load() });
    });
    crud
}

impl<S: CrudSource> UseCrud<S> {
    fn source(&self) -> Arc<S> {
        self.source.read().clone()
    }

    /// Operations the source supports
    pub fn capabilities(&self) -> Capabilities {
        self.source.read().capabilities()
    }

    /// Apply an event and run its effects
    pub fn dispatch(&self, event: SourceEvent<S>) {
        let mut state = self.state;
        let effects = state.write().apply(event);
        for effect in effects {
            match effect {
                Effect::Reload => self.load(),
                Effect::ClearNotice { token, delay } => {
                    schedule_notice_clear(delay, move || {
                        state.write().apply(PageEvent::BannerExpired(token));
                    });
                }
            }
        }
    }

    /// Fetch list and lookups, honouring the current filters
    pub fn load(&self) {
        let this = *self;
        this.dispatch(PageEvent::LoadRequested);
        let (request, filters) = this.request();
        spawn(async move {
            let event = fetch_page(this.source().as_ref(), &filters, request).await;
            this.dispatch(event);
        });
    }

    /// Number and filters of the request just started
    fn request(&self) -> (u64, S::Filters) {
        let state = self.state.read();
        (state.current_request(), state.filters.clone())
    }

    /// Replace the filters without searching
    pub fn set_filters(&self, filters: S::Filters) {
        self.dispatch(PageEvent::FiltersChanged(filters));
    }

    /// Search with the current filters
    pub fn search(&self) {
        let this = *self;
        this.dispatch(PageEvent::LoadRequested);
        let (request, filters) = this.request();
        spawn(async move {
            let event = fetch_search(this.source().as_ref(), &filters, request).await;
            this.dispatch(event);
        });
    }

    /// Reset filters and reload
    pub fn clear_filters(&self) {
        self.dispatch(PageEvent::FiltersCleared);
    }

    /// Open an empty create form
    pub fn open_create(&self) {
        let values = S::Draft::blank(&self.state.read().lookups);
        self.dispatch(PageEvent::FormOpened {
            mode: FormMode::Create,
            values,
        });
    }

    /// Open the edit form of a listed record
    pub fn open_edit(&self, id: Uuid) {
        let values = {
            let state = self.state.read();
            match state.find(id) {
                Some(record) => self.source.read().edit_values(record),
                None => return,
            }
        };
        self.dispatch(PageEvent::FormOpened {
            mode: FormMode::Edit(id),
            values,
        });
    }

    /// Fields of the open form
    pub fn form_fields(&self) -> Vec<FieldSpec> {
        let state = self.state.read();
        match state.form_mode {
            FormMode::Edit(_) => S::edit_fields(&state.lookups),
            _ => S::create_fields(&state.lookups),
        }
    }

    pub fn set_field(&self, key: String, value: String) {
        self.dispatch(PageEvent::FieldChanged { key, value });
    }

    pub fn close_form(&self) {
        self.dispatch(PageEvent::FormClosed);
    }

    /// Submit the open form
    pub fn submit(&self) {
        let this = *self;
        let (mode, form) = {
            let state = this.state.read();
            (state.form_mode, state.form.clone())
        };
        if !mode.is_open() || this.state.read().is_submitting() {
            return;
        }
        this.dispatch(PageEvent::MutationStarted);
        spawn(async move {
            let event = submit_form(this.source().as_ref(), mode, &form).await;
            this.dispatch(event);
        });
    }

    pub fn request_delete(&self, id: Uuid) {
        self.dispatch(PageEvent::DeleteRequested(id));
    }

    pub fn cancel_delete(&self) {
        self.dispatch(PageEvent::DeleteCancelled);
    }

    /// Delete the record awaiting confirmation
    pub fn confirm_delete(&self) {
        let this = *self;
        let Some(id) = this.state.read().pending_delete else {
            return;
        };
        this.dispatch(PageEvent::MutationStarted);
        spawn(async move {
            let event = remove(this.source().as_ref(), id).await;
            this.dispatch(event);
        });
    }
}

// ============================================================================
// Timers
// ============================================================================

/// Run `clear` after `delay` in the current scope
pub fn schedule_notice_clear(delay: Duration, clear: impl FnOnce() + 'static) {
    spawn(async move {
        tokio::time::sleep(delay).await;
        clear();
    });
}
