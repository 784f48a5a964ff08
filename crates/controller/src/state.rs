//! View state of a list/filter/form page
//!
//! All changes go through [`PageState::apply`], which takes one [`PageEvent`]
//! and returns the [`Effect`]s the driver must carry out (reload the list,
//! schedule a banner clear). Nothing in this module performs I/O, so the whole
//! page lifecycle can be exercised without a server or a window.
//!
//! Every `LoadRequested` starts a new request number. Load and search results
//! carry the number they were issued under; results of an older request are
//! dropped.

use complyform_core::Identified;
use complyform_domain::{FilterSet, FormValues};
use std::time::Duration;
use uuid::Uuid;

/// How long a success banner stays visible
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(3);

// ============================================================================
// Phase & Form Mode
// ============================================================================

/// What the page is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in flight
    #[default]
    Idle,
    /// A list load or search is in flight
    Loading,
    /// A create, update or delete is in flight
    Submitting,
}

/// Whether the inline form is shown, and for what
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Create,
    Edit(Uuid),
}

impl FormMode {
    /// Check if the form is visible
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Closed)
    }

    /// Record being edited, if any
    pub fn editing(&self) -> Option<Uuid> {
        match self {
            FormMode::Edit(id) => Some(*id),
            _ => None,
        }
    }

    /// Heading of the form
    pub fn title(&self, noun: &str) -> String {
        match self {
            FormMode::Edit(_) => format!("Edit {noun}"),
            _ => format!("New {noun}"),
        }
    }
}

/// A success banner; the token ties it to its clear timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub token: u64,
}

// ============================================================================
// Events & Effects
// ============================================================================

/// Everything that can happen to a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<R, L, F> {
    LoadRequested,
    LoadSucceeded {
        request: u64,
        items: Vec<R>,
        lookups: L,
    },
    LoadFailed {
        request: u64,
        message: String,
    },
    SearchSucceeded {
        request: u64,
        items: Vec<R>,
    },
    MutationStarted,
    MutationSucceeded(String),
    MutationFailed(String),
    BannerExpired(u64),
    FormOpened { mode: FormMode, values: FormValues },
    FormClosed,
    FieldChanged { key: String, value: String },
    DeleteRequested(Uuid),
    DeleteCancelled,
    FiltersChanged(F),
    FiltersCleared,
}

/// Follow-up work requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the list again (honouring the current filters)
    Reload,
    /// Deliver `BannerExpired(token)` after `delay`
    ClearNotice { token: u64, delay: Duration },
}

// ============================================================================
// Page State
// ============================================================================

/// Complete view state of one list page
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<R, L, F> {
    /// Records as last returned by the server
    pub items: Vec<R>,
    /// Reference data for selectors (jurisdictions, organizations, ...)
    pub lookups: L,
    pub filters: F,
    /// Raw values of the inline form
    pub form: FormValues,
    pub form_mode: FormMode,
    pub phase: Phase,
    /// Persistent error banner
    pub error: Option<String>,
    /// Transient success banner
    pub notice: Option<Notice>,
    /// Record awaiting delete confirmation
    pub pending_delete: Option<Uuid>,
    /// Whether a load has ever succeeded
    pub loaded: bool,
    next_token: u64,
    request: u64,
}

impl<R, L: Default, F: Default> Default for PageState<R, L, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            lookups: L::default(),
            filters: F::default(),
            form: FormValues::new(),
            form_mode: FormMode::Closed,
            phase: Phase::Idle,
            error: None,
            notice: None,
            pending_delete: None,
            loaded: false,
            next_token: 0,
            request: 0,
        }
    }
}

impl<R, L, F> PageState<R, L, F>
where
    R: Identified,
    L: Default,
    F: FilterSet,
{
    /// Create an empty page state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and return the effects the driver must run
    pub fn apply(&mut self, event: PageEvent<R, L, F>) -> Vec<Effect> {
        match event {
            PageEvent::LoadRequested => {
                self.request += 1;
                self.phase = Phase::Loading;
            }
            PageEvent::LoadSucceeded { request, .. }
            | PageEvent::LoadFailed { request, .. }
            | PageEvent::SearchSucceeded { request, .. }
                if request != self.request => {}
            PageEvent::LoadSucceeded { items, lookups, .. } => {
                self.items = items;
                self.lookups = lookups;
                self.phase = Phase::Idle;
                self.error = None;
                self.loaded = true;
            }
            PageEvent::LoadFailed { message, .. } => {
                self.phase = Phase::Idle;
                self.error = Some(message);
            }
            PageEvent::SearchSucceeded { items, .. } => {
                self.items = items;
                self.phase = Phase::Idle;
                self.error = None;
            }
            PageEvent::MutationStarted => {
                self.phase = Phase::Submitting;
                self.error = None;
            }
            PageEvent::MutationSucceeded(message) => {
                self.phase = Phase::Idle;
                self.form_mode = FormMode::Closed;
                self.form = FormValues::new();
                self.pending_delete = None;
                self.next_token += 1;
                let token = self.next_token;
                self.notice = Some(Notice { message, token });
                return vec![
                    Effect::ClearNotice {
                        token,
                        delay: BANNER_TIMEOUT,
                    },
                    Effect::Reload,
                ];
            }
            PageEvent::MutationFailed(message) => {
                self.phase = Phase::Idle;
                self.pending_delete = None;
                self.error = Some(message);
            }
            PageEvent::BannerExpired(token) => {
                if self.notice.as_ref().is_some_and(|n| n.token == token) {
                    self.notice = None;
                }
            }
            PageEvent::FormOpened { mode, values } => {
                self.form_mode = mode;
                self.form = values;
                self.error = None;
            }
            PageEvent::FormClosed => {
                self.form_mode = FormMode::Closed;
                self.form = FormValues::new();
            }
            PageEvent::FieldChanged { key, value } => {
                self.form.set(&key, value);
            }
            PageEvent::DeleteRequested(id) => {
                self.pending_delete = Some(id);
            }
            PageEvent::DeleteCancelled => {
                self.pending_delete = None;
            }
            PageEvent::FiltersChanged(filters) => {
                self.filters = filters;
            }
            PageEvent::FiltersCleared => {
                self.filters = F::default();
                return vec![Effect::Reload];
            }
        }
        Vec::new()
    }

    /// Number of the latest load or search; results must carry it to apply
    pub fn current_request(&self) -> u64 {
        self.request
    }

    /// Check if a load or search is in flight
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Check if a mutation is in flight
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Look up a record by id
    pub fn find(&self, id: Uuid) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Label of the record awaiting delete confirmation
    pub fn pending_delete_label(&self) -> Option<String> {
        let id = self.pending_delete?;
        Some(self.find(id).map(|r| r.label()).unwrap_or_else(|| id.to_string()))
    }

    /// Check if the list is empty after a successful load
    pub fn is_empty(&self) -> bool {
        self.loaded && self.items.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use complyform_domain::{NoFilters, RuleFilters};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(Uuid, &'static str);

    impl Identified for Row {
        fn id(&self) -> Uuid {
            self.0
        }

        fn label(&self) -> String {
            self.1.to_string()
        }
    }

    type State = PageState<Row, (), NoFilters>;

    #[test]
    fn test_load_cycle() {
        let mut state = State::new();
        assert!(!state.is_empty());

        state.apply(PageEvent::LoadRequested);
        assert!(state.is_loading());

        state.apply(PageEvent::LoadFailed {
            request: 1,
            message: "Failed to load rules".into(),
        });
        assert!(!state.is_loading());
        assert_eq!(state.error.as_deref(), Some("Failed to load rules"));

        state.apply(PageEvent::LoadRequested);
        state.apply(PageEvent::LoadSucceeded {
            request: 2,
            items: vec![],
            lookups: (),
        });
        assert_eq!(state.error, None);
        assert!(state.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_items() {
        let mut state = State::new();
        let row = Row(Uuid::new_v4(), "MBE goal");
        state.apply(PageEvent::LoadSucceeded {
            request: 0,
            items: vec![row.clone()],
            lookups: (),
        });
        state.apply(PageEvent::LoadRequested);
        state.apply(PageEvent::LoadFailed {
            request: 1,
            message: "offline".into(),
        });
        assert_eq!(state.items, vec![row]);
    }

    #[test]
    fn test_slow_load_does_not_overwrite_newer_search() {
        let mut state = State::new();
        let all = vec![Row(Uuid::new_v4(), "MBE goal"), Row(Uuid::new_v4(), "VSBE goal")];
        let maryland = vec![all[0].clone()];

        state.apply(PageEvent::LoadRequested);
        let initial = state.current_request();
        state.apply(PageEvent::LoadRequested);
        let search = state.current_request();
        assert_ne!(initial, search);

        state.apply(PageEvent::SearchSucceeded {
            request: search,
            items: maryland.clone(),
        });
        assert!(!state.is_loading());

        state.apply(PageEvent::LoadSucceeded {
            request: initial,
            items: all,
            lookups: (),
        });
        state.apply(PageEvent::LoadFailed {
            request: initial,
            message: "timed out".into(),
        });
        assert_eq!(state.items, maryland);
        assert_eq!(state.error, None);
        assert!(!state.loaded);
    }

    #[test]
    fn test_mutation_success_closes_form_and_reloads() {
        let mut state = State::new();
        state.apply(PageEvent::FormOpened {
            mode: FormMode::Create,
            values: FormValues::new().with("rule_name", ""),
        });
        state.apply(PageEvent::FieldChanged {
            key: "rule_name".into(),
            value: "Local preference".into(),
        });
        assert_eq!(state.form.get("rule_name"), "Local preference");

        state.apply(PageEvent::MutationStarted);
        assert!(state.is_submitting());

        let effects = state.apply(PageEvent::MutationSucceeded("Rule created".into()));
        assert_eq!(
            effects,
            vec![
                Effect::ClearNotice {
                    token: 1,
                    delay: BANNER_TIMEOUT
                },
                Effect::Reload
            ]
        );
        assert_eq!(state.form_mode, FormMode::Closed);
        assert_eq!(state.form, FormValues::new());
        assert_eq!(state.notice.as_ref().map(|n| n.message.as_str()), Some("Rule created"));
    }

    #[test]
    fn test_mutation_failure_keeps_form_open() {
        let mut state = State::new();
        let values = FormValues::new().with("rule_name", "x");
        state.apply(PageEvent::FormOpened {
            mode: FormMode::Create,
            values: values.clone(),
        });
        state.apply(PageEvent::MutationStarted);
        let effects = state.apply(PageEvent::MutationFailed("Rule name taken".into()));
        assert!(effects.is_empty());
        assert!(state.form_mode.is_open());
        assert_eq!(state.form, values);
        assert_eq!(state.error.as_deref(), Some("Rule name taken"));
    }

    #[test]
    fn test_stale_banner_token_is_ignored() {
        let mut state = State::new();
        state.apply(PageEvent::MutationSucceeded("first".into()));
        state.apply(PageEvent::MutationSucceeded("second".into()));

        state.apply(PageEvent::BannerExpired(1));
        assert_eq!(state.notice.as_ref().map(|n| n.token), Some(2));

        state.apply(PageEvent::BannerExpired(2));
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_delete_confirmation() {
        let mut state = State::new();
        let row = Row(Uuid::new_v4(), "VSBE goal");
        state.apply(PageEvent::LoadSucceeded {
            request: 0,
            items: vec![row.clone()],
            lookups: (),
        });

        state.apply(PageEvent::DeleteRequested(row.0));
        assert_eq!(state.pending_delete_label().as_deref(), Some("VSBE goal"));

        let before = state.clone();
        state.apply(PageEvent::DeleteCancelled);
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.items, before.items);
        assert_eq!(state.notice, before.notice);
    }

    #[test]
    fn test_clearing_filters_requests_reload() {
        let mut state: PageState<Row, (), RuleFilters> = PageState::new();
        state.apply(PageEvent::FiltersChanged(RuleFilters {
            jurisdiction_id: Some(Uuid::new_v4()),
        }));
        assert!(!state.filters.is_empty());

        let effects = state.apply(PageEvent::FiltersCleared);
        assert_eq!(effects, vec![Effect::Reload]);
        assert!(state.filters.is_empty());
    }

    #[test]
    fn test_form_mode() {
        let id = Uuid::new_v4();
        assert!(!FormMode::Closed.is_open());
        assert_eq!(FormMode::Edit(id).editing(), Some(id));
        assert_eq!(FormMode::Create.title("Compliance Rule"), "New Compliance Rule");
        assert_eq!(FormMode::Edit(id).title("Compliance Rule"), "Edit Compliance Rule");
    }
}
