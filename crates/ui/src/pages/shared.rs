//! Pieces every list page renders the same way

use complyform_controller::CrudSource;
use dioxus::prelude::*;

use crate::components::{Banner, ConfirmDeleteDialog, FormView, Loading};
use crate::hooks::UseCrud;

/// Banners, the inline form and the delete prompt of a list page
///
/// Called from the page's own render so the handlers belong to the page.
pub fn crud_chrome<S: CrudSource>(crud: UseCrud<S>) -> Element {
    let state = crud.state.read();
    let error = state.error.clone();
    let notice = state.notice.as_ref().map(|n| n.message.clone());
    let form_open = state.form_mode.is_open();
    let title = state.form_mode.title(S::NOUN);
    let values = state.form.clone();
    let submitting = state.is_submitting();
    let pending = state.pending_delete_label();
    let loading = state.is_loading() && !state.loaded;
    drop(state);

    let fields = if form_open { crud.form_fields() } else { Vec::new() };

    rsx! {
        Banner { error, notice }

        if form_open {
            FormView {
                title,
                fields,
                values,
                submitting,
                on_change: move |(key, value): (String, String)| crud.set_field(key, value),
                on_submit: move |_| crud.submit(),
                on_cancel: move |_| crud.close_form(),
            }
        }

        if let Some(label) = pending {
            ConfirmDeleteDialog {
                noun: S::NOUN.to_string(),
                label,
                busy: submitting,
                on_confirm: move |_| crud.confirm_delete(),
                on_cancel: move |_| crud.cancel_delete(),
            }
        }

        if loading {
            Loading {}
        }
    }
}

/// "New X" button, shown when the source can create
pub fn create_button<S: CrudSource>(crud: UseCrud<S>) -> Element {
    if !crud.capabilities().create {
        return rsx! {};
    }
    let disabled = crud.state.read().form_mode.is_open();
    let noun = S::NOUN;
    rsx! {
        button {
            class: "btn btn-primary",
            disabled,
            onclick: move |_| crud.open_create(),
            "+ New {noun}"
        }
    }
}
