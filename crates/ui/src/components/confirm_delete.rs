//! # Confirm Delete Dialog
//!
//! Modal asking for confirmation before a record is deleted. Cancelling
//! only dismisses the prompt.

use dioxus::prelude::*;

// ============================================================================
// Component Props
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDeleteDialogProps {
    /// Kind of record ("Compliance Rule")
    pub noun: String,

    /// Display name of the record
    pub label: String,

    /// Disable the buttons while the delete runs
    #[props(default = false)]
    pub busy: bool,

    pub on_confirm: EventHandler<()>,

    pub on_cancel: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Confirmation dialog for delete operations
#[component]
pub fn ConfirmDeleteDialog(props: ConfirmDeleteDialogProps) -> Element {
    let noun = props.noun.to_lowercase();

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| {
                if !props.busy {
                    props.on_cancel.call(());
                }
            },

            div {
                class: "modal",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex items-start gap-4 mb-6",
                    span { class: "text-2xl", "⚠️" }
                    div {
                        h2 { class: "text-xl font-bold text-red-400 mb-2", "Delete {noun}?" }
                        p {
                            class: "text-slate-300",
                            "This permanently deletes "
                            span { class: "font-medium text-white", "{props.label}" }
                            ". This cannot be undone."
                        }
                    }
                }

                div {
                    class: "flex justify-end gap-3",
                    button {
                        class: "btn btn-secondary",
                        disabled: props.busy,
                        onclick: move |_| props.on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: props.busy,
                        onclick: move |_| props.on_confirm.call(()),
                        if props.busy { "Deleting..." } else { "Delete" }
                    }
                }
            }
        }
    }
}
