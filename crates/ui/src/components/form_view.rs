//! Inline create/edit form rendered from a field schema

use complyform_domain::{FieldSpec, FormValues};
use dioxus::prelude::*;

use super::inputs::FieldInput;

#[derive(Props, Clone, PartialEq)]
pub struct FormViewProps {
    /// Heading ("New Compliance Rule")
    pub title: String,

    pub fields: Vec<FieldSpec>,

    pub values: FormValues,

    /// Disable inputs and show progress on the submit button
    #[props(default = false)]
    pub submitting: bool,

    /// Called with `(key, raw value)`
    pub on_change: EventHandler<(String, String)>,

    pub on_submit: EventHandler<()>,

    pub on_cancel: EventHandler<()>,
}

/// Form card with one input per field
#[component]
pub fn FormView(props: FormViewProps) -> Element {
    let on_change = props.on_change;

    rsx! {
        form {
            class: "card mb-6",
            onsubmit: move |e| {
                e.prevent_default();
                props.on_submit.call(());
            },

            h2 { class: "text-lg font-semibold text-white mb-4", "{props.title}" }

            div {
                class: "form-grid",
                for spec in props.fields.iter().cloned() {
                    FieldInput {
                        key: "{spec.key}",
                        value: props.values.get(spec.key).to_string(),
                        disabled: props.submitting,
                        on_change: move |value: String| on_change.call((spec.key.to_string(), value)),
                        spec: spec.clone(),
                    }
                }
            }

            div {
                class: "flex justify-end gap-3 mt-4",
                button {
                    r#type: "button",
                    class: "btn btn-secondary",
                    disabled: props.submitting,
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: props.submitting,
                    if props.submitting { "Saving..." } else { "Save" }
                }
            }
        }
    }
}
