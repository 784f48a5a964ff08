//! # Input Components
//!
//! Form inputs shared by every page:
//! - **TextInput**: single-line text
//! - **TextArea**: multi-line text
//! - **Select**: dropdown
//! - **Checkbox**: boolean
//! - **FieldInput**: renders whichever of the above a [`FieldSpec`] asks for

use complyform_domain::{FieldKind, FieldSpec};
use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text (optional)
    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    /// Error message (shows error state)
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, number, date)
    #[props(default = "text".to_string())]
    pub input_type: String,

    /// Additional CSS classes
    #[props(default)]
    pub class: Option<String>,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Enter key handler
    #[props(default)]
    pub on_enter: EventHandler<String>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                FieldLabel { text: label.clone(), required: props.required }
            }

            input {
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        props.on_enter.call(props.value.clone());
                    }
                },
            }

            if let Some(error) = &props.error {
                p { class: "mt-1 text-xs text-rose-400", "{error}" }
            }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

/// Properties for TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Number of visible rows
    #[props(default = 3)]
    pub rows: u32,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let class = build_input_class(false, props.disabled, &Some("resize-y".to_string()));

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                FieldLabel { text: label.clone(), required: props.required }
            }

            textarea {
                class: "{class}",
                rows: "{props.rows}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
            }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// Option for Select component
#[derive(Clone, PartialEq, Debug)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new select option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    /// Entry shown for the empty value
    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub class: Option<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let select_class = build_input_class(false, props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                FieldLabel { text: label.clone(), required: props.required }
            }

            select {
                class: "{select_class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                if let Some(placeholder) = &props.placeholder {
                    option {
                        value: "",
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for opt in props.options.iter() {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == props.value,
                        disabled: opt.disabled,
                        "{opt.label}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Checkbox Component
// ============================================================================

/// Properties for Checkbox component
#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub checked: bool,

    pub label: String,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Checkbox with an inline label
#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    rsx! {
        label {
            class: "inline-flex items-center gap-2 cursor-pointer text-sm text-slate-300",
            class: if props.disabled { "opacity-50 cursor-not-allowed" } else { "" },

            input {
                r#type: "checkbox",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |_| {
                    if !props.disabled {
                        props.on_change.call(!props.checked);
                    }
                },
            }
            span { "{props.label}" }
        }
    }
}

// ============================================================================
// Schema-driven Field
// ============================================================================

/// Properties for FieldInput component
#[derive(Props, Clone, PartialEq)]
pub struct FieldInputProps {
    pub spec: FieldSpec,

    /// Raw value from the form
    pub value: String,

    #[props(default = false)]
    pub disabled: bool,

    /// Called with the new raw value
    pub on_change: EventHandler<String>,
}

/// Input chosen by the field's kind
#[component]
pub fn FieldInput(props: FieldInputProps) -> Element {
    let spec = props.spec.clone();
    let label = Some(spec.label.to_string());
    let placeholder = spec.placeholder.map(str::to_string);
    let on_change = props.on_change;

    match spec.kind {
        FieldKind::Text => rsx! {
            TextInput {
                value: props.value,
                label,
                placeholder,
                required: spec.required,
                disabled: props.disabled,
                on_change,
            }
        },
        FieldKind::Number { .. } => rsx! {
            TextInput {
                value: props.value,
                label,
                placeholder,
                required: spec.required,
                disabled: props.disabled,
                input_type: "number",
                on_change,
            }
        },
        FieldKind::TextArea => rsx! {
            TextArea {
                value: props.value,
                label,
                placeholder,
                required: spec.required,
                disabled: props.disabled,
                on_change,
            }
        },
        FieldKind::Select(choices) => {
            let options = choices
                .into_iter()
                .map(|c| SelectOption::new(c.value, c.label))
                .collect::<Vec<_>>();
            rsx! {
                Select {
                    value: props.value,
                    options,
                    label,
                    placeholder: placeholder.or_else(|| Some("Select...".to_string())),
                    required: spec.required,
                    disabled: props.disabled,
                    on_change,
                }
            }
        }
        FieldKind::Checkbox => {
            let checked = matches!(props.value.trim(), "true" | "on" | "1");
            rsx! {
                Checkbox {
                    checked,
                    label: spec.label.to_string(),
                    disabled: props.disabled,
                    on_change: move |value: bool| on_change.call(value.to_string()),
                }
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Label above an input, with the required marker
#[component]
fn FieldLabel(text: String, required: bool) -> Element {
    rsx! {
        label {
            class: "block text-sm font-medium text-slate-300 mb-1.5",
            "{text}"
            if required {
                span { class: "text-rose-400 ml-0.5", "*" }
            }
        }
    }
}

/// Build input class string
fn build_input_class(has_error: bool, disabled: bool, extra: &Option<String>) -> String {
    let mut classes = vec!["input"];

    if has_error {
        classes.push("input-error");
    }

    if disabled {
        classes.push("opacity-50");
        classes.push("cursor-not-allowed");
    }

    let mut result = classes.join(" ");
    if let Some(extra) = extra {
        result.push(' ');
        result.push_str(extra);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_input_class() {
        assert_eq!(build_input_class(false, false, &None), "input");
        assert_eq!(
            build_input_class(true, true, &Some("w-48".to_string())),
            "input input-error opacity-50 cursor-not-allowed w-48"
        );
    }
}
