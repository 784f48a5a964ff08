//! Page scaffolding: header, empty and loading states, data table

use dioxus::prelude::*;

/// Page title with optional subtitle and action buttons
#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-between mb-6",
            div {
                h1 { class: "text-2xl font-bold text-white", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "text-sm text-slate-400 mt-1", "{subtitle}" }
                }
            }
            div { class: "flex gap-2", {children} }
        }
    }
}

/// Placeholder for a list with no rows
#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div {
            class: "card text-center text-slate-400 py-10",
            "{message}"
        }
    }
}

/// Indicator shown while a request is in flight
#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "text-center text-slate-400 py-10",
            span { class: "spinner mr-2" }
            "{message}"
        }
    }
}

/// Table with a header row; rows are passed as children
#[component]
pub fn DataTable(headers: Vec<&'static str>, children: Element) -> Element {
    rsx! {
        div {
            class: "card p-0 overflow-x-auto",
            table {
                class: "table",
                thead {
                    tr {
                        for header in headers {
                            th { key: "{header}", "{header}" }
                        }
                    }
                }
                tbody { {children} }
            }
        }
    }
}

/// Labelled value in a detail view
#[component]
pub fn Stat(label: String, value: String, #[props(default)] class: Option<String>) -> Element {
    let value_class = class.unwrap_or_else(|| "text-white".to_string());
    rsx! {
        div {
            class: "stat",
            div { class: "text-xs uppercase text-slate-500", "{label}" }
            div { class: "text-lg font-semibold {value_class}", "{value}" }
        }
    }
}
