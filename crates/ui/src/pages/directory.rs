//! # Subcontractor Directory Page
//!
//! Searchable, read-only directory shared across organizations.

use complyform_client::ApiClient;
use complyform_core::Tone;
use complyform_controller::DirectorySource;
use complyform_domain::{DirectoryEntry, DirectoryFilters};
use dioxus::prelude::*;

use super::shared::crud_chrome;
use crate::components::{Badge, Checkbox, DataTable, EmptyState, PageHeader, TextInput};
use crate::hooks::use_crud;

#[component]
pub fn DirectoryPage() -> Element {
    let client = use_context::<ApiClient>();
    let crud = use_crud(move || DirectorySource::new(client));

    let state = crud.state.read();
    let filters = state.filters.clone();
    let items = state.items.clone();
    let empty = state.is_empty();
    drop(state);

    let edit = move |change: fn(&mut DirectoryFilters, String)| {
        move |value: String| {
            let mut next = crud.state.read().filters.clone();
            change(&mut next, value);
            crud.set_filters(next);
        }
    };
    let toggle = move |change: fn(&mut DirectoryFilters, bool)| {
        move |value: bool| {
            let mut next = crud.state.read().filters.clone();
            change(&mut next, value);
            crud.set_filters(next);
        }
    };

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Subcontractor Directory".to_string(),
                subtitle: Some("Certified firms available for teaming".to_string()),
            }

            div {
                class: "card filter-bar mb-6",
                TextInput {
                    label: Some("NAICS codes".to_string()),
                    value: filters.naics.clone(),
                    placeholder: Some("237310, 238910".to_string()),
                    on_change: edit(|f, v| f.naics = v),
                    on_enter: move |_| crud.search(),
                }
                TextInput {
                    label: Some("Jurisdiction code".to_string()),
                    value: filters.jurisdiction_code.clone(),
                    placeholder: Some("MD".to_string()),
                    on_change: edit(|f, v| f.jurisdiction_code = v),
                    on_enter: move |_| crud.search(),
                }
                TextInput {
                    label: Some("Minimum rating".to_string()),
                    value: filters.min_rating.clone(),
                    input_type: "number",
                    on_change: edit(|f, v| f.min_rating = v),
                    on_enter: move |_| crud.search(),
                }
                div {
                    class: "flex flex-col justify-end gap-2",
                    Checkbox {
                        checked: filters.mbe_only,
                        label: "MBE only".to_string(),
                        on_change: toggle(|f, v| f.mbe_only = v),
                    }
                    Checkbox {
                        checked: filters.vsbe_only,
                        label: "VSBE only".to_string(),
                        on_change: toggle(|f, v| f.vsbe_only = v),
                    }
                }
                div {
                    class: "flex items-end gap-2",
                    button { class: "btn btn-primary", onclick: move |_| crud.search(), "Search" }
                    button { class: "btn btn-secondary", onclick: move |_| crud.clear_filters(), "Clear" }
                }
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "No directory entries match these filters".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Firm", "Certifications", "NAICS", "Location", "Rating", "Contact"],
                    for entry in items {
                        DirectoryRow { key: "{entry.id}", entry }
                    }
                }
            }
        }
    }
}

#[component]
fn DirectoryRow(entry: DirectoryEntry) -> Element {
    let certifications = entry.certification_labels();
    let jurisdictions = entry.jurisdiction_codes.join(", ");
    let naics = entry.naics_codes.join(", ");
    let location = entry.location_city.clone().unwrap_or_else(|| "-".to_string());
    let contact = entry
        .contact_email
        .clone()
        .or_else(|| entry.phone.clone())
        .unwrap_or_else(|| "-".to_string());

    rsx! {
        tr {
            td {
                div {
                    class: "font-medium text-white",
                    "{entry.legal_name}"
                    if entry.is_verified {
                        span { class: "ml-1 text-emerald-400", title: "Verified", "✓" }
                    }
                }
                if let Some(projects) = entry.projects_completed {
                    div { class: "text-xs text-slate-500", "{projects} projects completed" }
                }
            }
            td {
                class: "flex flex-wrap gap-1",
                for label in certifications {
                    Badge { key: "{label}", label: label.clone(), tone: certification_tone(&label) }
                }
            }
            td { class: "font-mono text-xs", "{naics}" }
            td {
                div { "{location}" }
                div { class: "text-xs text-slate-500", "{jurisdictions}" }
            }
            td { "{entry.rating_label()}" }
            td { class: "text-sm", "{contact}" }
        }
    }
}

fn certification_tone(label: &str) -> Tone {
    let upper = label.to_uppercase();
    if upper.contains("VSBE") {
        Tone::Purple
    } else if upper.contains("MBE") {
        Tone::Blue
    } else {
        Tone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_certification_tone() {
        assert_eq!(certification_tone("MBE"), Tone::Blue);
        assert_eq!(certification_tone("vsbe"), Tone::Purple);
        assert_eq!(certification_tone("DBE"), Tone::Neutral);
    }
}
