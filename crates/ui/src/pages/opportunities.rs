//! # Opportunities Page
//!
//! Read-only list of procurement opportunities with a filter bar. Each row
//! shows how soon the bid is due and links to its pre-bid assessment.

use chrono::Utc;
use complyform_client::ApiClient;
use complyform_controller::OpportunitySource;
use complyform_domain::display::format_optional_currency;
use complyform_domain::{OpportunityFilters, due_label, format_percent};
use dioxus::prelude::*;

use super::shared::crud_chrome;
use crate::components::{
    Badge, DataTable, EmptyState, PageHeader, Select, SelectOption, TextInput,
};
use crate::hooks::use_crud;
use crate::state::{Page, navigate};

#[component]
pub fn OpportunitiesPage() -> Element {
    let client = use_context::<ApiClient>();
    let crud = use_crud(move || OpportunitySource::new(client));

    let state = crud.state.read();
    let filters = state.filters.clone();
    let items = state.items.clone();
    let empty = state.is_empty();
    let jurisdiction_options = state
        .lookups
        .iter()
        .map(|j| SelectOption::new(j.code.clone(), j.display_label()))
        .collect::<Vec<_>>();
    drop(state);

    let now = Utc::now();

    // Each input edits a copy of the filters and stores it back
    let update = move |edit: fn(&mut OpportunityFilters, String)| {
        move |value: String| {
            let mut next = crud.state.read().filters.clone();
            edit(&mut next, value);
            crud.set_filters(next);
        }
    };

    let active_value = match filters.is_active {
        None => String::new(),
        Some(true) => "true".to_string(),
        Some(false) => "false".to_string(),
    };

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Opportunities".to_string(),
                subtitle: Some("Open solicitations and their participation goals".to_string()),
            }

            div {
                class: "card filter-bar mb-6",
                Select {
                    label: Some("Jurisdiction".to_string()),
                    value: filters.jurisdiction.clone(),
                    options: jurisdiction_options,
                    placeholder: Some("Any".to_string()),
                    on_change: update(|f, v| f.jurisdiction = v),
                }
                TextInput {
                    label: Some("NAICS".to_string()),
                    value: filters.naics.clone(),
                    placeholder: Some("237310".to_string()),
                    on_change: update(|f, v| f.naics = v),
                    on_enter: move |_| crud.search(),
                }
                TextInput {
                    label: Some("Min value".to_string()),
                    value: filters.min_value.clone(),
                    input_type: "number",
                    on_change: update(|f, v| f.min_value = v),
                    on_enter: move |_| crud.search(),
                }
                TextInput {
                    label: Some("Max value".to_string()),
                    value: filters.max_value.clone(),
                    input_type: "number",
                    on_change: update(|f, v| f.max_value = v),
                    on_enter: move |_| crud.search(),
                }
                Select {
                    label: Some("Status".to_string()),
                    value: active_value,
                    options: vec![
                        SelectOption::new("true", "Active"),
                        SelectOption::new("false", "Inactive"),
                    ],
                    placeholder: Some("Any".to_string()),
                    on_change: update(|f, v| f.is_active = v.parse::<bool>().ok()),
                }
                TextInput {
                    label: Some("Due within (days)".to_string()),
                    value: filters.days_until_due.clone(),
                    input_type: "number",
                    on_change: update(|f, v| f.days_until_due = v),
                    on_enter: move |_| crud.search(),
                }
                div {
                    class: "flex items-end gap-2",
                    button { class: "btn btn-primary", onclick: move |_| crud.search(), "Search" }
                    button { class: "btn btn-secondary", onclick: move |_| crud.clear_filters(), "Clear" }
                }
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "No opportunities match these filters".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Title", "Jurisdiction", "Value", "Goals", "Due", ""],
                    for opp in items {
                        tr {
                            key: "{opp.id}",
                            td {
                                div { class: "font-medium text-white", "{opp.title}" }
                                if let Some(number) = &opp.solicitation_number {
                                    div { class: "text-xs text-slate-500", "{number}" }
                                }
                                if let Some(agency) = &opp.agency {
                                    div { class: "text-xs text-slate-400", "{agency}" }
                                }
                            }
                            td { {opp.jurisdiction_code().unwrap_or("-").to_string()} }
                            td { "{format_optional_currency(opp.total_value)}" }
                            td {
                                class: "text-sm",
                                "MBE {format_percent(opp.mbe_goal_or_zero())} · VSBE {format_percent(opp.vsbe_goal_or_zero())}"
                            }
                            td {
                                Badge {
                                    label: due_label(opp.days_until_due(now)),
                                    tone: opp.urgency(now).tone(),
                                }
                                if let Some(due) = opp.due_date {
                                    div { class: "text-xs text-slate-500 mt-1", "{due}" }
                                }
                            }
                            td {
                                button {
                                    class: "btn btn-small btn-secondary",
                                    onclick: move |_| navigate(Page::Assessment(opp.id)),
                                    "Assess"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
