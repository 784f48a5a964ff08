//! # Outreach Page
//!
//! Contact history of the active organization with subcontractors, per
//! opportunity, plus response statistics.

use complyform_client::ApiClient;
use complyform_core::{Identified, OrganizationId};
use complyform_controller::OutreachSource;
use complyform_domain::{Outreach, OutreachFilters, OutreachStats, OutreachStatus, format_percent};
use dioxus::prelude::*;
use uuid::Uuid;

use super::shared::{create_button, crud_chrome};
use super::subcontractors::NoOrganization;
use crate::components::{
    Badge, Checkbox, DataTable, EmptyState, PageHeader, Select, SelectOption, Stat,
};
use crate::hooks::use_crud;
use crate::state::{APP_STATE, Page};

#[component]
pub fn OutreachPage() -> Element {
    let organization = APP_STATE.read().organization.clone();

    match organization {
        None => rsx! { NoOrganization { page: Page::Outreach } },
        Some(org) => rsx! {
            for id in [org.id] {
                OutreachList { key: "{id}", organization_id: id, organization_name: org.label() }
            }
        },
    }
}

#[component]
fn OutreachList(organization_id: OrganizationId, organization_name: String) -> Element {
    let client = use_context::<ApiClient>();
    let source_client = client.clone();
    let crud = use_crud(move || OutreachSource::new(source_client, Some(organization_id)));

    // Statistics follow the list: refetched whenever the loaded records change
    let records = use_memo(move || crud.state.read().items.clone());
    let stats = use_resource(move || {
        let client = client.clone();
        let _ = records.read().len();
        async move {
            client
                .outreach_statistics(organization_id)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Failed to load outreach statistics"))
                .ok()
        }
    });

    let state = crud.state.read();
    let filters = state.filters;
    let items = state.items.clone();
    let empty = state.is_empty();
    let opportunity_options = state
        .lookups
        .opportunities
        .iter()
        .map(|o| SelectOption::new(o.id.to_string(), o.label()))
        .collect::<Vec<_>>();
    drop(state);

    let apply_filters = move |next: OutreachFilters| {
        if next == OutreachFilters::default() {
            crud.clear_filters();
        } else {
            crud.set_filters(next);
            crud.search();
        }
    };

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Outreach".to_string(),
                subtitle: Some(format!("Subcontractor contacts of {organization_name}")),
                {create_button(crud)}
            }

            if let Some(Some(stats)) = &*stats.read() {
                StatsCard { stats: stats.clone() }
            }

            div {
                class: "card filter-bar mb-6",
                Select {
                    label: Some("Opportunity".to_string()),
                    value: filters.opportunity_id.map(|id| id.to_string()).unwrap_or_default(),
                    options: opportunity_options,
                    placeholder: Some("All opportunities".to_string()),
                    on_change: move |value: String| {
                        apply_filters(OutreachFilters {
                            opportunity_id: Uuid::parse_str(&value).ok(),
                            ..filters
                        });
                    },
                }
                div {
                    class: "flex items-end",
                    Checkbox {
                        checked: filters.pending_only,
                        label: "Awaiting reply only".to_string(),
                        on_change: move |pending_only: bool| {
                            apply_filters(OutreachFilters { pending_only, ..filters });
                        },
                    }
                }
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "No outreach records".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Subcontractor", "Opportunity", "Status", "Contacted", "Notes", ""],
                    for record in items {
                        OutreachRow {
                            key: "{record.id}",
                            record,
                            on_edit: move |id| crud.open_edit(id),
                            on_delete: move |id| crud.request_delete(id),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatsCard(stats: OutreachStats) -> Element {
    rsx! {
        div {
            class: "card stat-grid mb-6",
            Stat { label: "Total".to_string(), value: stats.total.to_string() }
            for status in OutreachStatus::all().iter().copied() {
                Stat {
                    key: "{status.code()}",
                    label: status.display_name().to_string(),
                    value: stats.count(status).to_string(),
                    class: Some(status.tone().text_class().to_string()),
                }
            }
            Stat { label: "Response rate".to_string(), value: format_percent(stats.response_rate) }
            Stat { label: "Commitment rate".to_string(), value: format_percent(stats.commitment_rate) }
        }
    }
}

#[component]
fn OutreachRow(
    record: Outreach,
    on_edit: EventHandler<Uuid>,
    on_delete: EventHandler<Uuid>,
) -> Element {
    let id = record.id;
    let contacted = record
        .contact_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let notes = record.notes.clone().unwrap_or_default();

    rsx! {
        tr {
            td { class: "font-medium text-white", "{record.subcontractor_name()}" }
            td { "{record.opportunity_title()}" }
            td {
                Badge {
                    label: record.status.display_name().to_string(),
                    tone: record.status.tone(),
                }
            }
            td { "{contacted}" }
            td { class: "text-sm text-slate-400", "{notes}" }
            td {
                class: "flex gap-2 justify-end",
                button {
                    class: "btn btn-small btn-secondary",
                    onclick: move |_| on_edit.call(id),
                    "Update"
                }
                button {
                    class: "btn btn-small btn-danger",
                    onclick: move |_| on_delete.call(id),
                    "Delete"
                }
            }
        }
    }
}
