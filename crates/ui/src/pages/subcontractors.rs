//! # Subcontractors Page
//!
//! The active organization's subcontractor network: list, add, remove.

use complyform_client::ApiClient;
use complyform_core::{OrganizationId, Tone};
use complyform_controller::SubcontractorSource;
use dioxus::prelude::*;

use super::shared::{create_button, crud_chrome};
use crate::components::{Badge, DataTable, EmptyState, PageHeader};
use crate::hooks::use_crud;
use crate::state::{APP_STATE, Page, navigate};

/// Prompt for an organization, or the network of the active one
#[component]
pub fn SubcontractorsPage() -> Element {
    let organization = APP_STATE.read().organization.clone();

    match organization {
        None => rsx! { NoOrganization { page: Page::Subcontractors } },
        // Keyed so switching organization mounts a fresh list
        Some(org) => rsx! {
            for id in [org.id] {
                SubcontractorList { key: "{id}", organization_id: id, organization_name: org.label() }
            }
        },
    }
}

#[component]
fn SubcontractorList(organization_id: OrganizationId, organization_name: String) -> Element {
    let client = use_context::<ApiClient>();
    let crud = use_crud(move || SubcontractorSource::new(client, Some(organization_id)));

    let state = crud.state.read();
    let items = state.items.clone();
    let empty = state.is_empty();
    drop(state);

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Subcontractors".to_string(),
                subtitle: Some(format!("Network of {organization_name}")),
                {create_button(crud)}
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "This organization has no subcontractors yet".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Legal name", "Federal ID", "Certifications", "Flags", ""],
                    for sub in items {
                        tr {
                            key: "{sub.id}",
                            td { class: "font-medium text-white", "{sub.legal_name}" }
                            td { class: "font-mono text-sm", {sub.federal_id.clone().unwrap_or_else(|| "-".to_string())} }
                            td { "{sub.certification_summary()}" }
                            td {
                                class: "flex gap-1",
                                if sub.is_mbe {
                                    Badge { label: "MBE".to_string(), tone: Tone::Blue }
                                }
                                if sub.is_vsbe {
                                    Badge { label: "VSBE".to_string(), tone: Tone::Purple }
                                }
                            }
                            td {
                                button {
                                    class: "btn btn-small btn-danger",
                                    onclick: move |_| crud.request_delete(sub.id),
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Shown by organization-scoped pages while none is active
#[component]
pub fn NoOrganization(page: Page) -> Element {
    rsx! {
        div {
            class: "page",
            PageHeader { title: page.display_name().to_string() }
            div {
                class: "card text-center py-10",
                p { class: "text-slate-300 mb-4", "Select an active organization first." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| navigate(Page::Organizations),
                    "Choose organization"
                }
            }
        }
    }
}
