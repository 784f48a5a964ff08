//! # Organizations Page
//!
//! Lists organizations, creates new ones, and picks the active organization
//! that scopes subcontractors, outreach and assessments.

use complyform_client::ApiClient;
use complyform_core::Tone;
use complyform_controller::OrganizationSource;
use dioxus::prelude::*;

use super::shared::{create_button, crud_chrome};
use crate::components::{Badge, DataTable, EmptyState, PageHeader};
use crate::hooks::use_crud;
use crate::state::{APP_STATE, ActiveOrganization, Page, navigate, use_organization_id};

#[component]
pub fn OrganizationsPage() -> Element {
    let client = use_context::<ApiClient>();
    let crud = use_crud(move || OrganizationSource::new(client));
    let active = use_organization_id();

    let state = crud.state.read();
    let items = state.items.clone();
    let empty = state.is_empty();
    drop(state);

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Organizations".to_string(),
                subtitle: Some("The active organization scopes subcontractors and outreach".to_string()),
                {create_button(crud)}
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "No organizations yet".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Name", "", ""],
                    for org in items {
                        tr {
                            key: "{org.id}",
                            td {
                                span { class: "font-medium text-white mr-2", "{org.name}" }
                                if active == Some(org.id) {
                                    Badge { label: "Active".to_string(), tone: Tone::Green }
                                }
                            }
                            td {
                                button {
                                    class: "btn btn-small btn-secondary",
                                    disabled: active == Some(org.id),
                                    onclick: {
                                        let selected = ActiveOrganization::from(&org);
                                        move |_| APP_STATE.write().select_organization(selected.clone())
                                    },
                                    "Set active"
                                }
                            }
                            td {
                                button {
                                    class: "btn btn-small btn-secondary",
                                    onclick: {
                                        let selected = ActiveOrganization::from(&org);
                                        move |_| {
                                            APP_STATE.write().select_organization(selected.clone());
                                            navigate(Page::Subcontractors);
                                        }
                                    },
                                    "View network"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
