//! # Bids Pages
//!
//! The bid list and the detail view of one bid with its MBE participation.

use complyform_client::ApiClient;
use complyform_core::{BidId, Tone};
use complyform_controller::BidSource;
use complyform_domain::display::{format_optional_currency, format_optional_percent};
use complyform_domain::{Bid, format_currency};
use dioxus::prelude::*;

use super::shared::crud_chrome;
use crate::components::{Badge, Banner, DataTable, EmptyState, Loading, PageHeader, Stat};
use crate::hooks::use_crud;
use crate::state::{Page, navigate};

// ============================================================================
// List
// ============================================================================

#[component]
pub fn BidsPage() -> Element {
    let client = use_context::<ApiClient>();
    let crud = use_crud(move || BidSource::new(client));

    let state = crud.state.read();
    let items = state.items.clone();
    let empty = state.is_empty();
    let organizations = state.lookups.clone();
    drop(state);

    let organization_name = move |bid: &Bid| {
        organizations
            .iter()
            .find(|o| o.id == bid.organization_id)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "-".to_string())
    };

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Bids".to_string(),
                button {
                    class: "btn btn-primary",
                    onclick: move |_| navigate(Page::CreateBid),
                    "+ New Bid"
                }
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "No bids yet".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Solicitation", "Organization", "Total", "MBE", "Subcontractors"],
                    for bid in items {
                        tr {
                            key: "{bid.id}",
                            class: "row-link",
                            onclick: move |_| navigate(Page::BidDetail(bid.id)),
                            td { class: "font-medium text-white", "{bid.solicitation_number}" }
                            td { {organization_name(&bid)} }
                            td { "{format_optional_currency(bid.total_amount)}" }
                            td {
                                ParticipationBadge { bid: bid.clone() }
                            }
                            td { "{bid.subcontractors.len()}" }
                        }
                    }
                }
            }
        }
    }
}

/// MBE participation coloured by whether it meets the goal
#[component]
fn ParticipationBadge(bid: Bid) -> Element {
    let label = format!(
        "{} of {}",
        format_optional_percent(bid.mbe_participation()),
        format_optional_percent(bid.mbe_goal)
    );
    let tone = match bid.meets_mbe_goal() {
        Some(true) => Tone::Green,
        Some(false) => Tone::Red,
        None => Tone::Neutral,
    };
    rsx! {
        Badge { label, tone }
    }
}

// ============================================================================
// Detail
// ============================================================================

#[component]
pub fn BidDetailPage(bid_id: BidId) -> Element {
    let client = use_context::<ApiClient>();
    let bid = use_resource(move || {
        let client = client.clone();
        async move {
            client.get_bid(bid_id).await.inspect_err(|e| {
                tracing::error!(bid = %bid_id, error = %e, "Failed to load bid");
            })
        }
    });

    let body = match &*bid.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            Banner { error: Some(e.detail_or("Failed to load bid")) }
        },
        Some(Ok(bid)) => rsx! { BidSummary { bid: bid.clone() } },
    };

    rsx! {
        div {
            class: "page",
            PageHeader {
                title: "Bid Detail".to_string(),
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| navigate(Page::Bids),
                    "← Back to bids"
                }
            }
            {body}
        }
    }
}

#[component]
fn BidSummary(bid: Bid) -> Element {
    rsx! {
        div {
            class: "card mb-6",
            h2 { class: "text-xl font-semibold text-white mb-4", "{bid.solicitation_number}" }
            div {
                class: "stat-grid",
                Stat { label: "Total".to_string(), value: format_optional_currency(bid.total_amount) }
                Stat { label: "MBE amount".to_string(), value: format_currency(bid.mbe_amount()) }
                Stat {
                    label: "MBE participation".to_string(),
                    value: format_optional_percent(bid.mbe_participation()),
                }
                Stat { label: "MBE goal".to_string(), value: format_optional_percent(bid.mbe_goal) }
            }
            div {
                class: "mt-4",
                ParticipationBadge { bid: bid.clone() }
            }
        }

        if bid.subcontractors.is_empty() {
            EmptyState { message: "No subcontractors on this bid".to_string() }
        } else {
            DataTable {
                headers: vec!["Subcontractor", "Amount", "MBE"],
                for (index, line) in bid.subcontractors.iter().enumerate() {
                    tr {
                        key: "{index}",
                        td { "{line.name}" }
                        td { "{format_currency(line.amount)}" }
                        td {
                            if line.is_mbe {
                                Badge { label: "MBE".to_string(), tone: Tone::Blue }
                            }
                        }
                    }
                }
            }
        }
    }
}
