//! Main Application Component for ComplyForm
//!
//! Root Dioxus component: sidebar navigation, the current page and a status
//! bar with the environment and active organization.

use complyform_client::Settings;
use dioxus::prelude::*;

use crate::pages::{
    AssessmentPage, BidDetailPage, BidsPage, ComplianceRulesPage, CreateBidPage, DirectoryPage,
    HomePage, OpportunitiesPage, OrganizationsPage, OutreachPage, SubcontractorsPage,
};
use crate::state::{APP_STATE, Page, init_app_state};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let settings = use_context::<Settings>();
    use_hook(move || {
        init_app_state(settings.organization_id);
        tracing::info!(environment = %settings.environment, "ComplyForm UI initialized");
    });

    rsx! {
        div {
            class: "app-container",

            div {
                class: "flex flex-1 overflow-hidden",
                Sidebar {}
                MainContent {}
            }

            StatusBar {}
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

#[component]
fn Sidebar() -> Element {
    let state = APP_STATE.read();
    let collapsed = state.sidebar_collapsed;
    let current = state.page.nav_parent();
    drop(state);

    rsx! {
        aside {
            class: "sidebar",
            class: if collapsed { "sidebar-collapsed" } else { "" },

            div {
                class: "sidebar-header",
                if !collapsed {
                    span { class: "font-semibold text-slate-300", "ComplyForm" }
                }
                button {
                    class: "icon-button",
                    title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| APP_STATE.write().toggle_sidebar(),
                    if collapsed { "☰" } else { "✕" }
                }
            }

            nav {
                class: "flex-1 py-4 overflow-y-auto",
                for page in Page::NAVIGATION {
                    SidebarItem { key: "{page.display_name()}", page, current, collapsed }
                }
            }
        }
    }
}

#[component]
fn SidebarItem(page: Page, current: Page, collapsed: bool) -> Element {
    let name = page.display_name();
    let icon = page.icon();

    rsx! {
        button {
            class: "nav-item",
            class: if page == current { "nav-item-active" } else { "" },
            title: "{name}",
            onclick: move |_| APP_STATE.write().navigate(page),
            span { class: "nav-icon", "{icon}" }
            if !collapsed {
                span { "{name}" }
            }
        }
    }
}

// ============================================================================
// Main Content Area
// ============================================================================

#[component]
fn MainContent() -> Element {
    let page = APP_STATE.read().page;

    rsx! {
        main {
            class: "main-content",

            match page {
                Page::Home => rsx! { HomePage {} },
                Page::Opportunities => rsx! { OpportunitiesPage {} },
                Page::Assessment(id) => rsx! { AssessmentPage { key: "{id}", opportunity_id: id } },
                Page::Bids => rsx! { BidsPage {} },
                Page::CreateBid => rsx! { CreateBidPage {} },
                Page::BidDetail(id) => rsx! { BidDetailPage { key: "{id}", bid_id: id } },
                Page::Organizations => rsx! { OrganizationsPage {} },
                Page::Subcontractors => rsx! { SubcontractorsPage {} },
                Page::Directory => rsx! { DirectoryPage {} },
                Page::ComplianceRules => rsx! { ComplianceRulesPage {} },
                Page::Outreach => rsx! { OutreachPage {} },
            }
        }
    }
}

// ============================================================================
// Status Bar
// ============================================================================

#[component]
fn StatusBar() -> Element {
    let settings = use_context::<Settings>();
    let organization = APP_STATE
        .read()
        .organization
        .as_ref()
        .map(|o| o.label());

    rsx! {
        footer {
            class: "status-bar",
            span {
                class: if settings.environment.is_production() { "text-red-400" } else { "text-emerald-400" },
                "{settings.environment}"
            }
            span { class: "mx-2", "·" }
            span { "{settings.api_base()}" }
            div { class: "flex-1" }
            match organization {
                Some(name) => rsx! {
                    span { "Organization: {name}" }
                    button {
                        class: "icon-button ml-2",
                        title: "Clear active organization",
                        onclick: move |_| APP_STATE.write().clear_organization(),
                        "✕"
                    }
                },
                None => rsx! { span { class: "text-slate-500", "No active organization" } },
            }
        }
    }
}
