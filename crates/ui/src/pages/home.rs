//! # Home Page
//!
//! Connection details of the running client and a quick link to each area.

use complyform_client::{ApiClient, Settings};
use dioxus::prelude::*;
use std::time::Instant;

use crate::components::{Badge, PageHeader, Stat};
use crate::state::{APP_STATE, Page, navigate};
use complyform_core::Tone;

/// Result of the last connectivity check
#[derive(Debug, Clone, PartialEq)]
enum Check {
    NotRun,
    Running,
    Reachable { millis: u128, jurisdictions: usize },
    Failed(String),
}

#[component]
pub fn HomePage() -> Element {
    let settings = use_context::<Settings>();
    let client = use_context::<ApiClient>();
    let mut check = use_signal(|| Check::NotRun);

    let run_check = move |_| {
        let client = client.clone();
        check.set(Check::Running);
        spawn(async move {
            let started = Instant::now();
            match client.list_jurisdictions().await {
                Ok(list) => check.set(Check::Reachable {
                    millis: started.elapsed().as_millis(),
                    jurisdictions: list.len(),
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "Backend check failed");
                    check.set(Check::Failed(e.user_message()));
                }
            }
        });
    };

    let environment = settings.environment;
    let env_tone = if environment.is_production() {
        Tone::Red
    } else {
        Tone::Green
    };
    let api_base = settings.api_base();
    let profile = settings.database_profile();
    let organization = APP_STATE.read().organization.as_ref().map(|o| o.label());

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "ComplyForm".to_string(),
                subtitle: Some("Bid compliance for public construction work".to_string()),
            }

            div {
                class: "card mb-6",
                h2 { class: "text-lg font-semibold text-white mb-4", "Connection" }
                div {
                    class: "stat-grid",
                    div {
                        class: "stat",
                        div { class: "text-xs uppercase text-slate-500", "Environment" }
                        Badge { label: environment.to_string(), tone: env_tone }
                    }
                    Stat { label: "API".to_string(), value: api_base }
                    Stat {
                        label: "Timeout".to_string(),
                        value: format!("{} s", settings.timeout.as_secs()),
                    }
                    Stat {
                        label: "Active organization".to_string(),
                        value: organization.unwrap_or_else(|| "None selected".to_string()),
                    }
                }

                {match profile {
                    Some(profile) => rsx! {
                        div {
                            class: "mt-4 text-sm text-slate-300",
                            p { "Database: {profile.kind.display_name()} (best for {profile.kind.best_for()})" }
                            p { class: "font-mono text-xs text-slate-500", "{profile.masked_url}" }
                        }
                    },
                    None => rsx! {
                        p {
                            class: "mt-4 text-sm text-amber-400",
                            "No database URL configured for {environment}"
                        }
                    },
                }}

                div {
                    class: "flex items-center gap-3 mt-4",
                    button {
                        class: "btn btn-secondary",
                        disabled: *check.read() == Check::Running,
                        onclick: run_check,
                        "Check backend"
                    }
                    {match &*check.read() {
                        Check::NotRun => rsx! {},
                        Check::Running => rsx! { span { class: "text-slate-400", "Checking..." } },
                        Check::Reachable { millis, jurisdictions } => rsx! {
                            span {
                                class: "text-emerald-400",
                                "Reachable in {millis} ms ({jurisdictions} jurisdictions)"
                            }
                        },
                        Check::Failed(message) => rsx! {
                            span { class: "text-red-400", "{message}" }
                        },
                    }}
                }
            }

            div {
                class: "tile-grid",
                for page in Page::NAVIGATION.into_iter().filter(|p| *p != Page::Home) {
                    button {
                        key: "{page.display_name()}",
                        class: "tile",
                        onclick: move |_| navigate(page),
                        span { class: "text-2xl", "{page.icon()}" }
                        span { class: "font-medium", "{page.display_name()}" }
                    }
                }
            }
        }
    }
}
