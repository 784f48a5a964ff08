//! # Pre-bid Assessment Page
//!
//! Scores one opportunity for an organization: a local preview from the
//! organization's network and directory matches, the stored server
//! assessment, bulk invitations for the matched subcontractors and the
//! organization's assessment history.

use chrono::Utc;
use complyform_client::ApiClient;
use complyform_core::{OpportunityId, OrganizationId, Tone};
use complyform_controller::assessment::{
    build_preview, invitation_for, load_context, load_history,
};
use complyform_controller::{AssessmentState, Phase};
use complyform_domain::display::format_optional_currency;
use complyform_domain::{
    AssessmentRecord, AssessmentSummary, DirectoryEntry, NetworkStats, Opportunity,
    Recommendation, RiskFactor, due_label, format_percent,
};
use dioxus::prelude::*;
use uuid::Uuid;

use crate::components::{
    Badge, Banner, DataTable, EmptyState, Loading, PageHeader, Select, SelectOption, Stat,
    TextArea,
};
use crate::hooks::schedule_notice_clear;
use crate::state::{APP_STATE, ActiveOrganization, Page, navigate};

#[component]
pub fn AssessmentPage(opportunity_id: OpportunityId) -> Element {
    let client = use_context::<ApiClient>();
    let mut state = use_signal(AssessmentState::default);
    let mut notes = use_signal(String::new);

    // Preview and history for the selected organization
    let refresh = {
        let client = client.clone();
        move |organization_id: OrganizationId| {
            let client = client.clone();
            let Some(opportunity) = state.read().opportunity.clone() else {
                return;
            };
            state.write().phase = Phase::Loading;
            spawn(async move {
                let today = Utc::now().date_naive();
                let result = tokio::try_join!(
                    build_preview(&client, &opportunity, organization_id, today),
                    load_history(&client, organization_id)
                );
                let mut s = state.write();
                if s.organization_id != Some(organization_id) {
                    return;
                }
                match result {
                    Ok((preview, (history, summary))) => {
                        s.preview = Some(preview);
                        s.history = history;
                        s.summary = Some(summary);
                        s.phase = Phase::Idle;
                    }
                    Err(e) => {
                        tracing::error!(%organization_id, error = %e, "Failed to build preview");
                        s.fail("Failed to load assessment data");
                    }
                }
            });
        }
    };

    let initial_client = client.clone();
    let mut initial_refresh = refresh.clone();
    use_hook(move || {
        let preselected = APP_STATE.read().organization_id();
        state.write().phase = Phase::Loading;
        spawn(async move {
            match load_context(&initial_client, opportunity_id).await {
                Ok((opportunity, organizations)) => {
                    {
                        let mut s = state.write();
                        s.opportunity = Some(opportunity);
                        s.organizations = organizations;
                        s.phase = Phase::Idle;
                        s.error = None;
                        s.select_organization(preselected);
                    }
                    if let Some(id) = preselected {
                        initial_refresh(id);
                    }
                }
                Err(e) => {
                    tracing::error!(opportunity = %opportunity_id, error = %e, "Failed to load opportunity");
                    state.write().fail("Failed to load opportunity");
                }
            }
        });
    });

    let mut announce = move |message: String| {
        let (token, delay) = state.write().succeed(message);
        schedule_notice_clear(delay, move || state.write().expire(token));
    };

    let mut select_refresh = refresh.clone();
    let on_select = move |value: String| {
        let Ok(id) = Uuid::parse_str(&value) else {
            state.write().select_organization(None);
            return;
        };
        let organization = state
            .read()
            .organizations
            .iter()
            .find(|o| o.id == id)
            .map(ActiveOrganization::from);
        state.write().select_organization(Some(id));
        if let Some(organization) = organization {
            APP_STATE.write().select_organization(organization);
        }
        select_refresh(id);
    };

    let assess_client = client.clone();
    let run_assessment = move |_| {
        let Some(organization_id) = state.read().organization_id else {
            state.write().fail("Select an organization first");
            return;
        };
        let client = assess_client.clone();
        state.write().phase = Phase::Submitting;
        spawn(async move {
            let request = complyform_domain::AssessmentRequest {
                organization_id,
                opportunity_id,
            };
            match client.assess(&request).await {
                Ok(report) => {
                    tracing::info!(
                        %organization_id,
                        score = report.overall_risk_score,
                        recommendation = %report.recommendation.display_name(),
                        "Assessment stored"
                    );
                    state.write().report = Some(report);
                    announce("Assessment completed".to_string());
                    if let Ok((history, summary)) = load_history(&client, organization_id).await {
                        let mut s = state.write();
                        s.history = history;
                        s.summary = Some(summary);
                    }
                }
                Err(e) => {
                    tracing::error!(%organization_id, error = %e, "Assessment failed");
                    state.write().fail(e.detail_or("Failed to run assessment"));
                }
            }
        });
    };

    let invite_client = client.clone();
    let invite = move |_| {
        let note = Some(notes.read().trim().to_string()).filter(|n| !n.is_empty());
        let Some(bulk) = state.read().report.as_ref().map(|r| invitation_for(r, note)) else {
            return;
        };
        let client = invite_client.clone();
        state.write().phase = Phase::Submitting;
        spawn(async move {
            match client.bulk_create_outreach(&bulk).await {
                Ok(created) => {
                    tracing::info!(count = created.len(), "Invited matching subcontractors");
                    notes.set(String::new());
                    announce(format!("Contacted {} subcontractors", created.len()));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Bulk outreach failed");
                    state.write().fail(e.detail_or("Failed to create outreach records"));
                }
            }
        });
    };

    let s = state.read();
    let error = s.error.clone();
    let notice = s.notice.as_ref().map(|n| n.message.clone());
    let opportunity = s.opportunity.clone();
    let options = s
        .organizations
        .iter()
        .map(|o| SelectOption::new(o.id.to_string(), o.name.clone()))
        .collect::<Vec<_>>();
    let selected = s.organization_id.map(|id| id.to_string()).unwrap_or_default();
    let has_organization = s.organization_id.is_some();
    let preview = s.preview.clone();
    let report = s.report.clone();
    let history = s.history.clone();
    let summary = s.summary.clone();
    let phase = s.phase;
    let invitable = s.invitable_count();
    drop(s);

    let busy = phase == Phase::Submitting;

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Pre-bid Assessment".to_string(),
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| navigate(Page::Opportunities),
                    "← Back to opportunities"
                }
            }

            Banner { error, notice }

            {match opportunity {
                None if phase == Phase::Loading => rsx! { Loading {} },
                None => rsx! {},
                Some(opportunity) => rsx! {
                    OpportunitySummary { opportunity }

                    div {
                        class: "card filter-bar mb-6",
                        Select {
                            label: Some("Organization".to_string()),
                            value: selected,
                            options,
                            placeholder: Some("Select an organization".to_string()),
                            disabled: busy,
                            on_change: on_select,
                        }
                        div {
                            class: "flex items-end",
                            button {
                                class: "btn btn-primary",
                                disabled: busy || !has_organization,
                                onclick: run_assessment,
                                if busy { "Working..." } else { "Run assessment" }
                            }
                        }
                    }

                    if phase == Phase::Loading {
                        Loading { message: "Computing preview...".to_string() }
                    }

                    if let Some(preview) = preview {
                        RiskPanel {
                            title: "Preview".to_string(),
                            score: preview.risk_score,
                            recommendation: preview.recommendation,
                            reason: preview.recommendation.reason().to_string(),
                            mbe_gap: preview.mbe_gap_percentage,
                            vsbe_gap: preview.vsbe_gap_percentage,
                            available: preview.available_subcontractors_count,
                            factors: preview.factors.clone(),
                            network: Some(preview.network),
                        }
                    }

                    if let Some(report) = report {
                        RiskPanel {
                            title: "Stored assessment".to_string(),
                            score: report.overall_risk_score,
                            recommendation: report.recommendation,
                            reason: report.recommendation_reason.clone(),
                            mbe_gap: report.mbe_gap_percentage,
                            vsbe_gap: report.vsbe_gap_percentage,
                            available: report.available_subcontractors_count,
                            factors: report.factors(),
                            network: report.organization_network.clone(),
                        }

                        div {
                            class: "card mb-6",
                            h2 { class: "text-lg font-semibold text-white mb-4", "Matching subcontractors" }
                            MatchTable { matches: report.matching_subcontractors.clone() }
                            if invitable > 0 {
                                div {
                                    class: "mt-4",
                                    TextArea {
                                        label: Some("Invitation notes".to_string()),
                                        value: notes.read().clone(),
                                        rows: 2,
                                        disabled: busy,
                                        on_change: move |v: String| notes.set(v),
                                    }
                                    button {
                                        class: "btn btn-primary mt-2",
                                        disabled: busy,
                                        onclick: invite,
                                        "Invite {invitable} subcontractors"
                                    }
                                }
                            }
                        }
                    }

                    if has_organization {
                        History { history, summary }
                    }
                },
            }}
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[component]
fn OpportunitySummary(opportunity: Opportunity) -> Element {
    let now = Utc::now();
    let days = opportunity.days_until_due(now);
    let tone = opportunity.urgency(now).tone();

    rsx! {
        div {
            class: "card mb-6",
            div {
                class: "flex items-center justify-between mb-4",
                div {
                    h2 { class: "text-xl font-semibold text-white", "{opportunity.title}" }
                    if let Some(number) = &opportunity.solicitation_number {
                        p { class: "text-sm text-slate-400", "{number}" }
                    }
                }
                Badge { label: due_label(days), tone }
            }
            div {
                class: "stat-grid",
                Stat {
                    label: "Jurisdiction".to_string(),
                    value: opportunity.jurisdiction_code().unwrap_or("-").to_string(),
                }
                Stat { label: "Value".to_string(), value: format_optional_currency(opportunity.total_value) }
                Stat { label: "MBE goal".to_string(), value: format_percent(opportunity.mbe_goal_or_zero()) }
                Stat { label: "VSBE goal".to_string(), value: format_percent(opportunity.vsbe_goal_or_zero()) }
                Stat { label: "NAICS".to_string(), value: opportunity.naics_codes.join(", ") }
            }
        }
    }
}

#[component]
fn RiskPanel(
    title: String,
    score: u32,
    recommendation: Recommendation,
    reason: String,
    mbe_gap: f64,
    vsbe_gap: f64,
    available: usize,
    factors: Vec<RiskFactor>,
    network: Option<NetworkStats>,
) -> Element {
    let tone = recommendation.tone();
    rsx! {
        div {
            class: "card mb-6",
            div {
                class: "flex items-center justify-between mb-4",
                h2 { class: "text-lg font-semibold text-white", "{title}" }
                Badge { label: recommendation.display_name().to_string(), tone }
            }
            p { class: "text-sm {tone.text_class()} mb-4", "{reason}" }
            div {
                class: "stat-grid mb-4",
                Stat { label: "Risk score".to_string(), value: format!("{score} / 100") }
                Stat { label: "MBE gap".to_string(), value: format_percent(mbe_gap) }
                Stat { label: "VSBE gap".to_string(), value: format_percent(vsbe_gap) }
                Stat { label: "Available".to_string(), value: available.to_string() }
                if let Some(network) = network {
                    Stat {
                        label: "Network".to_string(),
                        value: format!("{} ({} MBE, {} VSBE)", network.total_count, network.mbe_count, network.vsbe_count),
                    }
                }
            }
            ul {
                class: "factor-list",
                for (index, factor) in factors.iter().enumerate() {
                    li { key: "{index}", class: "{factor.tone().text_class()}", "{factor.message}" }
                }
            }
        }
    }
}

#[component]
fn MatchTable(matches: Vec<DirectoryEntry>) -> Element {
    if matches.is_empty() {
        return rsx! {
            p { class: "text-slate-400", "No directory matches for this opportunity" }
        };
    }
    rsx! {
        DataTable {
            headers: vec!["Firm", "Certifications", "Rating", "Contact"],
            for entry in matches {
                tr {
                    key: "{entry.id}",
                    td { class: "font-medium text-white", "{entry.legal_name}" }
                    td { {entry.certification_labels().join(", ")} }
                    td { "{entry.rating_label()}" }
                    td { {entry.contact_email.clone().unwrap_or_else(|| "-".to_string())} }
                }
            }
        }
    }
}

#[component]
fn History(history: Vec<AssessmentRecord>, summary: Option<AssessmentSummary>) -> Element {
    rsx! {
        div {
            class: "card mb-6",
            h2 { class: "text-lg font-semibold text-white mb-4", "Assessment history" }
            if let Some(summary) = summary {
                div {
                    class: "stat-grid mb-4",
                    Stat { label: "Assessments".to_string(), value: summary.total_assessments.to_string() }
                    Stat {
                        label: "Bid".to_string(),
                        value: summary.bid_recommended.to_string(),
                        class: Some(Tone::Green.text_class().to_string()),
                    }
                    Stat {
                        label: "Caution".to_string(),
                        value: summary.caution_recommended.to_string(),
                        class: Some(Tone::Yellow.text_class().to_string()),
                    }
                    Stat {
                        label: "No bid".to_string(),
                        value: summary.no_bid_recommended.to_string(),
                        class: Some(Tone::Red.text_class().to_string()),
                    }
                    Stat { label: "Average risk".to_string(), value: format!("{:.2}", summary.average_risk_score) }
                }
            }
            if history.is_empty() {
                EmptyState { message: "No assessments stored for this organization".to_string() }
            } else {
                DataTable {
                    headers: vec!["Opportunity", "Recommendation", "Risk", "Assessed"],
                    for record in history {
                        tr {
                            key: "{record.id}",
                            td {
                                {record.opportunity.as_ref().map(|o| o.title.clone()).unwrap_or_else(|| record.opportunity_id.to_string())}
                            }
                            td {
                                Badge {
                                    label: record.recommendation.display_name().to_string(),
                                    tone: record.recommendation.tone(),
                                }
                            }
                            td { {record.overall_risk_score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())} }
                            td { {record.assessed_at.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())} }
                        }
                    }
                }
            }
        }
    }
}
