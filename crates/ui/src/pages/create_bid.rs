//! # Create Bid Page
//!
//! Bid header fields plus a variable list of subcontractor lines. On success
//! the new bid opens in its detail view.

use complyform_client::ApiClient;
use complyform_core::{ComplyError, ComplyResult, Validatable};
use complyform_domain::form::parse_number;
use complyform_domain::{BidDraft, BidLine, FormModel, FormValues, Organization};
use dioxus::prelude::*;

use crate::components::{Banner, Checkbox, FormView, Loading, PageHeader, TextInput};
use crate::state::{Page, navigate, use_organization_id};

// ============================================================================
// Line Input
// ============================================================================

/// One subcontractor row as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineInput {
    pub name: String,
    pub amount: String,
    pub is_mbe: bool,
}

impl LineInput {
    /// Blank rows are skipped; a named row needs a positive amount
    fn to_line(&self, row: usize) -> ComplyResult<Option<BidLine>> {
        let name = self.name.trim();
        if name.is_empty() && self.amount.trim().is_empty() {
            return Ok(None);
        }
        if name.is_empty() {
            return Err(ComplyError::field(
                format!("Subcontractor {row}"),
                "name is required",
            ));
        }
        match parse_number(&self.amount) {
            Some(amount) if amount > 0.0 => Ok(Some(BidLine {
                name: name.to_string(),
                amount,
                is_mbe: self.is_mbe,
            })),
            _ => Err(ComplyError::field(
                format!("Subcontractor {row}"),
                "amount must be a positive number",
            )),
        }
    }
}

/// Combine the header form and the line rows into a create payload
pub fn build_bid(form: &FormValues, lines: &[LineInput]) -> ComplyResult<BidDraft> {
    let mut draft = BidDraft::from_form(form)?;
    for (index, input) in lines.iter().enumerate() {
        if let Some(line) = input.to_line(index + 1)? {
            draft = draft.with_line(line);
        }
    }
    draft.validate()?;
    Ok(draft)
}

// ============================================================================
// Page
// ============================================================================

#[component]
pub fn CreateBidPage() -> Element {
    let client = use_context::<ApiClient>();
    let active_organization = use_organization_id();

    let mut organizations = use_signal(Vec::<Organization>::new);
    let mut values = use_signal(FormValues::new);
    let mut lines = use_signal(|| vec![LineInput::default()]);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| true);
    let mut submitting = use_signal(|| false);

    let load_client = client.clone();
    use_hook(move || {
        spawn(async move {
            match load_client.list_organizations().await {
                Ok(list) => {
                    let mut blank = BidDraft::blank(&list);
                    if let Some(id) = active_organization {
                        blank.set("organization_id", id.to_string());
                    }
                    values.set(blank);
                    organizations.set(list);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load organizations");
                    error.set(Some("Failed to load organizations".to_string()));
                }
            }
            loading.set(false);
        });
    });

    let submit = move |_: ()| {
        if *submitting.read() {
            return;
        }
        let draft = match build_bid(&values.read(), &lines.read()) {
            Ok(draft) => draft,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let client = client.clone();
        submitting.set(true);
        spawn(async move {
            match client.create_bid(&draft).await {
                Ok(bid) => {
                    tracing::info!(bid = %bid.id, lines = bid.subcontractors.len(), "Bid created");
                    navigate(Page::BidDetail(bid.id));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create bid");
                    error.set(Some(e.detail_or("Failed to create bid")));
                    submitting.set(false);
                }
            }
        });
    };

    let fields = BidDraft::fields(&organizations.read());
    let busy = *submitting.read();
    let rows = lines.read().clone();

    rsx! {
        div {
            class: "page",

            PageHeader { title: "Create Bid".to_string() }

            Banner { error: error.read().clone() }

            if *loading.read() {
                Loading {}
            } else {
                FormView {
                    title: "Bid".to_string(),
                    fields,
                    values: values.read().clone(),
                    submitting: busy,
                    on_change: move |(key, value): (String, String)| values.write().set(&key, value),
                    on_submit: submit,
                    on_cancel: move |_| navigate(Page::Bids),
                }

                div {
                    class: "card mb-6",
                    div {
                        class: "flex items-center justify-between mb-4",
                        h2 { class: "text-lg font-semibold text-white", "Subcontractors" }
                        button {
                            class: "btn btn-secondary btn-small",
                            disabled: busy,
                            onclick: move |_| lines.write().push(LineInput::default()),
                            "+ Add line"
                        }
                    }

                    for (index, row) in rows.into_iter().enumerate() {
                        div {
                            key: "{index}",
                            class: "line-row",
                            TextInput {
                                value: row.name,
                                placeholder: Some("Subcontractor name".to_string()),
                                disabled: busy,
                                on_change: move |v: String| {
                                    if let Some(line) = lines.write().get_mut(index) {
                                        line.name = v;
                                    }
                                },
                            }
                            TextInput {
                                value: row.amount,
                                placeholder: Some("Amount".to_string()),
                                input_type: "number",
                                disabled: busy,
                                on_change: move |v: String| {
                                    if let Some(line) = lines.write().get_mut(index) {
                                        line.amount = v;
                                    }
                                },
                            }
                            Checkbox {
                                checked: row.is_mbe,
                                label: "MBE".to_string(),
                                disabled: busy,
                                on_change: move |checked: bool| {
                                    if let Some(line) = lines.write().get_mut(index) {
                                        line.is_mbe = checked;
                                    }
                                },
                            }
                            button {
                                class: "btn btn-danger btn-small",
                                disabled: busy,
                                onclick: move |_| {
                                    let mut rows = lines.write();
                                    if index < rows.len() {
                                        rows.remove(index);
                                    }
                                },
                                "Remove"
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn header(total: &str) -> FormValues {
        FormValues::new()
            .with("organization_id", Uuid::new_v4().to_string())
            .with("solicitation_number", "MDOT-2025-114")
            .with("total_amount", total)
            .with("mbe_goal", "25")
    }

    fn line(name: &str, amount: &str, is_mbe: bool) -> LineInput {
        LineInput {
            name: name.to_string(),
            amount: amount.to_string(),
            is_mbe,
        }
    }

    #[test]
    fn test_build_bid_skips_blank_rows() {
        let draft = build_bid(
            &header("1000000"),
            &[
                line("Chesapeake Paving", "150,000", true),
                LineInput::default(),
                line("Harbor Steel", "300000", false),
            ],
        )
        .unwrap();

        assert_eq!(draft.subcontractors.len(), 2);
        assert_eq!(draft.subcontractors[0].amount, 150_000.0);
        assert!(draft.subcontractors[0].is_mbe);
        assert_eq!(draft.mbe_goal, Some(25.0));
    }

    #[test]
    fn test_build_bid_rejects_bad_line() {
        let err = build_bid(&header("1000000"), &[line("", "5000", false)]).unwrap_err();
        assert_eq!(err.to_string(), "Subcontractor 1: name is required");

        let err = build_bid(&header("1000000"), &[line("Harbor Steel", "abc", false)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Subcontractor 1: amount must be a positive number"
        );
    }

    #[test]
    fn test_build_bid_rejects_lines_over_total() {
        let err = build_bid(&header("100000"), &[line("Harbor Steel", "250000", false)]).unwrap_err();
        assert_eq!(err.to_string(), "Subcontractors: amounts exceed the bid total");
    }
}
