//! # Compliance Rules Page
//!
//! Jurisdiction-specific participation and certification rules, with full
//! create, edit and delete.

use complyform_client::ApiClient;
use complyform_controller::RuleSource;
use complyform_domain::display::format_optional_percent;
use complyform_domain::jurisdiction::find_jurisdiction;
use complyform_domain::{ComplianceRule, Jurisdiction, RuleFilters};
use dioxus::prelude::*;
use uuid::Uuid;

use super::shared::{create_button, crud_chrome};
use crate::components::{Badge, DataTable, EmptyState, PageHeader, Select, SelectOption};
use crate::hooks::use_crud;

#[component]
pub fn ComplianceRulesPage() -> Element {
    let client = use_context::<ApiClient>();
    let crud = use_crud(move || RuleSource::new(client));

    let state = crud.state.read();
    let selected = state
        .filters
        .jurisdiction_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let items = state.items.clone();
    let jurisdictions = state.lookups.clone();
    let empty = state.is_empty();
    drop(state);

    let options = jurisdictions
        .iter()
        .map(|j| SelectOption::new(j.id.to_string(), j.display_label()))
        .collect::<Vec<_>>();

    rsx! {
        div {
            class: "page",

            PageHeader {
                title: "Compliance Rules".to_string(),
                subtitle: Some("Participation goals and requirements by jurisdiction".to_string()),
                {create_button(crud)}
            }

            div {
                class: "card filter-bar mb-6",
                Select {
                    label: Some("Jurisdiction".to_string()),
                    value: selected,
                    options,
                    placeholder: Some("All jurisdictions".to_string()),
                    on_change: move |value: String| {
                        let jurisdiction_id = Uuid::parse_str(&value).ok();
                        if jurisdiction_id.is_none() {
                            crud.clear_filters();
                        } else {
                            crud.set_filters(RuleFilters { jurisdiction_id });
                            crud.search();
                        }
                    },
                }
            }

            {crud_chrome(crud)}

            if empty {
                EmptyState { message: "No compliance rules found".to_string() }
            } else if !items.is_empty() {
                DataTable {
                    headers: vec!["Rule", "Jurisdiction", "Type", "Severity", "Threshold", ""],
                    for rule in items {
                        RuleRow {
                            key: "{rule.id}",
                            jurisdiction: jurisdiction_label(&rule, &jurisdictions),
                            rule: rule.clone(),
                            on_edit: move |id| crud.open_edit(id),
                            on_delete: move |id| crud.request_delete(id),
                        }
                    }
                }
            }
        }
    }
}

/// Code of the rule's jurisdiction from the embedded record or the lookups
fn jurisdiction_label(rule: &ComplianceRule, jurisdictions: &[Jurisdiction]) -> String {
    rule.jurisdiction
        .as_ref()
        .or_else(|| find_jurisdiction(jurisdictions, rule.jurisdiction_id))
        .map(|j| j.code.clone())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
fn RuleRow(
    rule: ComplianceRule,
    jurisdiction: String,
    on_edit: EventHandler<Uuid>,
    on_delete: EventHandler<Uuid>,
) -> Element {
    let severity = rule.severity();
    let id = rule.id;

    rsx! {
        tr {
            td {
                div { class: "font-medium text-white", "{rule.rule_name}" }
                if let Some(description) = &rule.rule_definition.description {
                    div { class: "text-xs text-slate-400", "{description}" }
                }
            }
            td { "{jurisdiction}" }
            td {
                Badge {
                    label: rule.rule_type.display_name().to_string(),
                    tone: rule.rule_type.tone(),
                }
            }
            td {
                Badge {
                    label: severity.display_name().to_string(),
                    tone: severity.tone(),
                    icon: Some(severity.icon()),
                }
            }
            td { "{format_optional_percent(rule.rule_definition.threshold)}" }
            td {
                class: "flex gap-2 justify-end",
                button {
                    class: "btn btn-small btn-secondary",
                    onclick: move |_| on_edit.call(id),
                    "Edit"
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

#[cfg(test)]
mod tests {
    use super::*;
    use complyform_core::RuleType;
    use complyform_domain::RuleDefinition;
    use pretty_assertions::assert_eq;

    fn rule(jurisdiction_id: Uuid, embedded: Option<Jurisdiction>) -> ComplianceRule {
        ComplianceRule {
            id: Uuid::new_v4(),
            jurisdiction_id,
            rule_name: "MBE participation goal".to_string(),
            rule_type: RuleType::Mbe,
            rule_definition: RuleDefinition::default(),
            severity: None,
            jurisdiction: embedded,
        }
    }

    #[test]
    fn test_jurisdiction_label_sources() {
        let md = Jurisdiction {
            id: Uuid::new_v4(),
            code: "MD".to_string(),
            name: "Maryland".to_string(),
        };
        let lookups = vec![md.clone()];

        assert_eq!(jurisdiction_label(&rule(md.id, None), &lookups), "MD");
        assert_eq!(jurisdiction_label(&rule(Uuid::new_v4(), Some(md)), &[]), "MD");
        assert_eq!(jurisdiction_label(&rule(Uuid::new_v4(), None), &lookups), "-");
    }
}
