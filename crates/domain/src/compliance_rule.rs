//! Jurisdiction-specific compliance rules
//!
//! Rules are the one entity with full create/update/delete in the client.
//! Updates are partial: only the fields present in [`RulePatch`] change, and
//! a rule's jurisdiction cannot be moved.

use crate::filters::{FilterSet, QueryParams};
use crate::form::{FieldSpec, FormModel, FormValues, SelectChoice, format_number};
use crate::jurisdiction::{Jurisdiction, jurisdiction_choices};
use crate::serde_helpers::lenient_f64;
use complyform_core::{
    ComplyError, ComplyResult, Identified, JurisdictionId, RuleId, RuleType, Severity, Validatable,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Form key carrying the definition keys the form does not edit, as JSON
const DEFINITION_EXTRA_KEY: &str = "rule_definition_extra";

// ============================================================================
// Record
// ============================================================================

/// Body of a rule: a percentage threshold and a free-text description
///
/// Keys the client does not know about are kept so that they survive a
/// round trip through the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A compliance rule as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    pub id: RuleId,
    pub jurisdiction_id: JurisdictionId,
    pub rule_name: String,
    pub rule_type: RuleType,
    #[serde(default)]
    pub rule_definition: RuleDefinition,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
}

impl ComplianceRule {
    /// Severity, defaulting to `ERROR` when the record has none
    pub fn severity(&self) -> Severity {
        self.severity.unwrap_or_default()
    }

    /// Form values for editing this rule
    ///
    /// Definition keys without a field ride along under a hidden key so the
    /// update sends them back unchanged.
    pub fn to_form(&self) -> FormValues {
        let mut form = FormValues::new()
            .with("jurisdiction_id", self.jurisdiction_id.to_string())
            .with("rule_name", self.rule_name.clone())
            .with("rule_type", self.rule_type.code())
            .with(
                "threshold",
                self.rule_definition
                    .threshold
                    .map(format_number)
                    .unwrap_or_default(),
            )
            .with(
                "description",
                self.rule_definition.description.clone().unwrap_or_default(),
            )
            .with("severity", self.severity().code());
        if !self.rule_definition.extra.is_empty() {
            let extra = Value::Object(self.rule_definition.extra.clone());
            form.set(DEFINITION_EXTRA_KEY, extra.to_string());
        }
        form
    }
}

impl Identified for ComplianceRule {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.rule_name.clone()
    }
}

// ============================================================================
// Form Fields
// ============================================================================

fn rule_type_choices() -> Vec<SelectChoice> {
    RuleType::all()
        .iter()
        .map(|t| SelectChoice::new(t.code(), t.display_name()))
        .collect()
}

fn severity_choices() -> Vec<SelectChoice> {
    Severity::all()
        .iter()
        .map(|s| SelectChoice::new(s.code(), s.display_name()))
        .collect()
}

fn body_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("rule_name", "Rule name")
            .required()
            .with_placeholder("MBE participation goal"),
        FieldSpec::select("rule_type", "Rule type", rule_type_choices())
            .required()
            .with_default(RuleType::default().code()),
        FieldSpec::percent("threshold", "Threshold (%)"),
        FieldSpec::text_area("description", "Description"),
        FieldSpec::select("severity", "Severity", severity_choices())
            .with_default(Severity::default().code()),
    ]
}

fn definition_from_form(form: &FormValues) -> ComplyResult<RuleDefinition> {
    let threshold = form.number("threshold", "Threshold")?;
    if threshold.is_some_and(|t| !(0.0..=100.0).contains(&t)) {
        return Err(ComplyError::field("Threshold", "must be between 0 and 100"));
    }
    let extra = match form.text(DEFINITION_EXTRA_KEY) {
        Some(raw) => serde_json::from_str::<Map<String, Value>>(&raw)?,
        None => Map::new(),
    };
    Ok(RuleDefinition {
        threshold,
        description: form.text("description"),
        extra,
    })
}

// ============================================================================
// Create Payload
// ============================================================================

/// Create payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDraft {
    pub jurisdiction_id: JurisdictionId,
    pub rule_name: String,
    pub rule_type: RuleType,
    pub rule_definition: RuleDefinition,
    pub severity: Severity,
}

impl Validatable for RuleDraft {
    fn validate(&self) -> ComplyResult<()> {
        if self.rule_name.trim().is_empty() {
            return Err(ComplyError::field("Rule name", "is required"));
        }
        if self.rule_type == RuleType::Other || self.severity == Severity::Other {
            return Err(ComplyError::validation("Unknown rule type or severity"));
        }
        Ok(())
    }
}

impl FormModel<Vec<Jurisdiction>> for RuleDraft {
    fn fields(jurisdictions: &Vec<Jurisdiction>) -> Vec<FieldSpec> {
        let mut fields = vec![
            FieldSpec::select(
                "jurisdiction_id",
                "Jurisdiction",
                jurisdiction_choices(jurisdictions),
            )
            .required(),
        ];
        fields.extend(body_fields());
        fields
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        let severity = match form.text("severity") {
            Some(code) => code.parse::<Severity>()?,
            None => Severity::default(),
        };
        let draft = Self {
            jurisdiction_id: form.required_uuid("jurisdiction_id", "Jurisdiction")?,
            rule_name: form.required_text("rule_name", "Rule name")?,
            rule_type: form
                .required_text("rule_type", "Rule type")?
                .parse::<RuleType>()?,
            rule_definition: definition_from_form(form)?,
            severity,
        };
        draft.validate()?;
        Ok(draft)
    }
}

// ============================================================================
// Update Payload
// ============================================================================

/// Partial update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_definition: Option<RuleDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl FormModel<Vec<Jurisdiction>> for RulePatch {
    fn fields(_jurisdictions: &Vec<Jurisdiction>) -> Vec<FieldSpec> {
        body_fields()
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        let rule_name = form.text("rule_name");
        if rule_name.is_none() {
            return Err(ComplyError::field("Rule name", "is required"));
        }
        let rule_type = form
            .text("rule_type")
            .map(|c| c.parse::<RuleType>())
            .transpose()?;
        let severity = form
            .text("severity")
            .map(|c| c.parse::<Severity>())
            .transpose()?;
        Ok(Self {
            rule_name,
            rule_type,
            rule_definition: Some(definition_from_form(form)?),
            severity,
        })
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Filter bar of the rules page: a single jurisdiction selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleFilters {
    pub jurisdiction_id: Option<JurisdictionId>,
}

impl FilterSet for RuleFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new().id("jurisdiction_id", self.jurisdiction_id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use complyform_core::{Icon, Tone};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn rule_json() -> &'static str {
        r#"{
            "id": "6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01",
            "jurisdiction_id": "0b8d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b02",
            "rule_name": "VSBE goal",
            "rule_type": "VSBE",
            "rule_definition": {"threshold": "3.0", "description": "Veteran-owned", "source": "COMAR"},
            "severity": "WARNING"
        }"#
    }

    #[test]
    fn test_deserialize_rule_keeps_extra_definition_keys() {
        let rule: ComplianceRule = serde_json::from_str(rule_json()).unwrap();
        assert_eq!(rule.rule_definition.threshold, Some(3.0));
        assert_eq!(
            rule.rule_definition.extra.get("source"),
            Some(&Value::String("COMAR".to_string()))
        );
        assert_eq!(rule.severity().tone(), Tone::Yellow);
        assert_eq!(rule.severity().icon(), Icon::Triangle);
        assert_eq!(rule.rule_type.tone(), Tone::Purple);
    }

    #[test]
    fn test_missing_severity_defaults_to_error() {
        let rule: ComplianceRule = serde_json::from_str(
            r#"{
                "id": "6f1f3c1e-6a57-4c38-9d55-0d6f6d1c1a01",
                "jurisdiction_id": "0b8d8a52-5d8b-4d5a-9a0c-5a7f2f0c1b02",
                "rule_name": "Local hire",
                "rule_type": "LOCAL_PREF",
                "rule_definition": {},
                "severity": null
            }"#,
        )
        .unwrap();
        assert_eq!(rule.severity(), Severity::Error);
    }

    #[test]
    fn test_blank_form_defaults_severity_to_error() {
        let blank = RuleDraft::blank(&Vec::new());
        assert_eq!(blank.get("severity"), "ERROR");
        assert_eq!(blank.get("rule_type"), "MBE");
    }

    #[test]
    fn test_draft_from_form() {
        let jurisdiction = Uuid::new_v4();
        let form = RuleDraft::blank(&Vec::new())
            .with("jurisdiction_id", jurisdiction.to_string())
            .with("rule_name", "MBE goal")
            .with("threshold", "25")
            .with("description", "Minority participation");
        let draft = RuleDraft::from_form(&form).unwrap();
        assert_eq!(draft.jurisdiction_id, jurisdiction);
        assert_eq!(draft.severity, Severity::Error);
        assert_eq!(draft.rule_definition.threshold, Some(25.0));

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["rule_type"], "MBE");
        assert_eq!(json["rule_definition"]["threshold"], 25.0);
    }

    #[test]
    fn test_draft_rejects_out_of_range_threshold() {
        let form = RuleDraft::blank(&Vec::new())
            .with("jurisdiction_id", Uuid::new_v4().to_string())
            .with("rule_name", "MBE goal")
            .with("threshold", "120");
        assert!(RuleDraft::from_form(&form).is_err());
    }

    #[test]
    fn test_patch_skips_absent_fields_and_jurisdiction() {
        let patch = RulePatch {
            severity: Some(Severity::Info),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"severity": "INFO"}));

        let rule: ComplianceRule = serde_json::from_str(rule_json()).unwrap();
        let patch = RulePatch::from_form(&rule.to_form()).unwrap();
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("jurisdiction_id").is_none());
        assert_eq!(json["severity"], "WARNING");
        assert_eq!(json["rule_name"], "VSBE goal");
    }

    #[test]
    fn test_patch_keeps_definition_keys_without_a_field() {
        let rule: ComplianceRule = serde_json::from_str(rule_json()).unwrap();
        let mut form = rule.to_form();
        form.set("severity", "INFO");

        let patch = RulePatch::from_form(&form).unwrap();
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["severity"], "INFO");
        assert_eq!(
            json["rule_definition"],
            serde_json::json!({"threshold": 3.0, "description": "Veteran-owned", "source": "COMAR"})
        );
    }

    #[test]
    fn test_fresh_draft_has_no_extra_definition_keys() {
        let form = RuleDraft::blank(&Vec::new())
            .with("jurisdiction_id", Uuid::new_v4().to_string())
            .with("rule_name", "MBE goal");
        let draft = RuleDraft::from_form(&form).unwrap();
        assert!(draft.rule_definition.extra.is_empty());
    }

    #[test]
    fn test_filters() {
        assert!(RuleFilters::default().is_empty());
        let id = Uuid::new_v4();
        let q = RuleFilters {
            jurisdiction_id: Some(id),
        }
        .to_query();
        assert_eq!(q.get("jurisdiction_id"), Some(id.to_string().as_str()));
    }
}
