//! Form schema shared by every create/edit form
//!
//! A form is described by a list of [`FieldSpec`]s and edited as a flat map of
//! raw strings ([`FormValues`]). Payload types implement [`FormModel`] to
//! describe their fields and to build themselves from submitted values, so
//! one form component can render and submit any entity.

use complyform_core::{ComplyError, ComplyResult};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Field Definitions
// ============================================================================

/// One option of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectChoice {
    /// Raw value stored in the form
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl SelectChoice {
    /// Create a new choice
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Kind of input widget for a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
    /// Numeric input with optional bounds
    Number { min: Option<f64>, max: Option<f64> },
    /// Dropdown selection
    Select(Vec<SelectChoice>),
    /// Boolean checkbox
    Checkbox,
}

/// Definition of one form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Key in [`FormValues`]
    pub key: &'static str,
    /// Label shown above the input
    pub label: &'static str,
    /// Widget kind
    pub kind: FieldKind,
    /// Whether an empty value is rejected
    pub required: bool,
    /// Placeholder text
    pub placeholder: Option<&'static str>,
    /// Initial value for a fresh form
    pub default: String,
}

impl FieldSpec {
    /// Single-line text field
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            required: false,
            placeholder: None,
            default: String::new(),
        }
    }

    /// Multi-line text field
    pub fn text_area(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::TextArea,
            ..Self::text(key, label)
        }
    }

    /// Numeric field
    pub fn number(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Number {
                min: None,
                max: None,
            },
            ..Self::text(key, label)
        }
    }

    /// Percentage field bounded to 0..=100
    pub fn percent(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Number {
                min: Some(0.0),
                max: Some(100.0),
            },
            ..Self::text(key, label)
        }
    }

    /// Dropdown field
    pub fn select(key: &'static str, label: &'static str, choices: Vec<SelectChoice>) -> Self {
        Self {
            kind: FieldKind::Select(choices),
            ..Self::text(key, label)
        }
    }

    /// Checkbox field
    pub fn checkbox(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Checkbox,
            default: "false".to_string(),
            ..Self::text(key, label)
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the placeholder
    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the initial value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = value.into();
        self
    }
}

// ============================================================================
// Form Values
// ============================================================================

/// Raw string values of a form, keyed by [`FieldSpec::key`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial values for the given fields
    pub fn defaults_for(fields: &[FieldSpec]) -> Self {
        let mut values = Self::new();
        for field in fields {
            values.set(field.key, field.default.clone());
        }
        values
    }

    /// Builder-style setter
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a raw value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Raw value (empty string when unset)
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, `None` when blank
    pub fn text(&self, key: &str) -> Option<String> {
        let value = self.get(key).trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Trimmed value that must not be blank
    pub fn required_text(&self, key: &str, label: &str) -> ComplyResult<String> {
        self.text(key)
            .ok_or_else(|| ComplyError::field(label, "is required"))
    }

    /// Optional number; a non-numeric value is a validation error
    pub fn number(&self, key: &str, label: &str) -> ComplyResult<Option<f64>> {
        match self.text(key) {
            None => Ok(None),
            Some(raw) => parse_number(&raw)
                .map(Some)
                .ok_or_else(|| ComplyError::field(label, "must be a number")),
        }
    }

    /// Number that must be present
    pub fn required_number(&self, key: &str, label: &str) -> ComplyResult<f64> {
        self.number(key, label)?
            .ok_or_else(|| ComplyError::field(label, "is required"))
    }

    /// Optional identifier
    pub fn uuid(&self, key: &str, label: &str) -> ComplyResult<Option<Uuid>> {
        match self.text(key) {
            None => Ok(None),
            Some(raw) => Uuid::parse_str(&raw)
                .map(Some)
                .map_err(|_| ComplyError::field(label, "is not a valid selection")),
        }
    }

    /// Identifier that must be present
    pub fn required_uuid(&self, key: &str, label: &str) -> ComplyResult<Uuid> {
        self.uuid(key, label)?
            .ok_or_else(|| ComplyError::field(label, "is required"))
    }

    /// Checkbox state
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key).trim(), "true" | "on" | "1")
    }

    /// Check every required field is filled
    pub fn check_required(&self, fields: &[FieldSpec]) -> ComplyResult<()> {
        for field in fields.iter().filter(|f| f.required) {
            if self.text(field.key).is_none() {
                return Err(ComplyError::field(field.label, "is required"));
            }
        }
        Ok(())
    }
}

/// Parse a user-entered number; blank, non-numeric and non-finite input is `None`
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a number the way a user would type it (`100000`, `12.5`)
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ============================================================================
// Form Model Trait
// ============================================================================

/// Payloads that can be described as a form and built from its values
///
/// `C` is the reference data needed to populate select fields (for example
/// the jurisdiction list).
pub trait FormModel<C = ()>: Sized {
    /// Fields of the form
    fn fields(ctx: &C) -> Vec<FieldSpec>;

    /// Build the payload from submitted values
    fn from_form(form: &FormValues) -> ComplyResult<Self>;

    /// Initial values of a fresh form
    fn blank(ctx: &C) -> FormValues {
        FormValues::defaults_for(&Self::fields(ctx))
    }
}

/// Payload type for pages that do not offer the operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnly;

impl<C> FormModel<C> for ReadOnly {
    fn fields(_ctx: &C) -> Vec<FieldSpec> {
        Vec::new()
    }

    fn from_form(_form: &FormValues) -> ComplyResult<Self> {
        Err(ComplyError::validation("This list is read-only"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("100000"), Some(100000.0));
        assert_eq!(parse_number(" 1,250.5 "), Some(1250.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100000.0), "100000");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn test_form_values_accessors() {
        let form = FormValues::new()
            .with("name", "  Acme  ")
            .with("threshold", "12.5")
            .with("bad", "twelve")
            .with("flag", "true");

        assert_eq!(form.text("name"), Some("Acme".to_string()));
        assert_eq!(form.text("missing"), None);
        assert_eq!(form.number("threshold", "Threshold").unwrap(), Some(12.5));
        assert!(form.number("bad", "Bad").is_err());
        assert!(form.flag("flag"));
        assert!(!form.flag("missing"));
        assert_eq!(
            form.required_text("missing", "Missing").unwrap_err().to_string(),
            "Missing: is required"
        );
    }

    #[test]
    fn test_defaults_and_required_check() {
        let fields = vec![
            FieldSpec::text("name", "Name").required(),
            FieldSpec::checkbox("active", "Active"),
            FieldSpec::select("severity", "Severity", vec![]).with_default("ERROR"),
        ];
        let form = FormValues::defaults_for(&fields);
        assert_eq!(form.get("active"), "false");
        assert_eq!(form.get("severity"), "ERROR");
        assert!(form.check_required(&fields).is_err());

        let form = form.with("name", "Acme");
        assert!(form.check_required(&fields).is_ok());
    }

    #[test]
    fn test_read_only_rejects_submission() {
        assert!(<ReadOnly as FormModel>::fields(&()).is_empty());
        assert!(<ReadOnly as FormModel>::from_form(&FormValues::new()).is_err());
    }
}
