//! Filter sets and query construction
//!
//! Filter bars hold raw user input. When a search is issued only the fields
//! the user actually set become query parameters: blank text is dropped,
//! numbers are parsed and dropped when invalid, booleans are only sent once
//! chosen.

use crate::form::{format_number, parse_number};
use uuid::Uuid;

/// Ordered query parameters for a search request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text parameter unless the input is blank
    pub fn text(mut self, key: &str, raw: &str) -> Self {
        let value = raw.trim();
        if !value.is_empty() {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Add a numeric parameter when the input parses to a finite number
    pub fn number(mut self, key: &str, raw: &str) -> Self {
        if let Some(n) = parse_number(raw) {
            self.0.push((key.to_string(), format_number(n)));
        }
        self
    }

    /// Add a whole-number parameter when the input parses as an integer
    pub fn integer(mut self, key: &str, raw: &str) -> Self {
        if let Ok(n) = raw.trim().parse::<i64>() {
            self.0.push((key.to_string(), n.to_string()));
        }
        self
    }

    /// Add a boolean parameter once it has been chosen
    pub fn flag(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.0.push((key.to_string(), v.to_string()));
        }
        self
    }

    /// Add an identifier parameter when one is selected
    pub fn id(mut self, key: &str, value: Option<Uuid>) -> Self {
        if let Some(id) = value {
            self.0.push((key.to_string(), id.to_string()));
        }
        self
    }

    /// Add one parameter per non-blank value (`key=a&key=b`)
    pub fn each<'a>(mut self, key: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        for value in values {
            self = self.text(key, value);
        }
        self
    }

    /// Check whether no parameter was produced
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the first parameter with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a parameter with this key is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Borrow the parameter pairs
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// A set of filter inputs for one list page
pub trait FilterSet: Clone + Default + PartialEq + Send + Sync + 'static {
    /// Query parameters for the fields the user set
    fn to_query(&self) -> QueryParams;

    /// Check whether the filters are all at their defaults
    fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

/// Filter set for pages without filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilters;

impl FilterSet for NoFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
    }
}

/// Split a free-form code list (`"236220, 238210 541330"`)
pub fn split_codes(raw: &str) -> Vec<&str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_values_are_omitted() {
        let q = QueryParams::new()
            .text("jurisdiction", "   ")
            .number("min_value", "")
            .integer("days", "")
            .flag("is_active", None)
            .id("jurisdiction_id", None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_invalid_numbers_are_omitted() {
        let q = QueryParams::new()
            .number("min_value", "lots")
            .integer("days_until_due", "7.5");
        assert!(q.is_empty());
    }

    #[test]
    fn test_values_are_kept_exactly() {
        let q = QueryParams::new()
            .text("jurisdiction", "MD")
            .number("min_value", "100000")
            .number("max_value", "2500000.50")
            .flag("is_active", Some(false));
        assert_eq!(q.get("jurisdiction"), Some("MD"));
        assert_eq!(q.get("min_value"), Some("100000"));
        assert_eq!(q.get("max_value"), Some("2500000.5"));
        assert_eq!(q.get("is_active"), Some("false"));
    }

    #[test]
    fn test_repeated_parameters() {
        let q = QueryParams::new().each("naics_codes", split_codes("236220, 238210  541330"));
        let values: Vec<&str> = q.pairs().iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["236220", "238210", "541330"]);
    }

    #[test]
    fn test_no_filters_is_empty() {
        assert!(NoFilters.is_empty());
    }
}
