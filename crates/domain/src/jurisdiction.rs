//! Jurisdictions (reference data for selectors)

use crate::form::SelectChoice;
use complyform_core::{Identified, JurisdictionId};
use serde::{Deserialize, Serialize};

/// A procurement jurisdiction such as a state or county
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub id: JurisdictionId,
    pub code: String,
    pub name: String,
}

impl Jurisdiction {
    /// `MD - Maryland`
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

impl Identified for Jurisdiction {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.display_label()
    }
}

/// Select options keyed by jurisdiction id
pub fn jurisdiction_choices(jurisdictions: &[Jurisdiction]) -> Vec<SelectChoice> {
    jurisdictions
        .iter()
        .map(|j| SelectChoice::new(j.id.to_string(), j.display_label()))
        .collect()
}

/// Look up a jurisdiction by id
pub fn find_jurisdiction(
    jurisdictions: &[Jurisdiction],
    id: JurisdictionId,
) -> Option<&Jurisdiction> {
    jurisdictions.iter().find(|j| j.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn test_choices_use_ids_and_labels() {
        let md = Jurisdiction {
            id: Uuid::new_v4(),
            code: "MD".to_string(),
            name: "Maryland".to_string(),
        };
        let choices = jurisdiction_choices(std::slice::from_ref(&md));
        assert_eq!(choices[0].value, md.id.to_string());
        assert_eq!(choices[0].label, "MD - Maryland");
        assert_eq!(find_jurisdiction(&[md.clone()], md.id), Some(&md));
    }
}
