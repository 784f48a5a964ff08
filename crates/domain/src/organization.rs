//! Organizations
//!
//! An organization is the bidding company. The active organization scopes
//! subcontractor networks, outreach and assessments.

use crate::form::{FieldSpec, FormModel, FormValues, SelectChoice};
use complyform_core::{ComplyError, ComplyResult, Identified, OrganizationId, Validatable};
use serde::{Deserialize, Serialize};

/// A bidding organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
}

impl Identified for Organization {
    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Select options keyed by organization id
pub fn organization_choices(organizations: &[Organization]) -> Vec<SelectChoice> {
    organizations
        .iter()
        .map(|o| SelectChoice::new(o.id.to_string(), o.name.clone()))
        .collect()
}

/// Create payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationDraft {
    pub name: String,
}

impl Validatable for OrganizationDraft {
    fn validate(&self) -> ComplyResult<()> {
        if self.name.trim().is_empty() {
            return Err(ComplyError::field("Name", "is required"));
        }
        Ok(())
    }
}

impl FormModel for OrganizationDraft {
    fn fields(_ctx: &()) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Organization name")
                .required()
                .with_placeholder("Acme Construction LLC"),
        ]
    }

    fn from_form(form: &FormValues) -> ComplyResult<Self> {
        let draft = Self {
            name: form.required_text("name", "Organization name")?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_draft_from_form_trims_name() {
        let form = FormValues::new().with("name", "  Acme  ");
        let draft = OrganizationDraft::from_form(&form).unwrap();
        assert_eq!(draft.name, "Acme");
    }

    #[test]
    fn test_draft_requires_name() {
        let err = OrganizationDraft::from_form(&FormValues::new()).unwrap_err();
        assert!(err.is_validation());
    }
}
