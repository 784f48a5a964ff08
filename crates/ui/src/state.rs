//! Application State for ComplyForm
//!
//! Navigation and the active organization live in one global signal. Page
//! data is not cached here: every page owns its own state and reloads on
//! mount.

use complyform_core::{BidId, OpportunityId, OrganizationId};
use complyform_domain::Organization;
use dioxus::prelude::*;

// ============================================================================
// Page Navigation
// ============================================================================

/// Application pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Dashboard with connection info
    #[default]
    Home,
    Opportunities,
    /// Pre-bid assessment of one opportunity
    Assessment(OpportunityId),
    Bids,
    CreateBid,
    BidDetail(BidId),
    Organizations,
    /// Network of the active organization
    Subcontractors,
    Directory,
    ComplianceRules,
    Outreach,
}

impl Page {
    /// Pages listed in the sidebar, in order
    pub const NAVIGATION: [Page; 9] = [
        Page::Home,
        Page::Opportunities,
        Page::Bids,
        Page::CreateBid,
        Page::Organizations,
        Page::Subcontractors,
        Page::Directory,
        Page::ComplianceRules,
        Page::Outreach,
    ];

    /// Get the display name for this page
    pub fn display_name(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Opportunities => "Opportunities",
            Page::Assessment(_) => "Pre-bid Assessment",
            Page::Bids => "Bids",
            Page::CreateBid => "Create Bid",
            Page::BidDetail(_) => "Bid Detail",
            Page::Organizations => "Organizations",
            Page::Subcontractors => "Subcontractors",
            Page::Directory => "Directory",
            Page::ComplianceRules => "Compliance Rules",
            Page::Outreach => "Outreach",
        }
    }

    /// Get the icon for this page
    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "🏠",
            Page::Opportunities => "📋",
            Page::Assessment(_) => "📊",
            Page::Bids | Page::BidDetail(_) => "📁",
            Page::CreateBid => "➕",
            Page::Organizations => "🏢",
            Page::Subcontractors => "👷",
            Page::Directory => "📇",
            Page::ComplianceRules => "🛡",
            Page::Outreach => "✉",
        }
    }

    /// Pages scoped to the active organization
    pub fn requires_organization(&self) -> bool {
        matches!(self, Page::Subcontractors | Page::Outreach)
    }

    /// Sidebar entry highlighted while this page is shown
    pub fn nav_parent(&self) -> Page {
        match self {
            Page::Assessment(_) => Page::Opportunities,
            Page::BidDetail(_) => Page::Bids,
            other => *other,
        }
    }
}

// ============================================================================
// Active Organization
// ============================================================================

/// The organization subcontractors, outreach and assessments are scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveOrganization {
    pub id: OrganizationId,
    /// Name, when known
    pub name: Option<String>,
}

impl ActiveOrganization {
    /// Name for display, falling back to the id
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

impl From<&Organization> for ActiveOrganization {
    fn from(organization: &Organization) -> Self {
        Self {
            id: organization.id,
            name: Some(organization.name.clone()),
        }
    }
}

// ============================================================================
// App State
// ============================================================================

/// Global application state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub page: Page,
    pub organization: Option<ActiveOrganization>,
    pub sidebar_collapsed: bool,
}

impl AppState {
    /// Create a new app state
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a page
    pub fn navigate(&mut self, page: Page) {
        tracing::debug!(page = page.display_name(), "Navigate");
        self.page = page;
    }

    /// Make an organization the active one
    pub fn select_organization(&mut self, organization: ActiveOrganization) {
        tracing::info!(organization = %organization.id, "Active organization changed");
        self.organization = Some(organization);
    }

    /// Forget the active organization
    pub fn clear_organization(&mut self) {
        self.organization = None;
    }

    /// Id of the active organization
    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.organization.as_ref().map(|o| o.id)
    }

    /// Toggle sidebar collapsed state
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }
}

/// Global app state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Seed the state at startup
pub fn init_app_state(organization_id: Option<OrganizationId>) {
    let mut state = APP_STATE.write();
    *state = AppState::new();
    if let Some(id) = organization_id {
        state.organization = Some(ActiveOrganization { id, name: None });
    }
}

/// Navigate from an event handler
pub fn navigate(page: Page) {
    APP_STATE.write().navigate(page);
}

/// Current page
pub fn use_current_page() -> Page {
    APP_STATE.read().page
}

/// Active organization id
pub fn use_organization_id() -> Option<OrganizationId> {
    APP_STATE.read().organization_id()
}

// ============================================================================
// Tests
// ============================================================================
