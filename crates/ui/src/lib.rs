//! # ComplyForm UI
//!
//! Dioxus desktop client for bid compliance work: opportunities, bids,
//! organizations and their subcontractor networks, the subcontractor
//! directory, jurisdiction compliance rules, outreach and pre-bid
//! assessments.
//!
//! Every list page is a [`CrudSource`](complyform_controller::CrudSource)
//! bound to the view through [`hooks::use_crud`]; the API client and
//! settings reach pages as context provided at launch.

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod hooks;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::App;
pub use state::{APP_STATE, ActiveOrganization, AppState, Page, init_app_state, navigate};

use complyform_client::{ApiClient, ClientResult, Settings};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "ComplyForm";

/// Application display title
pub const TITLE: &str = "ComplyForm - Bid Compliance";

/// Stylesheet bundled into the window head
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the desktop application
///
/// Fails only when the API address in `settings` cannot be used.
///
/// # Example
///
/// ```rust,ignore
/// let settings = Settings::load()?;
/// complyform_ui::launch(settings)?;
/// ```
pub fn launch(settings: Settings) -> ClientResult<()> {
    let client = ApiClient::from_settings(&settings)?;
    tracing::info!(
        api = %client.base_url(),
        environment = %settings.environment,
        "Starting {} v{}",
        NAME,
        VERSION
    );

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1280.0, 860.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(900.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .with_context(client)
        .with_context(settings)
        .launch(App);

    Ok(())
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert!(TITLE.starts_with(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains(".badge"));
        assert!(STYLES.contains(".banner-error"));
    }
}
