//! ComplyForm
//!
//! Desktop client for bid compliance: opportunities, bids, subcontractor
//! networks, compliance rules and outreach.
//!
//! This is the main entry point for the Dioxus Desktop application.

use anyhow::Context;
use complyform_client::Settings;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    // RUST_LOG wins over the DEBUG flag
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║   ComplyForm v{:<44}║", env!("CARGO_PKG_VERSION"));
    println!("║   Bid compliance for public construction work             ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    tracing::debug!(
        organization = ?settings.organization_id,
        timeout_secs = settings.timeout.as_secs(),
        "Settings loaded"
    );

    complyform_ui::launch(settings).context("Failed to start the desktop client")?;
    Ok(())
}
