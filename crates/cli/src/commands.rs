//! Command implementations

use crate::cli::{AssessArgs, Cli, Commands, EnvAction, OpportunityArgs, RuleAction};
use crate::output::{field, heading, paint, success, truncate};
use anyhow::{Context, anyhow};
use chrono::Utc;
use colored::Colorize;
use complyform_client::{
    ApiClient, ClientResult, Settings, read_environment, switch_environment,
};
use complyform_controller::assessment::build_preview;
use complyform_controller::{CrudSource, OpportunitySource, RuleSource};
use complyform_core::{Environment, Identified, OrganizationId, RuleId, Tone};
use complyform_domain::{
    AssessmentPreview, AssessmentReport, AssessmentRequest, ComplianceRule, FilterSet,
    Opportunity, OpportunityFilters, RiskFactor, RuleFilters, due_label, format_currency,
    format_percent,
};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

// ============================================================================
// Dispatch
// ============================================================================

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Env {
            action: EnvAction::Switch { environment, file },
        } => switch_env(&file, environment.into()),
        Commands::Env {
            action: EnvAction::Show,
        } => {
            show_env(&load_settings()?);
            Ok(())
        }
        Commands::Check => check(&load_settings()?).await,
        Commands::Opportunities(args) => {
            let client = connect(&load_settings()?)?;
            opportunities(&client, &args).await
        }
        Commands::Rules {
            action: RuleAction::List { jurisdiction },
        } => {
            let client = connect(&load_settings()?)?;
            list_rules(&client, RuleFilters {
                jurisdiction_id: jurisdiction,
            })
            .await
        }
        Commands::Rules {
            action: RuleAction::Delete { id, yes },
        } => {
            let settings = load_settings()?;
            let prompt = format!("Delete compliance rule {id}?");
            if !yes && !confirm(&prompt, &mut io::stdin().lock(), &mut io::stdout())? {
                println!("Cancelled");
                return Ok(());
            }
            delete_rule(&connect(&settings)?, id).await
        }
        Commands::Assess(args) => {
            let settings = load_settings()?;
            let organization = args.organization.or(settings.organization_id).context(
                "No organization given; pass --organization or set COMPLYFORM_ORGANIZATION_ID",
            )?;
            assess(&connect(&settings)?, organization, args).await
        }
    }
}

fn load_settings() -> anyhow::Result<Settings> {
    Settings::load().context("Failed to load settings")
}

fn connect(settings: &Settings) -> anyhow::Result<ApiClient> {
    tracing::debug!(api = %settings.api_base(), "Connecting");
    ApiClient::from_settings(settings).map_err(|e| anyhow!(e.user_message()))
}

/// Turn an API failure into the message the desktop banner would show
fn api<T>(result: ClientResult<T>) -> anyhow::Result<T> {
    result.map_err(|e| anyhow!(e.user_message()))
}

/// Ask a yes/no question; anything but `y` or `yes` declines
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

// ============================================================================
// Environment
// ============================================================================

fn switch_env(file: &Path, environment: Environment) -> anyhow::Result<()> {
    let previous = read_environment(file)?;
    switch_environment(file, environment)?;
    match previous {
        Some(previous) if previous == environment => {
            success(&format!("Already on {environment}"));
        }
        Some(previous) => {
            success(&format!("Switched {previous} -> {environment}"));
        }
        None => success(&format!("Switched to {environment}")),
    }
    println!("  Restart the application to use the new connection.");
    Ok(())
}

fn show_env(settings: &Settings) {
    let tone = if settings.environment.is_production() {
        Tone::Red
    } else {
        Tone::Green
    };

    heading("ComplyForm settings");
    field("Environment", paint(settings.environment.as_str(), tone).bold());
    field("API", settings.api_base());
    field("Timeout", format!("{}s", settings.timeout.as_secs()));
    field("Debug", settings.debug);
    field(
        "Organization",
        settings
            .organization_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );

    match settings.database_profile() {
        Some(profile) => {
            field("Database", profile.masked_url);
            field("Connection", profile.kind.display_name());
            field("Best for", profile.kind.best_for());
        }
        None => field("Database", "not configured".dimmed()),
    }
}

// ============================================================================
// Connectivity
// ============================================================================

async fn check(settings: &Settings) -> anyhow::Result<()> {
    let client = connect(settings)?;
    let started = Instant::now();
    let jurisdictions = api(client.list_jurisdictions().await)
        .with_context(|| format!("Backend at {} is not reachable", client.base_url()))?;

    success(&format!(
        "Backend reachable at {} ({} ms, {} jurisdictions)",
        client.base_url(),
        started.elapsed().as_millis(),
        jurisdictions.len()
    ));
    Ok(())
}

// ============================================================================
// Opportunities
// ============================================================================

/// List when no field is set, search otherwise
pub async fn fetch_opportunities(
    client: &ApiClient,
    filters: &OpportunityFilters,
) -> ClientResult<Vec<Opportunity>> {
    let source = OpportunitySource::new(client.clone());
    if filters.is_empty() {
        source.list().await
    } else {
        source.search(filters).await
    }
}

async fn opportunities(client: &ApiClient, args: &OpportunityArgs) -> anyhow::Result<()> {
    let opportunities = api(fetch_opportunities(client, &args.filters()).await)?;
    if opportunities.is_empty() {
        println!("No opportunities found");
        return Ok(());
    }

    let now = Utc::now();
    println!(
        "{:<42} {:<5} {:>16} {:>6} {:>6}  {}",
        "Title".bold(),
        "Jur".bold(),
        "Value".bold(),
        "MBE".bold(),
        "VSBE".bold(),
        "Due".bold()
    );
    for opp in &opportunities {
        let days = opp.days_until_due(now);
        println!(
            "{:<42} {:<5} {:>16} {:>6} {:>6}  {}",
            truncate(&opp.title, 42),
            opp.jurisdiction_code().unwrap_or("-"),
            opp.total_value.map(format_currency).unwrap_or_else(|| "-".to_string()),
            format_percent(opp.mbe_goal_or_zero()),
            format_percent(opp.vsbe_goal_or_zero()),
            paint(&due_label(days), opp.urgency(now).tone())
        );
    }
    println!("\n{} opportunities", opportunities.len());
    Ok(())
}

// ============================================================================
// Compliance Rules
// ============================================================================

/// All rules, or the rules of one jurisdiction
pub async fn fetch_rules(
    client: &ApiClient,
    filters: &RuleFilters,
) -> ClientResult<Vec<ComplianceRule>> {
    RuleSource::new(client.clone()).search(filters).await
}

async fn list_rules(client: &ApiClient, filters: RuleFilters) -> anyhow::Result<()> {
    let rules = api(fetch_rules(client, &filters).await)?;
    if rules.is_empty() {
        println!("No compliance rules found");
        return Ok(());
    }

    for rule in &rules {
        let severity = rule.severity();
        let threshold = rule
            .rule_definition
            .threshold
            .map(format_percent)
            .unwrap_or_else(|| "-".to_string());
        let jurisdiction = rule
            .jurisdiction
            .as_ref()
            .map(|j| j.code.as_str())
            .unwrap_or("-");

        println!(
            "{}  {:<32} {:<6} {:<9} {:>6}  {}",
            rule.id.to_string().dimmed(),
            truncate(&rule.rule_name, 32),
            rule.rule_type.display_name(),
            paint(severity.display_name(), severity.tone()),
            threshold,
            jurisdiction
        );
    }
    println!("\n{} rules", rules.len());
    Ok(())
}

async fn delete_rule(client: &ApiClient, id: RuleId) -> anyhow::Result<()> {
    api(client.delete_compliance_rule(id).await)?;
    tracing::info!(%id, "Compliance rule deleted");
    success(&format!("Deleted compliance rule {id}"));
    Ok(())
}

// ============================================================================
// Assessment
// ============================================================================

async fn assess(
    client: &ApiClient,
    organization_id: OrganizationId,
    args: AssessArgs,
) -> anyhow::Result<()> {
    if args.preview {
        let opportunity = api(client.get_opportunity(args.opportunity).await)?;
        let today = Utc::now().date_naive();
        let preview = api(build_preview(client, &opportunity, organization_id, today).await)?;
        print_preview(&opportunity, &preview);
        return Ok(());
    }

    let request = AssessmentRequest {
        organization_id,
        opportunity_id: args.opportunity,
    };
    let report = api(client.assess(&request).await)?;
    print_report(&report);
    Ok(())
}

fn print_factors(factors: &[RiskFactor]) {
    if factors.is_empty() {
        return;
    }
    heading("Risk factors");
    for factor in factors {
        println!("  {}", paint(&factor.message, factor.tone()));
    }
}

fn print_preview(opportunity: &Opportunity, preview: &AssessmentPreview) {
    heading(&format!("Preview: {}", opportunity.label()));
    field("Risk score", format!("{}/100", preview.risk_score));
    field(
        "Recommendation",
        paint(preview.recommendation.display_name(), preview.recommendation.tone()).bold(),
    );
    field("MBE gap", format_percent(preview.mbe_gap_percentage));
    field("VSBE gap", format_percent(preview.vsbe_gap_percentage));
    field("Available", preview.available_subcontractors_count);
    field(
        "Network",
        format!(
            "{} total, {} MBE, {} VSBE",
            preview.network.total_count, preview.network.mbe_count, preview.network.vsbe_count
        ),
    );
    print_factors(&preview.factors);
}

fn print_report(report: &AssessmentReport) {
    let title = report
        .opportunity
        .as_ref()
        .map(|o| o.label())
        .unwrap_or_else(|| report.opportunity_id.to_string());

    heading(&format!("Assessment: {title}"));
    field("Risk score", format!("{}/100", report.overall_risk_score));
    field(
        "Recommendation",
        paint(report.recommendation.display_name(), report.recommendation.tone()).bold(),
    );
    field("Reason", &report.recommendation_reason);
    field("MBE gap", format_percent(report.mbe_gap_percentage));
    field("VSBE gap", format_percent(report.vsbe_gap_percentage));
    field("Available", report.available_subcontractors_count);
    if let Some(network) = report.organization_network {
        field(
            "Network",
            format!(
                "{} total, {} MBE, {} VSBE",
                network.total_count, network.mbe_count, network.vsbe_count
            ),
        );
    }
    print_factors(&report.factors());

    if !report.matching_subcontractors.is_empty() {
        heading("Matching subcontractors");
        for entry in &report.matching_subcontractors {
            println!("  {} {}", "•".dimmed(), entry.label());
        }
    }
    success(&format!("Assessment {} stored", report.id));
}

// ============================================================================
// Tests
// ============================================================================
