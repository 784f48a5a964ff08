//! Argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use complyform_client::default_env_file;
use complyform_core::{Environment, JurisdictionId, OpportunityId, OrganizationId, RuleId};
use complyform_domain::OpportunityFilters;
use std::path::PathBuf;

/// Top-level parser for the `complyform-cli` binary
#[derive(Debug, Parser)]
#[command(
    name = "complyform-cli",
    version,
    about = "ComplyForm - bid compliance from the command line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or switch the backend environment
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Check that the backend answers
    Check,

    /// Search opportunities
    Opportunities(OpportunityArgs),

    /// List or delete compliance rules
    Rules {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Run a pre-bid assessment
    Assess(AssessArgs),
}

#[derive(Debug, Subcommand)]
pub enum EnvAction {
    /// Print the active settings
    Show,

    /// Rewrite the ENVIRONMENT line of a .env file
    Switch {
        environment: EnvironmentArg,

        /// File to rewrite
        #[arg(long, default_value_os_t = default_env_file())]
        file: PathBuf,
    },
}

/// Environments accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    Development,
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}

/// Opportunity search fields; unset fields are not sent
#[derive(Debug, Clone, Default, Args)]
pub struct OpportunityArgs {
    /// Jurisdiction code, e.g. MD
    #[arg(long)]
    pub jurisdiction: Option<String>,

    /// NAICS code
    #[arg(long)]
    pub naics: Option<String>,

    #[arg(long)]
    pub min_value: Option<String>,

    #[arg(long)]
    pub max_value: Option<String>,

    /// Only active (true) or inactive (false) opportunities
    #[arg(long)]
    pub active: Option<bool>,

    /// Due within this many days
    #[arg(long)]
    pub days_until_due: Option<String>,
}

impl OpportunityArgs {
    /// Filter set equivalent to the page's filter bar
    pub fn filters(&self) -> OpportunityFilters {
        OpportunityFilters {
            jurisdiction: self.jurisdiction.clone().unwrap_or_default(),
            naics: self.naics.clone().unwrap_or_default(),
            min_value: self.min_value.clone().unwrap_or_default(),
            max_value: self.max_value.clone().unwrap_or_default(),
            is_active: self.active,
            days_until_due: self.days_until_due.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum RuleAction {
    /// List rules, optionally for one jurisdiction
    List {
        #[arg(long)]
        jurisdiction: Option<JurisdictionId>,
    },

    /// Delete a rule
    Delete {
        id: RuleId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct AssessArgs {
    /// Defaults to COMPLYFORM_ORGANIZATION_ID
    #[arg(long)]
    pub organization: Option<OrganizationId>,

    #[arg(long)]
    pub opportunity: OpportunityId,

    /// Compute the local preview instead of storing a server assessment
    #[arg(long)]
    pub preview: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use complyform_domain::FilterSet;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_env_switch() {
        let cli = Cli::try_parse_from(["complyform-cli", "env", "switch", "production"]).unwrap();
        match cli.command {
            Commands::Env {
                action: EnvAction::Switch { environment, file },
            } => {
                assert_eq!(Environment::from(environment), Environment::Production);
                assert_eq!(file, PathBuf::from(".env"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        assert!(Cli::try_parse_from(["complyform-cli", "env", "switch", "staging"]).is_err());
    }

    #[test]
    fn test_opportunity_args_only_send_set_fields() {
        let cli = Cli::try_parse_from([
            "complyform-cli",
            "opportunities",
            "--jurisdiction",
            "MD",
            "--min-value",
            "100000",
        ])
        .unwrap();
        let Commands::Opportunities(args) = cli.command else {
            panic!("expected opportunities");
        };
        let query = args.filters().to_query();
        assert_eq!(query.get("jurisdiction"), Some("MD"));
        assert_eq!(query.get("min_value"), Some("100000"));
        assert_eq!(query.get("naics"), None);
        assert_eq!(query.get("max_value"), None);
        assert_eq!(query.get("days_until_due"), None);
    }

    #[test]
    fn test_rule_delete_needs_valid_id() {
        assert!(Cli::try_parse_from(["complyform-cli", "rules", "delete", "not-an-id"]).is_err());

        let id = uuid::Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["complyform-cli", "rules", "delete", &id, "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Rules {
                action: RuleAction::Delete { yes: true, .. }
            }
        ));
    }
}
