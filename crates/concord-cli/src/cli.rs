//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Concord CLI - Dawid–Skene consensus over reviewer judgments.
#[derive(Debug, Parser)]
#[command(name = "concord")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.concord/config.toml)
    #[arg(short, long, global = true, env = "CONCORD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per item or reviewer)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run consensus and print per-item decisions
    Run(RunArgs),

    /// Run consensus and print the fitted priors and confusion matrices
    Model(ModelArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Where to read reviews from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Review file (JSON array or JSON lines); repeat to merge several
    #[arg(short, long = "reviews")]
    pub reviews: Vec<PathBuf>,

    /// Read reviews from stdin (after any files)
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show items routed to an SME
    #[arg(long)]
    pub escalated_only: bool,
}

/// Arguments for the model command.
#[derive(Debug, Args)]
pub struct ModelArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_files() {
        let cli = Cli::parse_from([
            "concord", "run", "-r", "a.json", "-r", "b.jsonl", "--escalated-only", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.input.reviews.len(), 2);
                assert!(args.escalated_only);
                assert!(!args.input.stdin);
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::parse_from(["concord", "--format", "json", "config", "init", "--force"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["concord"]).is_err());
    }
}
