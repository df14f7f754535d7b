//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Campaign pipeline - multi-stage campaign content generation
#[derive(Parser)]
#[command(
    name = "campaign",
    about = "Multi-stage campaign content generation pipeline",
    version,
    after_help = "Logs are written to: ~/.local/share/campaign-pipeline/logs/campaign.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline for one campaign
    Run {
        /// What the campaign should achieve
        #[arg(long)]
        goal: String,

        /// Who the campaign targets
        #[arg(long)]
        audience: String,

        /// Budget in USD
        #[arg(long)]
        budget: f64,

        /// Path to a YAML brand context file
        #[arg(long)]
        brand: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "campaign", "run", "--goal", "grow signups", "--audience", "runners", "--budget", "25000",
        ])
        .unwrap();
        match cli.command {
            Command::Run {
                goal,
                audience,
                budget,
                brand,
            } => {
                assert_eq!(goal, "grow signups");
                assert_eq!(audience, "runners");
                assert!((budget - 25_000.0).abs() < f64::EPSILON);
                assert!(brand.is_none());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["campaign", "--verbose", "--config", "custom.yml", "config"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
    }

    #[test]
    fn test_run_requires_budget() {
        let result = Cli::try_parse_from(["campaign", "run", "--goal", "g", "--audience", "a"]);
        assert!(result.is_err());
    }
}
