//! CLI command definitions for the `assistkit` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod inspect;
pub mod llm;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Inspect assistant conversation state and manage assistant configuration.
#[derive(Parser)]
#[command(name = "assistkit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml and conversation storage.
    #[arg(long, global = true, env = "ASSISTKIT_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter for the chosen verbosity, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,assistkit=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a conversation state file as a YAML snapshot.
    Inspect(inspect::InspectArgs),

    /// Show, validate, or describe the assistant configuration.
    Config {
        #[command(subcommand)]
        action: config::ConfigCommand,
    },

    /// Exercise the configured LLM service.
    Llm {
        #[command(subcommand)]
        action: llm::LlmCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter_levels() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap();
        assert_eq!(parse(&["assistkit", "config", "show"]).log_filter(), "warn");
        assert_eq!(parse(&["assistkit", "--quiet", "config", "show"]).log_filter(), "error");
        assert_eq!(parse(&["assistkit", "-v", "config", "show"]).log_filter(), "info,assistkit=debug");
        assert_eq!(parse(&["assistkit", "-vv", "config", "show"]).log_filter(), "trace");
    }

    #[test]
    fn test_inspect_file_and_conversation_are_exclusive() {
        let result = Cli::try_parse_from([
            "assistkit",
            "inspect",
            "--file",
            "state.json",
            "--conversation",
            "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b",
            "--assistant",
            "prospector",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_conversation_requires_assistant() {
        let result = Cli::try_parse_from([
            "assistkit",
            "inspect",
            "--conversation",
            "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_requires_a_source() {
        assert!(Cli::try_parse_from(["assistkit", "inspect"]).is_err());
    }
}
