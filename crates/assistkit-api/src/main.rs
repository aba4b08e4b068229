//! assistkit CLI entry point.
//!
//! Binary name: `assistkit`
//!
//! Parses CLI arguments, initializes tracing and the application state, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = assistkit_observe::init_tracing(cli.log_filter(), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "assistkit", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.data_dir.clone()).await;

    let result = match cli.command {
        Commands::Inspect(args) => cli::inspect::run_inspect(args, &state.data_dir, cli.json, cli.quiet).await,
        Commands::Config { action } => cli::config::handle_config_command(action, &state, cli.json).await,
        Commands::Llm { action } => cli::llm::handle_llm_command(action, &state, cli.json, cli.quiet).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    assistkit_observe::shutdown_tracing();
    result
}
