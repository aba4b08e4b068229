//! LLM CLI commands.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use assistkit_core::llm::ChatCompletionClient;
use assistkit_infra::llm::{ClientOptions, DEFAULT_API_VERSION, test_connection};

use crate::state::AppState;

#[derive(Subcommand)]
pub enum LlmCommand {
    /// Send a minimal completion to verify the configured service.
    Test {
        /// Azure OpenAI REST API version.
        #[arg(long, default_value = DEFAULT_API_VERSION)]
        api_version: String,
    },
}

pub async fn handle_llm_command(cmd: LlmCommand, state: &AppState, json: bool, quiet: bool) -> Result<()> {
    match cmd {
        LlmCommand::Test { api_version } => llm_test(state, api_version, json, quiet).await,
    }
}

async fn llm_test(state: &AppState, api_version: String, json: bool, quiet: bool) -> Result<()> {
    let options = ClientOptions { api_version, ..ClientOptions::default() };
    let llm = state.llm_config(options)?;
    let client = llm.new_client().context("failed to create LLM client")?;

    if !json && !quiet {
        println!();
        println!(
            "  Testing {} with model {}...",
            style(state.config.service_config.service_type_display_name()).cyan(),
            style(&llm.openai_model).cyan()
        );
    }

    let started = Instant::now();
    let response = test_connection(&client, &llm.openai_model)
        .await
        .with_context(|| format!("connection test against {} failed", client.url()))?;
    let latency_ms = started.elapsed().as_millis() as u64;

    tracing::info!(provider = client.name(), latency_ms, "connection test succeeded");

    if json {
        let out = serde_json::json!({
            "provider": client.name(),
            "model": response.model,
            "latency_ms": latency_ms,
            "input_tokens": response.usage.input_tokens,
            "output_tokens": response.usage.output_tokens,
            "reply": response.content,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "  {} {} responded in {latency_ms}ms ({} in / {} out tokens)",
            style("✓").green().bold(),
            response.model,
            response.usage.input_tokens,
            response.usage.output_tokens
        );
        if !quiet {
            println!();
        }
    }
    Ok(())
}
