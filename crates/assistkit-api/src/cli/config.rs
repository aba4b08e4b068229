//! Configuration CLI commands: show, validate, schema.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use assistkit_infra::config::{CONFIG_FILE_NAME, read_assistant_config};
use assistkit_types::config::AssistantConfigModel;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked.
    Show,

    /// Strictly parse and validate a configuration file.
    Validate {
        /// File to validate (defaults to config.toml in the data directory).
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print the JSON Schema used to render configuration forms.
    Schema,
}

pub async fn handle_config_command(cmd: ConfigCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        ConfigCommand::Show => config_show(state, json),
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(|| state.data_dir.join(CONFIG_FILE_NAME));
            config_validate(&path, json).await
        }
        ConfigCommand::Schema => {
            println!("{}", serde_json::to_string_pretty(&AssistantConfigModel::json_schema())?);
            Ok(())
        }
    }
}

fn config_show(state: &AppState, json: bool) -> Result<()> {
    let masked = state.config.masked();

    if json {
        println!("{}", serde_json::to_string_pretty(&masked)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} ({})",
        style("Service:").bold(),
        style(masked.service_config.service_type_display_name()).cyan(),
        style(state.data_dir.join(CONFIG_FILE_NAME).display()).dim()
    );
    println!();
    println!("{}", toml::to_string_pretty(&masked).context("failed to render configuration")?);
    Ok(())
}

async fn config_validate(path: &Path, json: bool) -> Result<()> {
    let config = validate_file(path).await?;

    if json {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "valid": true,
            "service_type": config.service_config.service_type().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "  {} {} is valid ({})",
            style("✓").green().bold(),
            path.display(),
            config.service_config.service_type_display_name()
        );
    }
    Ok(())
}

/// Parse `path` strictly and check the service fields needed to build a client.
async fn validate_file(path: &Path) -> Result<AssistantConfigModel> {
    let config = read_assistant_config(path)
        .await
        .with_context(|| format!("invalid configuration file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("incomplete configuration in {}", path.display()))?;
    Ok(config)
}
