//! `assistkit inspect` -- render a conversation state file.
//!
//! Wires a [`FileStateInspector`] to either a fixed file (`--file`) or the
//! conversation storage layout under the data directory (`--conversation`
//! with `--assistant`), then prints the snapshot the host UI would show.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args};
use console::style;
use serde_json::json;

use assistkit_core::inspector::InspectorStateProvider;
use assistkit_infra::filesystem::LocalFileSystem;
use assistkit_infra::inspector::FileStateInspector;
use assistkit_types::conversation::{ConversationContext, ConversationId};
use assistkit_types::error::LocateError;
use assistkit_types::inspector::InspectorState;

/// Assistant id used for the throwaway context of `--file` inspections.
const ADHOC_ASSISTANT_ID: &str = "cli";

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "conversation"])))]
pub struct InspectArgs {
    /// State file to render.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Conversation whose state file to render.
    #[arg(long, value_name = "ID", requires = "assistant")]
    pub conversation: Option<ConversationId>,

    /// Assistant that owns the conversation.
    #[arg(long, requires = "conversation")]
    pub assistant: Option<String>,

    /// State file name inside the conversation directory.
    #[arg(long, default_value = "state.json")]
    pub file_name: String,

    /// Inspector display name.
    #[arg(long, default_value = "State")]
    pub name: String,

    /// Inspector description.
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Run an inspection and print the result.
pub async fn run_inspect(args: InspectArgs, data_dir: &Path, json: bool, quiet: bool) -> Result<()> {
    let InspectArgs { file, conversation, assistant, file_name, name, description } = args;

    match (file, conversation, assistant) {
        (Some(path), _, _) => {
            let inspector = FileStateInspector::new(
                name,
                move |_: &ConversationContext| -> Result<PathBuf, LocateError> { Ok(path.clone()) },
            )?
            .with_description(description);
            let context = ConversationContext::new(ADHOC_ASSISTANT_ID, ConversationId::new());
            print_snapshot(&inspector, &context, json, quiet).await
        }
        (None, Some(conversation_id), Some(assistant_id)) => {
            let data_dir = data_dir.to_path_buf();
            let inspector = FileStateInspector::new(
                name,
                move |context: &ConversationContext| -> Result<PathBuf, LocateError> {
                    Ok(LocalFileSystem::conversation_dir(&data_dir, context).join(&file_name))
                },
            )?
            .with_description(description);
            let context = ConversationContext::new(assistant_id, conversation_id);
            print_snapshot(&inspector, &context, json, quiet).await
        }
        _ => bail!("pass either --file, or --conversation together with --assistant"),
    }
}

async fn print_snapshot<P: InspectorStateProvider>(
    inspector: &P,
    context: &ConversationContext,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let state = inspector
        .get(context)
        .await
        .with_context(|| format!("failed to inspect '{}'", inspector.display_name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot_json(inspector, &state))?);
        return Ok(());
    }

    if !quiet {
        println!();
        println!(
            "  {} {}",
            style(inspector.display_name()).cyan().bold(),
            style(short_id(inspector.state_id())).dim()
        );
        if !inspector.description().is_empty() {
            println!("  {}", style(inspector.description()).dim());
        }
        println!();
    }
    println!("{}", state.content().unwrap_or_default());
    Ok(())
}

/// First 12 characters of a state id, or the whole id when shorter.
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(12) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn snapshot_json<P: InspectorStateProvider>(inspector: &P, state: &InspectorState) -> serde_json::Value {
    json!({
        "state_id": inspector.state_id(),
        "display_name": inspector.display_name(),
        "description": inspector.description(),
        "data": state.data,
    })
}
