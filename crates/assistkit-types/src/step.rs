//! Results returned by one step of an assistant agent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The step finished; the agent may advance.
    Complete,
    /// The step needs more input; `ai_message` is sent to the user.
    Incomplete { ai_message: String },
    /// The step could not proceed; `error_message` is shown to the user.
    IncompleteError { error_message: String },
}

/// Outcome of a step plus debug data the host may surface in an inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    #[serde(default)]
    pub debug: Map<String, Value>,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl StepResult {
    pub fn complete() -> Self {
        Self { debug: Map::new(), outcome: StepOutcome::Complete }
    }

    pub fn incomplete(ai_message: impl Into<String>) -> Self {
        Self {
            debug: Map::new(),
            outcome: StepOutcome::Incomplete { ai_message: ai_message.into() },
        }
    }

    pub fn error(error_message: impl Into<String>) -> Self {
        Self {
            debug: Map::new(),
            outcome: StepOutcome::IncompleteError { error_message: error_message.into() },
        }
    }

    pub fn with_debug(mut self, key: impl Into<String>, value: Value) -> Self {
        self.debug.insert(key.into(), value);
        self
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, StepOutcome::Complete)
    }

    /// Message to show the user, if the step produced one.
    pub fn user_message(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Complete => None,
            StepOutcome::Incomplete { ai_message } => Some(ai_message),
            StepOutcome::IncompleteError { error_message } => Some(error_message),
        }
    }
}
