//! Guided-conversation definitions.
//!
//! A guided conversation walks the user through gathering information for an
//! artifact. These types describe one such conversation as configured by an
//! operator; the conversation engine that consumes them lives elsewhere.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Unit a resource constraint is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceConstraintUnit {
    Seconds,
    Minutes,
    Turns,
}

impl fmt::Display for ResourceConstraintUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceConstraintUnit::Seconds => write!(f, "seconds"),
            ResourceConstraintUnit::Minutes => write!(f, "minutes"),
            ResourceConstraintUnit::Turns => write!(f, "turns"),
        }
    }
}

/// Whether the conversation must use exactly, or at most, the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceConstraintMode {
    Exact,
    Maximum,
}

impl fmt::Display for ResourceConstraintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceConstraintMode::Exact => write!(f, "exact"),
            ResourceConstraintMode::Maximum => write!(f, "maximum"),
        }
    }
}

/// How a guided conversation is constrained. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceConstraintDefinition {
    /// The quantity of the resource constraint.
    #[schemars(title = "Quantity")]
    pub quantity: u32,
    /// Unit of the resource constraint.
    #[schemars(title = "Unit")]
    pub unit: ResourceConstraintUnit,
    /// Mode of the resource constraint.
    #[schemars(title = "Mode")]
    pub mode: ResourceConstraintMode,
}

impl fmt::Display for ResourceConstraintDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.mode, self.quantity, self.unit)
    }
}

/// Operator-authored description of one guided conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GuidedConversationDefinition {
    /// The do's and don'ts that the agent should follow during the conversation.
    #[schemars(title = "Rules")]
    pub rules: Vec<String>,

    /// (optional) Defines the steps of the conversation in natural language.
    #[serde(default)]
    #[schemars(title = "Conversation flow")]
    pub conversation_flow: String,

    /// (optional) Any additional information or the circumstances the agent
    /// is in that it should be aware of.
    #[serde(default)]
    #[schemars(title = "Context")]
    pub context: String,

    /// Defines how the guided conversation should be constrained.
    #[schemars(title = "Resource constraint")]
    pub resource_constraint: ResourceConstraintDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_parses_with_optional_fields_missing() {
        let json = r#"{
            "rules": ["Do not ask for a phone number"],
            "resource_constraint": {"quantity": 10, "unit": "turns", "mode": "maximum"}
        }"#;
        let def: GuidedConversationDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.rules.len(), 1);
        assert!(def.conversation_flow.is_empty());
        assert!(def.context.is_empty());
        assert_eq!(def.resource_constraint.unit, ResourceConstraintUnit::Turns);
        assert_eq!(def.resource_constraint.to_string(), "maximum 10 turns");
    }

    #[test]
    fn test_definition_requires_resource_constraint() {
        let json = r#"{"rules": []}"#;
        assert!(serde_json::from_str::<GuidedConversationDefinition>(json).is_err());
    }

    #[test]
    fn test_resource_constraint_requires_every_field() {
        let json = r#"{"quantity": 5, "unit": "minutes"}"#;
        assert!(serde_json::from_str::<ResourceConstraintDefinition>(json).is_err());
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let json = r#"{"quantity": 5, "unit": "hours", "mode": "exact"}"#;
        assert!(serde_json::from_str::<ResourceConstraintDefinition>(json).is_err());
    }
}
