use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A wrapper that redacts secret values in Debug and Display output.
///
/// Used for every credential field in the configuration models. The value
/// still serializes as a plain string so configuration files round-trip;
/// use [`Redacted::masked`] anywhere the value could be shown to a user.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Redacted(String);

impl Redacted {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Show masked representation: last 4 chars visible.
    pub fn masked(&self) -> String {
        if self.0.len() <= 4 {
            "****".to_string()
        } else {
            let tail: String = self.0.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{tail}")
        }
    }
}

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Redacted(\"***\")")
    }
}

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_debug_hides_value() {
        let secret = Redacted::new("sk-abc123xyz");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("abc123xyz"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_redacted_display_hides_value() {
        let secret = Redacted::new("sk-abc123xyz");
        assert_eq!(secret.to_string(), "***");
    }

    #[test]
    fn test_redacted_expose() {
        let secret = Redacted::new("sk-abc123xyz");
        assert_eq!(secret.expose(), "sk-abc123xyz");
    }

    #[test]
    fn test_redacted_masked() {
        assert_eq!(Redacted::new("sk-abc123xyz").masked(), "****3xyz");
        assert_eq!(Redacted::new("ab").masked(), "****");
    }

    #[test]
    fn test_redacted_serializes_as_plain_string() {
        let secret = Redacted::new("key");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"key\"");
        let parsed: Redacted = serde_json::from_str("\"key\"").unwrap();
        assert_eq!(parsed, secret);
    }
}
