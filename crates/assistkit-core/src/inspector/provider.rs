//! InspectorStateProvider trait definition.
//!
//! This is the whole host-facing boundary of an inspector: a stable identity,
//! a display name, a description, and an on-demand snapshot per conversation.

use assistkit_types::conversation::ConversationContext;
use assistkit_types::error::InspectorError;
use assistkit_types::inspector::InspectorState;

/// Read-only provider of inspector state for a conversation.
///
/// Uses native async fn in traits (RPITIT). Implementations must not hold
/// mutable state between calls; hosts invoke `get` on many providers
/// concurrently and as often as they like.
pub trait InspectorStateProvider: Send + Sync {
    /// Stable identifier the host uses to remember UI placement.
    fn state_id(&self) -> &str;

    fn display_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Build a fresh snapshot of the conversation's state.
    fn get(
        &self,
        context: &ConversationContext,
    ) -> impl std::future::Future<Output = Result<InspectorState, InspectorError>> + Send;
}
