//! Shared domain types for assistkit.
//!
//! This crate contains the leaf data declarations used across the workspace:
//! conversation identity, the inspector state model, assistant and service
//! configuration, guided-conversation definitions, LLM request types, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, schemars.

pub mod config;
pub mod conversation;
pub mod error;
pub mod guided;
pub mod inspector;
pub mod llm;
pub mod secret;
pub mod step;
