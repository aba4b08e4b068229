//! Infrastructure layer for assistkit.
//!
//! Contains implementations of the ports defined in `assistkit-core`:
//! the file-backed state inspector, local filesystem access, SHA-256 hashing,
//! configuration loading, and OpenAI / Azure OpenAI chat clients with Azure
//! identity token acquisition.

pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod inspector;
pub mod llm;
