//! Port definitions and pure logic for assistkit.
//!
//! This crate defines the "ports" (traits) that the infrastructure layer
//! implements: inspector state providers, filesystem access, content hashing,
//! chat completion clients and token credentials. It depends only on
//! `assistkit-types` -- never on `assistkit-infra` or any network crate.

pub mod inspector;
pub mod llm;
pub mod service;
