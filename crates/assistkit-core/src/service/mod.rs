//! Service-level ports shared by inspectors and hosts.
//!
//! They depend on nothing concrete; adapters live in assistkit-infra.

pub mod fs;
pub mod hash;
