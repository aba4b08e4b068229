//! Cryptographic operations for assistkit.
//!
//! - `hash`: SHA-256 content hashing for inspector identities

pub mod hash;
