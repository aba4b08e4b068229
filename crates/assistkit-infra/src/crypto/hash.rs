//! SHA-256 digests for inspector state ids.
//!
//! An inspector's state id is the hex digest of `"<Kind>_<display name>"`,
//! so it stays stable across runs and processes.

use sha2::{Digest, Sha256};

use assistkit_core::service::hash::ContentHasher;

/// [`ContentHasher`] producing lowercase hex SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256ContentHasher;

impl ContentHasher for Sha256ContentHasher {
    fn compute_hash(&self, content: &str) -> String {
        Sha256::digest(content.as_bytes())
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }
}
