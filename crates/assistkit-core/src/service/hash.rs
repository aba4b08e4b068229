//! ContentHasher trait for computing content-derived identifiers.
//!
//! Defined in assistkit-core so identity derivation does not couple to a
//! specific hashing algorithm. The `Sha256ContentHasher` adapter lives in
//! assistkit-infra.

/// Abstraction over content hashing.
///
/// Implementations must be deterministic across processes: inspector
/// identities derived from the digest are persisted by the host.
pub trait ContentHasher: Send + Sync {
    /// Compute a hex-encoded hash of the given content.
    fn compute_hash(&self, content: &str) -> String;
}
