//! FileSystem trait for abstracting file reads.
//!
//! Inspectors read state through this trait so they can be tested against
//! in-memory or failing implementations. The `LocalFileSystem` adapter lives
//! in assistkit-infra.

use std::path::Path;

/// Read-only abstraction over filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Read a file's content as a UTF-8 string.
    ///
    /// A missing file must surface as `std::io::ErrorKind::NotFound`.
    fn read_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<String, std::io::Error>> + Send;
}
