//! File loading abstraction for release config retrieval.
//!
//! Provides a trait for loading file content at a given revision without
//! coupling config parsing to a specific repository implementation.

use crate::Result;

/// Abstraction for loading file content as it existed at a revision.
///
/// Implemented by [`crate::repo::Repository`] and by in-memory doubles in
/// tests.
pub trait FileLoader {
    /// Load the content of a file from the source.
    ///
    /// # Arguments
    ///
    /// * `revision` - Any reference resolvable to a commit (sha, tag, branch)
    /// * `path` - Path to the file relative to the repository root
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - File content, surrounding whitespace trimmed
    /// * `Err(_)` - The revision could not be resolved or the file does not
    ///   exist at that revision
    fn load_file(&self, revision: &str, path: &str) -> Result<String>;
}
