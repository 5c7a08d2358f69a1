mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::{CommitInfo, FileChange, FileStatus};

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns an error if the path is not a git repository or either revision
/// cannot be resolved.
pub fn changed_files(path: &Path, from: &str, to: &str) -> Result<Vec<FileChange>> {
    Repository::open(path)?.changed_files(from, to)
}

/// # Errors
///
/// Returns an error if the path is not a git repository or the revision
/// cannot be resolved to a commit.
pub fn commit_message(path: &Path, revision: &str) -> Result<String> {
    Repository::open(path)?.commit(revision).map(|info| info.message)
}
