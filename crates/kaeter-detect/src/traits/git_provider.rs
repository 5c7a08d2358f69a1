use std::path::Path;

use kaeter_git::FileChange;

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or a revision
    /// cannot be resolved.
    fn changed_files(&self, root: &Path, from: &str, to: &str) -> Result<Vec<FileChange>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the revision
    /// does not point at a commit.
    fn commit_message(&self, root: &Path, revision: &str) -> Result<String>;
}

impl<T: GitProvider + ?Sized> GitProvider for &T {
    fn changed_files(&self, root: &Path, from: &str, to: &str) -> Result<Vec<FileChange>> {
        (**self).changed_files(root, from, to)
    }

    fn commit_message(&self, root: &Path, revision: &str) -> Result<String> {
        (**self).commit_message(root, revision)
    }
}
