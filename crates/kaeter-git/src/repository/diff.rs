use tracing::debug;

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// Lists the files that differ between the trees of two revisions.
    ///
    /// Rename detection is off: a moved file shows up as the new path added and
    /// the old path deleted, which is what path-based impact matching needs.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RevisionNotFound`] if either revision cannot be resolved.
    pub fn changed_files(&self, from: &str, to: &str) -> Result<Vec<FileChange>> {
        let from_tree = self.resolve_commit(from)?.tree()?;
        let to_tree = self.resolve_commit(to)?.tree()?;

        let diff = self
            .inner
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let (status, file) = match delta.status() {
                git2::Delta::Added | git2::Delta::Copied => (FileStatus::Added, delta.new_file()),
                git2::Delta::Deleted => (FileStatus::Deleted, delta.old_file()),
                git2::Delta::Modified | git2::Delta::Typechange => {
                    (FileStatus::Modified, delta.new_file())
                }
                _ => continue,
            };

            let path = file.path().ok_or(GitError::MissingDeltaPath)?;
            let path = path.to_str().ok_or_else(|| GitError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;

            changes.push(FileChange::new(path, status));
        }

        debug!(from, to, count = changes.len(), "computed changed files");

        Ok(changes)
    }
}
