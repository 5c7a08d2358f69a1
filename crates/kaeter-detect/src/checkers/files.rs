use std::path::Path;

use kaeter_core::FileChangeSet;
use kaeter_core::label::sorted_unique;
use kaeter_git::{FileChange, FileStatus};
use tracing::info;

use crate::Result;
use crate::traits::GitProvider;

/// Splits raw diff entries into the three categories, each sorted and
/// deduplicated.
#[must_use]
pub fn categorize(changes: Vec<FileChange>) -> FileChangeSet {
    let mut added = Vec::new();
    let mut modified = Vec::new();
    let mut removed = Vec::new();

    for change in changes {
        match change.status {
            FileStatus::Added => added.push(change.path),
            FileStatus::Modified => modified.push(change.path),
            FileStatus::Deleted => removed.push(change.path),
        }
    }

    FileChangeSet {
        added: sorted_unique(added),
        modified: sorted_unique(modified),
        removed: sorted_unique(removed),
    }
}

pub struct FilesChecker<G> {
    git: G,
}

impl<G: GitProvider> FilesChecker<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    /// # Errors
    ///
    /// Returns an error if the diff between the two revisions cannot be computed.
    pub fn check(&self, root: &Path, from: &str, to: &str) -> Result<FileChangeSet> {
        let files = categorize(self.git.changed_files(root, from, to)?);

        info!(
            added = files.added.len(),
            modified = files.modified.len(),
            removed = files.removed.len(),
            "file changes"
        );

        Ok(files)
    }
}
