use crate::{CommitInfo, Result};

use super::Repository;

impl Repository {
    /// Looks up the commit a revision points at.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::RevisionNotFound`] if the revision cannot be
    /// resolved to a commit.
    pub fn commit(&self, revision: &str) -> Result<CommitInfo> {
        let commit = self.resolve_commit(revision)?;

        Ok(CommitInfo {
            sha: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        })
    }
}
