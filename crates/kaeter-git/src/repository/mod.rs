mod commit;
mod diff;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        let root = inner.workdir().ok_or_else(|| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        // Use dunce to get a path without the \\?\ prefix on Windows
        let root = dunce::simplified(root).to_path_buf();

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_commit(&self, revision: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .inner
            .revparse_single(revision)
            .map_err(|_| GitError::RevisionNotFound {
                revision: revision.to_string(),
            })?;

        obj.peel_to_commit().map_err(|_| GitError::RevisionNotFound {
            revision: revision.to_string(),
        })
    }
}
