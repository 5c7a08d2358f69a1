use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to resolve revision '{revision}'")]
    RevisionNotFound { revision: String },

    #[error("diff delta has no file path")]
    MissingDeltaPath,

    #[error("path '{}' is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },
}
