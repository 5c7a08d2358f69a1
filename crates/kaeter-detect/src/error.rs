use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

/// The stages of the detection pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checker {
    Files,
    Bazel,
    Kaeter,
    Helm,
    Commit,
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Files => "files",
            Self::Bazel => "bazel",
            Self::Kaeter => "kaeter",
            Self::Helm => "helm",
            Self::Commit => "commit",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Error)]
pub enum BuildGraphQueryError {
    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bazel query '{expression}' failed ({status}): {stderr}")]
    Failed {
        expression: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("bazel query '{expression}' produced non UTF-8 output")]
    InvalidOutput {
        expression: String,
        #[source]
        source: FromUtf8Error,
    },
}

#[derive(Debug, Error)]
pub enum DryRunError {
    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dry run of '{step}' in '{}' failed ({status}): {stderr}", dir.display())]
    Failed {
        dir: PathBuf,
        step: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("dry run of '{step}' in '{}' produced non UTF-8 output", dir.display())]
    InvalidOutput {
        dir: PathBuf,
        step: String,
        #[source]
        source: FromUtf8Error,
    },
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] kaeter_git::GitError),

    #[error(transparent)]
    Project(#[from] kaeter_project::ProjectError),

    #[error("invalid target label")]
    Label(#[from] kaeter_core::LabelError),

    #[error(transparent)]
    BuildGraphQuery(#[from] BuildGraphQueryError),

    #[error(transparent)]
    DryRun(#[from] DryRunError),

    #[error("{checker} checker failed")]
    Checker {
        checker: Checker,
        #[source]
        source: Box<OperationError>,
    },
}

impl OperationError {
    pub(crate) fn in_checker(checker: Checker) -> impl FnOnce(Self) -> Self {
        move |source| Self::Checker {
            checker,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;
