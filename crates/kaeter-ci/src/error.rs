use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("detection failed")]
    Operation(#[from] kaeter_detect::OperationError),

    #[error("project error")]
    Project(#[from] kaeter_project::ProjectError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to write result to '{path}'")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize result as JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize result as YAML")]
    Yaml(#[from] serde_yml::Error),

    #[error("invalid log filter '{filter}'")]
    LogFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to install logger: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
