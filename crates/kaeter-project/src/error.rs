use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to walk repository at '{root}'")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read module descriptor '{path}'")]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse module descriptor '{path}'")]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("module descriptor '{path}' missing required field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },
}
