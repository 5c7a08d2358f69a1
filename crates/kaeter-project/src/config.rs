use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::error::ProjectError;

pub const CONFIG_FILE_NAME: &str = "kaeter-ci.toml";

const DEFAULT_BAZEL_BINARY: &str = "bazel";
const DEFAULT_THIRD_PARTY_DIR: &str = "3rdparty";
const DEFAULT_MAKE_BINARY: &str = "make";
const DEFAULT_IGNORED_DIRS: &[&str] = &["**/.git", "**/node_modules", "bazel-*"];

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct ConfigFile {
    bazel: BazelSection,
    make: MakeSection,
    discovery: DiscoverySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct BazelSection {
    binary: Option<String>,
    third_party_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct MakeSection {
    binary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct DiscoverySection {
    ignore: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct DetectConfig {
    bazel_binary: String,
    third_party_dir: String,
    make_binary: String,
    ignored_dirs: GlobSet,
}

impl Default for DetectConfig {
    fn default() -> Self {
        let patterns: Vec<String> = DEFAULT_IGNORED_DIRS.iter().map(ToString::to_string).collect();
        Self {
            bazel_binary: DEFAULT_BAZEL_BINARY.to_string(),
            third_party_dir: DEFAULT_THIRD_PARTY_DIR.to_string(),
            make_binary: DEFAULT_MAKE_BINARY.to_string(),
            // The default patterns are static and known to compile.
            ignored_dirs: build_glob_set(&patterns).unwrap_or_else(|_| GlobSet::empty()),
        }
    }
}

impl DetectConfig {
    #[must_use]
    pub fn bazel_binary(&self) -> &str {
        &self.bazel_binary
    }

    /// Directory, relative to the workspace root, whose packages are left out
    /// of the source file query.
    #[must_use]
    pub fn third_party_dir(&self) -> &str {
        &self.third_party_dir
    }

    #[must_use]
    pub fn make_binary(&self) -> &str {
        &self.make_binary
    }

    #[must_use]
    pub fn is_ignored(&self, relative_dir: &Path) -> bool {
        self.ignored_dirs.is_match(relative_dir)
    }

    #[must_use]
    pub fn with_bazel_binary(mut self, binary: impl Into<String>) -> Self {
        self.bazel_binary = binary.into();
        self
    }

    #[must_use]
    pub fn with_make_binary(mut self, binary: impl Into<String>) -> Self {
        self.make_binary = binary.into();
        self
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ProjectError::GlobPattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// # Errors
///
/// Returns an error if the content is not valid TOML, contains unknown keys, or
/// lists an invalid glob pattern.
pub fn parse_config(content: &str, path: &Path) -> Result<DetectConfig, ProjectError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let defaults = DetectConfig::default();
    let ignored_dirs = match file.discovery.ignore {
        Some(patterns) => build_glob_set(&patterns)?,
        None => defaults.ignored_dirs,
    };

    Ok(DetectConfig {
        bazel_binary: file.bazel.binary.unwrap_or(defaults.bazel_binary),
        third_party_dir: file
            .bazel
            .third_party_dir
            .map(|dir| dir.trim_matches('/').to_string())
            .unwrap_or(defaults.third_party_dir),
        make_binary: file.make.binary.unwrap_or(defaults.make_binary),
        ignored_dirs,
    })
}

/// Loads `kaeter-ci.toml` from the repository root, falling back to defaults
/// when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<DetectConfig, ProjectError> {
    let path: PathBuf = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(DetectConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    parse_config(&content, &path)
}
