use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Paths changed between two revisions, relative to the repository root and
/// always `/`-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeSet {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
}

impl FileChangeSet {
    /// Added and modified paths, i.e. files that exist at the newer revision.
    pub fn touched(&self) -> impl Iterator<Item = &str> {
        self.added.iter().chain(&self.modified).map(String::as_str)
    }

    /// Added, modified and removed paths.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.touched().chain(self.removed.iter().map(String::as_str))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildImpact {
    /// Changed Starlark extension files (`*.bzl`).
    pub bazel_sources: Vec<String>,
    /// Whether the top-level workspace definition was modified.
    pub workspace: bool,
    /// Changed files that are inputs to the build graph.
    pub source_files: Vec<String>,
    /// Changed `BUILD`/`BUILD.bazel` files.
    pub build_files: Vec<String>,
    /// Labels of targets depending on `source_files`.
    pub targets: Vec<String>,
    /// Packages containing `targets`.
    pub packages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleType {
    /// Built through `snapshot`/`release` steps of a Makefile.
    Makefile,
    Other(String),
}

impl ModuleType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Makefile => "Makefile",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ModuleType {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("makefile") {
            Self::Makefile
        } else {
            Self::Other(value)
        }
    }
}

impl From<ModuleType> for String {
    fn from(value: ModuleType) -> Self {
        match value {
            ModuleType::Makefile => "Makefile".to_string(),
            ModuleType::Other(name) => name,
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedModule {
    pub id: String,
    /// Module root directory relative to the repository root (`.` for the root).
    pub path: String,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl VersionedModule {
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>, module_type: ModuleType) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            module_type,
            annotations: None,
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// Modules judged affected, keyed by module id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImpact {
    pub modules: BTreeMap<String, VersionedModule>,
}

impl ModuleImpact {
    /// Records a module as affected. Returns `false` if it was already present,
    /// in which case the map is left untouched.
    pub fn insert(&mut self, module: &VersionedModule) -> bool {
        if self.modules.contains_key(&module.id) {
            return false;
        }
        self.modules.insert(module.id.clone(), module.clone());
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartImpact {
    pub charts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTags {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: String,
    pub body: String,
}

/// Everything detected for one revision range. This is the document handed
/// to pipeline generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub files: FileChangeSet,
    pub bazel: BuildImpact,
    pub kaeter: ModuleImpact,
    pub helm: ChartImpact,
    pub commit: CommitTags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequest>,
}
