use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kaeter_core::VersionedModule;
use kaeter_git::{FileChange, GitError};

use crate::Result;
use crate::error::{BuildGraphQueryError, DryRunError};
use crate::traits::{BuildGraphQuery, DryRunner, GitProvider, QueryOptions, TargetMiner};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

pub struct MockGitProvider {
    changed_files: Vec<FileChange>,
    messages: HashMap<String, String>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            changed_files: Vec::new(),
            messages: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_changed_files(mut self, files: Vec<FileChange>) -> Self {
        self.changed_files = files;
        self
    }

    #[must_use]
    pub fn with_commit_message(mut self, revision: &str, message: &str) -> Self {
        self.messages
            .insert(revision.to_string(), message.to_string());
        self
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn changed_files(&self, _root: &Path, from: &str, to: &str) -> Result<Vec<FileChange>> {
        if from == to {
            return Ok(Vec::new());
        }
        Ok(self.changed_files.clone())
    }

    fn commit_message(&self, _root: &Path, revision: &str) -> Result<String> {
        self.messages.get(revision).cloned().ok_or_else(|| {
            GitError::RevisionNotFound {
                revision: revision.to_string(),
            }
            .into()
        })
    }
}

/// Answers source file queries and rdeps queries with canned labels and
/// records every expression it receives.
pub struct MockBuildGraph {
    source_files: Vec<String>,
    dependents: Vec<String>,
    fail: bool,
    queries: Mutex<Vec<(String, QueryOptions)>>,
}

impl MockBuildGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_files: Vec::new(),
            dependents: Vec::new(),
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_source_files(mut self, labels: &[&str]) -> Self {
        self.source_files = owned(labels);
        self
    }

    #[must_use]
    pub fn with_dependents(mut self, labels: &[&str]) -> Self {
        self.dependents = owned(labels);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn queries(&self) -> Vec<(String, QueryOptions)> {
        self.queries.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockBuildGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildGraphQuery for MockBuildGraph {
    fn query(
        &self,
        _root: &Path,
        expression: &str,
        options: QueryOptions,
    ) -> std::result::Result<Vec<String>, BuildGraphQueryError> {
        self.queries
            .lock()
            .expect("lock poisoned")
            .push((expression.to_string(), options));

        if self.fail {
            return Err(BuildGraphQueryError::Spawn {
                program: "bazel".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "bazel not installed"),
            });
        }

        if expression.contains("rdeps(") {
            Ok(self.dependents.clone())
        } else {
            Ok(self.source_files.clone())
        }
    }
}

/// Returns canned command lines per step and records each invocation as
/// `(module_dir, convention_file, step)`.
pub struct MockDryRunner {
    outputs: HashMap<String, Vec<String>>,
    fail: bool,
    calls: Mutex<Vec<(PathBuf, String, String)>>,
}

impl MockDryRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_output(mut self, step: &str, lines: &[&str]) -> Self {
        self.outputs.insert(step.to_string(), owned(lines));
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(PathBuf, String, String)> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockDryRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunner for MockDryRunner {
    fn dry_run(
        &self,
        module_dir: &Path,
        convention_file: &str,
        step: &str,
    ) -> std::result::Result<Vec<String>, DryRunError> {
        self.calls.lock().expect("lock poisoned").push((
            module_dir.to_path_buf(),
            convention_file.to_string(),
            step.to_string(),
        ));

        if self.fail {
            return Err(DryRunError::Spawn {
                program: "make".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "make not installed"),
            });
        }

        Ok(self.outputs.get(step).cloned().unwrap_or_default())
    }
}

/// Hands out fixed candidate targets per module id.
pub struct MockTargetMiner {
    targets: HashMap<String, Vec<String>>,
    fail: bool,
    mined: Mutex<Vec<String>>,
}

impl MockTargetMiner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
            fail: false,
            mined: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_targets(mut self, module_id: &str, targets: &[&str]) -> Self {
        self.targets.insert(module_id.to_string(), owned(targets));
        self
    }

    /// Ids of the modules that were mined, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn mined(&self) -> Vec<String> {
        self.mined.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockTargetMiner {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetMiner for MockTargetMiner {
    fn candidate_targets(&self, _root: &Path, module: &VersionedModule) -> Result<Vec<String>> {
        self.mined
            .lock()
            .expect("lock poisoned")
            .push(module.id.clone());

        if self.fail {
            return Err(DryRunError::Spawn {
                program: "make".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "make not installed"),
            }
            .into());
        }

        Ok(self.targets.get(&module.id).cloned().unwrap_or_default())
    }
}
