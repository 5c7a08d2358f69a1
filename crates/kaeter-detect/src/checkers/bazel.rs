use std::collections::HashSet;
use std::path::Path;

use kaeter_core::label::{is_external, is_qualified, label_to_path, packages_of, sorted_unique};
use kaeter_core::{BuildImpact, FileChangeSet};
use tracing::{debug, info};

use crate::Result;
use crate::traits::{BuildGraphQuery, QueryOptions};

/// Suffix of Starlark extension files.
pub const STARLARK_SUFFIX: &str = ".bzl";
pub const BUILD_FILE_NAMES: &[&str] = &["BUILD", "BUILD.bazel"];
/// Workspace definitions; only recognised at the repository root.
pub const WORKSPACE_FILE_NAMES: &[&str] = &["WORKSPACE", "WORKSPACE.bazel"];

/// Derives build graph level impact from a set of file changes.
pub struct BazelChecker<Q> {
    query: Q,
    third_party_dir: String,
}

impl<Q: BuildGraphQuery> BazelChecker<Q> {
    pub fn new(query: Q, third_party_dir: impl Into<String>) -> Self {
        Self {
            query,
            third_party_dir: third_party_dir.into(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if a bazel query fails or returns a target label that
    /// cannot be split into package and name.
    pub fn check(&self, root: &Path, files: &FileChangeSet) -> Result<BuildImpact> {
        let mut impact = classify(files);

        if files.touched().next().is_none() {
            debug!("no added or modified files, skipping bazel queries");
            return Ok(impact);
        }

        let graph_files = self.source_files(root)?;
        impact.source_files = sorted_unique(files.touched().filter(|p| graph_files.contains(*p)));

        if impact.source_files.is_empty() {
            info!("no changed file is part of the build graph");
            return Ok(impact);
        }

        impact.targets = self.dependent_targets(root, &impact.source_files)?;
        impact.packages = sorted_unique(packages_of(&impact.targets)?);

        info!(
            source_files = impact.source_files.len(),
            targets = impact.targets.len(),
            packages = impact.packages.len(),
            "bazel impact"
        );
        Ok(impact)
    }

    fn source_files_expression(&self) -> String {
        let universe = if self.third_party_dir.is_empty() {
            "//...".to_string()
        } else {
            format!("//... except //{}/...", self.third_party_dir)
        };
        format!("kind(\"source file\", deps({universe}))")
    }

    /// Paths of every source file the build graph knows about, excluding
    /// files from external repositories.
    fn source_files(&self, root: &Path) -> Result<HashSet<String>> {
        let labels = self.query.query(
            root,
            &self.source_files_expression(),
            QueryOptions::keep_going().without_tool_deps(),
        )?;

        let files: HashSet<String> = labels
            .iter()
            .filter(|label| !is_external(label))
            .map(|label| label_to_path(label))
            .collect();
        debug!(count = files.len(), "source files in build graph");
        Ok(files)
    }

    fn dependent_targets(&self, root: &Path, source_files: &[String]) -> Result<Vec<String>> {
        let expression = rdeps_expression(source_files);
        let results = self
            .query
            .query(root, &expression, QueryOptions::keep_going())?;

        Ok(sorted_unique(
            results.into_iter().filter(|label| is_qualified(label)),
        ))
    }
}

/// Query for every rule depending on `source_files`, minus the source files
/// themselves.
fn rdeps_expression(source_files: &[String]) -> String {
    let set = source_files
        .iter()
        .map(|file| format!("\"{file}\""))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "let affected = rdeps(//..., set({set})) in $affected except kind(\"source file\", $affected)"
    )
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn classify(files: &FileChangeSet) -> BuildImpact {
    let bazel_sources = files
        .touched()
        .filter(|path| path.ends_with(STARLARK_SUFFIX));
    let build_files = files
        .touched()
        .filter(|path| BUILD_FILE_NAMES.contains(&basename(path)));
    let workspace = files
        .modified
        .iter()
        .any(|path| WORKSPACE_FILE_NAMES.contains(&path.as_str()));

    BuildImpact {
        bazel_sources: sorted_unique(bazel_sources),
        workspace,
        build_files: sorted_unique(build_files),
        ..BuildImpact::default()
    }
}
