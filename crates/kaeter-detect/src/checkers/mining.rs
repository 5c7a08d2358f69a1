use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use kaeter_core::label::package_label;
use kaeter_core::{ModuleType, VersionedModule};
use regex::Regex;
use tracing::debug;

use crate::Result;
use crate::traits::{DryRunner, TargetMiner};

/// Makefile names in order of preference.
pub const CONVENTION_FILE_NAMES: &[&str] = &["Makefile.kaeter", "Makefile"];

/// Steps whose recipes are inspected.
pub const STEPS: &[&str] = &["snapshot", "release"];

/// `bazel build` or `bazel run`, allowing startup options before the command.
static BAZEL_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s/])bazel(?:isk)?\s+(?:-\S+\s+)*(?:build|run)(?:\s|$)")
        .expect("valid regex")
});

/// A main repository label starting a token, so URLs (`grpc://host:port`) and
/// external labels (`@repo//:name`) are not picked up.
static QUALIFIED_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s'"=])(//[A-Za-z0-9_\-./+=,@~]*:[A-Za-z0-9_\-./+=,@~]+)"#)
        .expect("valid regex")
});

static RELATIVE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s):([A-Za-z0-9_\-./+=,@~]+)").expect("valid regex")
});

fn invokes_bazel(line: &str) -> bool {
    BAZEL_COMMAND.is_match(line)
}

/// Pulls the target labels out of `bazel build`/`bazel run` command lines.
///
/// Only the first fully-qualified label of a line is taken. Lines that only
/// name a package-relative label (`:image`) resolve it against `package`.
#[must_use]
pub fn extract_targets(lines: &[String], package: &str) -> Vec<String> {
    let mut targets = BTreeSet::new();

    for line in lines.iter().filter(|line| invokes_bazel(line)) {
        if let Some(captures) = QUALIFIED_LABEL.captures(line) {
            targets.insert(captures[1].to_string());
        } else if let Some(captures) = RELATIVE_LABEL.captures(line) {
            targets.insert(format!("{package}:{}", &captures[1]));
        }
    }

    targets.into_iter().collect()
}

/// Finds candidate targets by dry-running a module's `snapshot` and `release`
/// Makefile steps and scanning the printed commands for bazel invocations.
///
/// This is a heuristic: a target only counts if the recipe names it literally.
pub struct MakefileTargetMiner<D> {
    runner: D,
}

impl<D: DryRunner> MakefileTargetMiner<D> {
    pub fn new(runner: D) -> Self {
        Self { runner }
    }
}

fn convention_file(module_dir: &Path) -> Option<&'static str> {
    CONVENTION_FILE_NAMES
        .iter()
        .copied()
        .find(|name| module_dir.join(name).is_file())
}

impl<D: DryRunner> TargetMiner for MakefileTargetMiner<D> {
    fn candidate_targets(&self, root: &Path, module: &VersionedModule) -> Result<Vec<String>> {
        if module.module_type != ModuleType::Makefile {
            return Ok(Vec::new());
        }

        let module_dir = root.join(&module.path);
        let Some(file) = convention_file(&module_dir) else {
            debug!(id = %module.id, dir = %module_dir.display(), "module has no Makefile");
            return Ok(Vec::new());
        };

        let mut lines = Vec::new();
        for step in STEPS {
            lines.extend(self.runner.dry_run(&module_dir, file, step)?);
        }

        let targets = extract_targets(&lines, &package_label(&module.path));
        debug!(id = %module.id, ?targets, "candidate targets");
        Ok(targets)
    }
}
