use std::collections::HashSet;
use std::path::Path;

use kaeter_core::label::is_within;
use kaeter_core::{BuildImpact, FileChangeSet, ModuleImpact, VersionedModule};
use tracing::{debug, info};

use crate::Result;
use crate::traits::TargetMiner;

/// Decides which versioned modules a change affects.
///
/// A module is affected when a changed path lies inside its directory, or
/// when the miner finds one of the affected bazel targets in its recipe.
pub struct KaeterChecker<M> {
    miner: M,
}

impl<M: TargetMiner> KaeterChecker<M> {
    pub fn new(miner: M) -> Self {
        Self { miner }
    }

    /// # Errors
    ///
    /// Returns an error if mining a module's candidate targets fails.
    pub fn check(
        &self,
        root: &Path,
        files: &FileChangeSet,
        build: &BuildImpact,
        modules: &[VersionedModule],
    ) -> Result<ModuleImpact> {
        let affected_targets: HashSet<&str> = build.targets.iter().map(String::as_str).collect();
        let mut impact = ModuleImpact::default();

        for module in modules {
            if files.all().any(|path| is_within(path, &module.path)) {
                debug!(id = %module.id, "module contains changed files");
                impact.insert(module);
                continue;
            }

            if affected_targets.is_empty() {
                continue;
            }

            let candidates = self.miner.candidate_targets(root, module)?;
            if let Some(target) = candidates
                .iter()
                .find(|target| affected_targets.contains(target.as_str()))
            {
                debug!(id = %module.id, %target, "module builds an affected target");
                impact.insert(module);
            }
        }

        info!(modules = impact.len(), "kaeter impact");
        Ok(impact)
    }
}
