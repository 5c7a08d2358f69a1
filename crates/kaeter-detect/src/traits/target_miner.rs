use std::path::Path;

use kaeter_core::VersionedModule;

use crate::Result;

/// Strategy for guessing which build targets a module's release recipe uses.
pub trait TargetMiner: Send + Sync {
    /// Candidate labels for `module`, sorted and without duplicates. Modules
    /// the strategy does not understand yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if inspecting the module's recipe fails.
    fn candidate_targets(&self, root: &Path, module: &VersionedModule) -> Result<Vec<String>>;
}

impl<T: TargetMiner + ?Sized> TargetMiner for &T {
    fn candidate_targets(&self, root: &Path, module: &VersionedModule) -> Result<Vec<String>> {
        (**self).candidate_targets(root, module)
    }
}
