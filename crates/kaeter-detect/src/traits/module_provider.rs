use std::path::Path;

use kaeter_core::VersionedModule;

use crate::Result;

pub trait ModuleProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be searched.
    fn discover_modules(&self, root: &Path) -> Result<Vec<VersionedModule>>;

    /// Chart roots relative to `root`, each with a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be searched.
    fn discover_charts(&self, root: &Path) -> Result<Vec<String>>;
}
