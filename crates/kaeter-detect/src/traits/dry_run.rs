use std::path::Path;

use crate::error::DryRunError;

/// Prints the commands a convention build step would execute, without
/// executing them.
pub trait DryRunner: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the build tool cannot be started or the step fails.
    fn dry_run(
        &self,
        module_dir: &Path,
        convention_file: &str,
        step: &str,
    ) -> Result<Vec<String>, DryRunError>;
}

impl<T: DryRunner + ?Sized> DryRunner for &T {
    fn dry_run(
        &self,
        module_dir: &Path,
        convention_file: &str,
        step: &str,
    ) -> Result<Vec<String>, DryRunError> {
        (**self).dry_run(module_dir, convention_file, step)
    }
}
