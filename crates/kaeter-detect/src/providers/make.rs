use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::output_lines;
use crate::error::DryRunError;
use crate::traits::DryRunner;

/// Uses `make --dry-run` to list the commands of a Makefile step.
pub struct MakeDryRun {
    binary: String,
}

impl MakeDryRun {
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, module_dir: &Path, convention_file: &str, step: &str) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .current_dir(module_dir)
            .args(["--dry-run", "--no-print-directory", "--file", convention_file, step]);
        command
    }
}

impl Default for MakeDryRun {
    fn default() -> Self {
        Self::new("make")
    }
}

impl DryRunner for MakeDryRun {
    fn dry_run(
        &self,
        module_dir: &Path,
        convention_file: &str,
        step: &str,
    ) -> Result<Vec<String>, DryRunError> {
        debug!(dir = %module_dir.display(), convention_file, step, "running make dry run");

        let output = self
            .command(module_dir, convention_file, step)
            .output()
            .map_err(|source| DryRunError::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DryRunError::Failed {
                dir: module_dir.to_path_buf(),
                step: step.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|source| DryRunError::InvalidOutput {
            dir: module_dir.to_path_buf(),
            step: step.to_string(),
            source,
        })?;

        Ok(output_lines(&stdout))
    }
}
