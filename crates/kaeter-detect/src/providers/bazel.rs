use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use super::output_lines;
use crate::error::BuildGraphQueryError;
use crate::traits::{BuildGraphQuery, QueryOptions};

/// Exit code bazel uses when `--keep_going` produced results despite errors.
const PARTIAL_SUCCESS_EXIT_CODE: i32 = 3;

/// Runs `bazel query` as a child process.
pub struct BazelCli {
    binary: String,
}

impl BazelCli {
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, root: &Path, expression: &str, options: QueryOptions) -> Command {
        let mut command = Command::new(&self.binary);
        command.current_dir(root).arg("query");
        if options.keep_going {
            command.arg("--keep_going");
        }
        if options.skip_tool_deps {
            command.arg("--notool_deps");
        }
        command.arg("--output=label").arg(expression);
        command
    }
}

impl Default for BazelCli {
    fn default() -> Self {
        Self::new("bazel")
    }
}

impl BuildGraphQuery for BazelCli {
    fn query(
        &self,
        root: &Path,
        expression: &str,
        options: QueryOptions,
    ) -> Result<Vec<String>, BuildGraphQueryError> {
        debug!(binary = %self.binary, expression, ?options, "running bazel query");

        let output = self
            .command(root, expression, options)
            .output()
            .map_err(|source| BuildGraphQueryError::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        let partial =
            options.keep_going && output.status.code() == Some(PARTIAL_SUCCESS_EXIT_CODE);
        if !output.status.success() && !partial {
            return Err(BuildGraphQueryError::Failed {
                expression: expression.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if partial {
            warn!(expression, "bazel query completed with errors, using partial results");
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|source| BuildGraphQueryError::InvalidOutput {
                expression: expression.to_string(),
                source,
            })?;

        let lines = output_lines(&stdout);
        debug!(count = lines.len(), "bazel query returned results");
        Ok(lines)
    }
}
