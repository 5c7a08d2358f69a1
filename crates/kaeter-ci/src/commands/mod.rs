mod detect;
mod modules;

use std::path::Path;

use clap::Subcommand;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Detect what changed between two revisions and what it affects
    Detect(detect::DetectArgs),
    /// List the versioned modules found in the repository
    Modules,
}

impl Commands {
    pub(crate) fn execute(self, root: &Path) -> Result<()> {
        match self {
            Self::Detect(args) => detect::run(args, root),
            Self::Modules => modules::run(root),
        }
    }
}
