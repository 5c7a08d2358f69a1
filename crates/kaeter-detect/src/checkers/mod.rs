mod bazel;
mod commit;
mod files;
mod helm;
mod kaeter;
mod mining;

pub use bazel::{BUILD_FILE_NAMES, BazelChecker, STARLARK_SUFFIX, WORKSPACE_FILE_NAMES};
pub use commit::{CommitTagsChecker, MAX_TAGS, extract_tags};
pub use files::{FilesChecker, categorize};
pub use helm::HelmChecker;
pub use kaeter::KaeterChecker;
pub use mining::{CONVENTION_FILE_NAMES, MakefileTargetMiner, STEPS, extract_targets};
