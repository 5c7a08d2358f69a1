use std::path::Path;

use kaeter_core::{AggregateResult, PullRequest, VersionedModule};
use tracing::info;

use crate::checkers::{BazelChecker, CommitTagsChecker, FilesChecker, HelmChecker, KaeterChecker};
use crate::error::{Checker, OperationError};
use crate::traits::{BuildGraphQuery, GitProvider, TargetMiner};
use crate::Result;

/// Everything a detection run needs besides its collaborators.
pub struct DetectInput<'a> {
    pub root: &'a Path,
    /// Older revision of the range.
    pub previous: &'a str,
    /// Newer revision; its commit message supplies the tags.
    pub latest: &'a str,
    pub modules: &'a [VersionedModule],
    pub charts: &'a [String],
    pub pull_request: Option<PullRequest>,
}

/// Runs the checkers in dependency order and assembles their results.
pub struct Detector<G, Q, M> {
    git: G,
    query: Q,
    miner: M,
    third_party_dir: String,
}

impl<G, Q, M> Detector<G, Q, M>
where
    G: GitProvider,
    Q: BuildGraphQuery,
    M: TargetMiner,
{
    pub fn new(git: G, query: Q, miner: M) -> Self {
        Self {
            git,
            query,
            miner,
            third_party_dir: String::new(),
        }
    }

    #[must_use]
    pub fn with_third_party_dir(mut self, dir: impl Into<String>) -> Self {
        self.third_party_dir = dir.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`OperationError::Checker`] naming the first checker that failed.
    /// No partial result is produced.
    pub fn detect(&self, input: DetectInput<'_>) -> Result<AggregateResult> {
        let DetectInput {
            root,
            previous,
            latest,
            modules,
            charts,
            pull_request,
        } = input;
        info!(previous, latest, root = %root.display(), "detecting changes");

        let files = FilesChecker::new(&self.git)
            .check(root, previous, latest)
            .map_err(OperationError::in_checker(Checker::Files))?;

        let bazel = BazelChecker::new(&self.query, self.third_party_dir.as_str())
            .check(root, &files)
            .map_err(OperationError::in_checker(Checker::Bazel))?;

        let kaeter = KaeterChecker::new(&self.miner)
            .check(root, &files, &bazel, modules)
            .map_err(OperationError::in_checker(Checker::Kaeter))?;

        let helm = HelmChecker.check(&files, charts);

        let commit = CommitTagsChecker::new(&self.git)
            .check(root, latest)
            .map_err(OperationError::in_checker(Checker::Commit))?;

        Ok(AggregateResult {
            files,
            bazel,
            kaeter,
            helm,
            commit,
            pull_request,
        })
    }
}
