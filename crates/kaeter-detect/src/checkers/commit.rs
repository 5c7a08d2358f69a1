use std::path::Path;
use std::sync::LazyLock;

use kaeter_core::CommitTags;
use regex::Regex;
use tracing::info;

use crate::Result;
use crate::traits::GitProvider;

pub const MAX_TAGS: usize = 3;

static TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([a-z0-9]{1,24})\](?:\[([a-z0-9]{1,24})\])?(?:\[([a-z0-9]{1,24})\])?")
        .expect("valid regex")
});

/// Extracts up to three adjacent `[tag]` groups from the subject line of a
/// commit message. Only the leftmost run of tags counts.
#[must_use]
pub fn extract_tags(message: &str) -> CommitTags {
    let subject = message.lines().next().unwrap_or_default();

    let tags: Vec<String> = TAGS
        .captures(subject)
        .map(|captures| {
            (1..=MAX_TAGS)
                .filter_map(|group| captures.get(group))
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();

    CommitTags { tags }
}

pub struct CommitTagsChecker<G> {
    git: G,
}

impl<G: GitProvider> CommitTagsChecker<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    /// # Errors
    ///
    /// Returns an error if the commit message of `revision` cannot be read.
    pub fn check(&self, root: &Path, revision: &str) -> Result<CommitTags> {
        let message = self.git.commit_message(root, revision)?;
        let tags = extract_tags(&message);
        info!(tags = ?tags.tags, "commit tags");
        Ok(tags)
    }
}
