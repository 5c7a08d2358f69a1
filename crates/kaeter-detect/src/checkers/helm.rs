use kaeter_core::label::{sorted_unique, with_trailing_slash};
use kaeter_core::{ChartImpact, FileChangeSet};
use tracing::info;

/// Matches changed paths against known chart directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelmChecker;

impl HelmChecker {
    #[must_use]
    pub fn check(&self, files: &FileChangeSet, charts: &[String]) -> ChartImpact {
        let roots: Vec<String> = charts.iter().map(|c| with_trailing_slash(c)).collect();

        let affected = roots
            .iter()
            .filter(|root| files.all().any(|path| path.starts_with(root.as_str())))
            .cloned();

        let impact = ChartImpact {
            charts: sorted_unique(affected),
        };
        info!(charts = impact.charts.len(), "helm impact");
        impact
    }
}
