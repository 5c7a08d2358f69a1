use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use kaeter_core::{AggregateResult, PullRequest};
use kaeter_detect::checkers::MakefileTargetMiner;
use kaeter_detect::providers::{BazelCli, FileSystemModuleProvider, Git2Provider, MakeDryRun};
use kaeter_detect::traits::ModuleProvider;
use kaeter_detect::{DetectInput, Detector};
use tracing::info;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Args)]
pub(crate) struct DetectArgs {
    /// Older revision of the range to inspect
    #[arg(long)]
    pub previous: String,

    /// Newer revision of the range; its commit message supplies the tags
    #[arg(long)]
    pub latest: String,

    /// Write the result to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Format of the result document
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pull request title to include in the result
    #[arg(long)]
    pub pr_title: Option<String>,

    /// Pull request description to include in the result
    #[arg(long)]
    pub pr_body: Option<String>,

    /// Bazel binary, overriding the configuration file
    #[arg(long)]
    pub bazel: Option<String>,

    /// Make binary, overriding the configuration file
    #[arg(long)]
    pub make: Option<String>,
}

impl DetectArgs {
    fn pull_request(&self) -> Option<PullRequest> {
        if self.pr_title.is_none() && self.pr_body.is_none() {
            return None;
        }
        Some(PullRequest {
            title: self.pr_title.clone().unwrap_or_default(),
            body: self.pr_body.clone().unwrap_or_default(),
        })
    }
}

pub(crate) fn run(args: DetectArgs, root: &Path) -> Result<()> {
    let mut config = kaeter_project::load_config(root)?;
    if let Some(bazel) = &args.bazel {
        config = config.with_bazel_binary(bazel);
    }
    if let Some(make) = &args.make {
        config = config.with_make_binary(make);
    }

    let detector = Detector::new(
        Git2Provider::new(),
        BazelCli::new(config.bazel_binary()),
        MakefileTargetMiner::new(MakeDryRun::new(config.make_binary())),
    )
    .with_third_party_dir(config.third_party_dir());

    let provider = FileSystemModuleProvider::new(config);
    let modules = provider.discover_modules(root)?;
    let charts = provider.discover_charts(root)?;
    info!(
        modules = modules.len(),
        charts = charts.len(),
        "discovered repository layout"
    );

    let result = detector.detect(DetectInput {
        root,
        previous: &args.previous,
        latest: &args.latest,
        modules: &modules,
        charts: &charts,
        pull_request: args.pull_request(),
    })?;

    let document = render(&result, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, document).map_err(|source| CliError::WriteOutput {
            path: path.clone(),
            source,
        })?,
        None => print!("{document}"),
    }

    Ok(())
}

fn render(result: &AggregateResult, format: OutputFormat) -> Result<String> {
    let mut document = match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Yaml => serde_yml::to_string(result)?,
    };
    if !document.ends_with('\n') {
        document.push('\n');
    }
    Ok(document)
}
