mod build_graph;
mod dry_run;
mod git_provider;
mod module_provider;
mod target_miner;

pub use build_graph::{BuildGraphQuery, QueryOptions};
pub use dry_run::DryRunner;
pub use git_provider::GitProvider;
pub use module_provider::ModuleProvider;
pub use target_miner::TargetMiner;
