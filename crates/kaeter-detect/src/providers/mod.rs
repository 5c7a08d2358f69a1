mod bazel;
mod git;
mod make;
mod project;

pub use bazel::BazelCli;
pub use git::Git2Provider;
pub use make::MakeDryRun;
pub use project::FileSystemModuleProvider;

fn output_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
