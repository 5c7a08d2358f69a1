mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "kaeter-ci")]
#[command(bin_name = "kaeter-ci")]
#[command(about = "Detect what a change affects in a monorepo", long_about = None)]
struct Cli {
    /// Repository root (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Log filter written to stderr, e.g. `info` or `kaeter_detect=debug`
    #[arg(long = "log-level", global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_level) {
        print_error(&e);
        return ExitCode::FAILURE;
    }

    let root = match resolve_root(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = cli.command.execute(&root) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
