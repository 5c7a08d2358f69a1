use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{CliError, Result};

/// Installs a stderr subscriber so stdout only ever carries the result
/// document.
pub(crate) fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).map_err(|source| CliError::LogFilter {
        filter: level.to_string(),
        source,
    })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
