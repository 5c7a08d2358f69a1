mod config;
mod discovery;
mod error;

pub use config::{CONFIG_FILE_NAME, DetectConfig, load_config, parse_config};
pub use discovery::{
    CHART_FILE_NAME, DESCRIPTOR_FILE_NAMES, discover_charts, discover_modules, parse_descriptor,
};
pub use error::ProjectError;

pub type Result<T> = std::result::Result<T, ProjectError>;
