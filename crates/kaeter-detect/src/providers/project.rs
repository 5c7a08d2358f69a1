use std::path::Path;

use kaeter_core::VersionedModule;
use kaeter_project::{DetectConfig, discover_charts, discover_modules};

use crate::Result;
use crate::traits::ModuleProvider;

pub struct FileSystemModuleProvider {
    config: DetectConfig,
}

impl FileSystemModuleProvider {
    #[must_use]
    pub fn new(config: DetectConfig) -> Self {
        Self { config }
    }
}

impl Default for FileSystemModuleProvider {
    fn default() -> Self {
        Self::new(DetectConfig::default())
    }
}

impl ModuleProvider for FileSystemModuleProvider {
    fn discover_modules(&self, root: &Path) -> Result<Vec<VersionedModule>> {
        Ok(discover_modules(root, &self.config)?)
    }

    fn discover_charts(&self, root: &Path) -> Result<Vec<String>> {
        Ok(discover_charts(root, &self.config)?)
    }
}
