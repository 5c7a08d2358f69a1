use std::path::Path;

use kaeter_core::VersionedModule;
use kaeter_detect::providers::FileSystemModuleProvider;
use kaeter_detect::traits::ModuleProvider;

use crate::error::Result;

pub(crate) fn run(root: &Path) -> Result<()> {
    let config = kaeter_project::load_config(root)?;
    let modules = FileSystemModuleProvider::new(config).discover_modules(root)?;

    print_modules(&modules);

    Ok(())
}

fn print_modules(modules: &[VersionedModule]) {
    if modules.is_empty() {
        println!("No versioned modules found.");
        return;
    }

    let id_width = modules.iter().map(|m| m.id.len()).max().unwrap_or_default();
    let path_width = modules.iter().map(|m| m.path.len()).max().unwrap_or_default();

    for module in modules {
        println!(
            "{:<id_width$}  {:<path_width$}  {}",
            module.id, module.path, module.module_type
        );
    }
}
