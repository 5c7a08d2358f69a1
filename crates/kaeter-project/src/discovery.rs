use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use kaeter_core::label::with_trailing_slash;
use kaeter_core::{ModuleType, VersionedModule};
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DetectConfig;
use crate::error::ProjectError;

pub const DESCRIPTOR_FILE_NAMES: &[&str] = &["versions.yaml", "versions.yml"];
pub const CHART_FILE_NAME: &str = "Chart.yaml";

#[derive(Debug, Deserialize)]
struct Descriptor {
    id: Option<String>,
    #[serde(rename = "type")]
    module_type: Option<String>,
    #[serde(default)]
    metadata: Option<DescriptorMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct DescriptorMetadata {
    #[serde(default)]
    annotations: Option<BTreeMap<String, String>>,
}

/// Parses the content of a `versions.yaml` descriptor living in `relative_dir`.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the `id` or `type` field is missing.
pub fn parse_descriptor(
    content: &str,
    path: &Path,
    relative_dir: &str,
) -> Result<VersionedModule, ProjectError> {
    let descriptor: Descriptor =
        serde_yml::from_str(content).map_err(|source| ProjectError::DescriptorParse {
            path: path.to_path_buf(),
            source,
        })?;

    let id = descriptor.id.ok_or_else(|| ProjectError::MissingField {
        path: path.to_path_buf(),
        field: "id",
    })?;
    let module_type = descriptor
        .module_type
        .ok_or_else(|| ProjectError::MissingField {
            path: path.to_path_buf(),
            field: "type",
        })?;

    let mut module = VersionedModule::new(id, relative_dir, ModuleType::from(module_type));
    if let Some(annotations) = descriptor.metadata.and_then(|m| m.annotations) {
        module = module.with_annotations(annotations);
    }
    Ok(module)
}

fn read_descriptor(path: &Path, relative_dir: &str) -> Result<VersionedModule, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::DescriptorRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_descriptor(&content, path, relative_dir)
}

/// Finds every versioned module below `root`.
///
/// Descriptors that cannot be read or parsed are skipped with a warning so a
/// single broken module does not hide the rest of the repository. When two
/// descriptors declare the same id, the first one found wins.
///
/// # Errors
///
/// Returns an error if the directory tree cannot be walked.
pub fn discover_modules(
    root: &Path,
    config: &DetectConfig,
) -> Result<Vec<VersionedModule>, ProjectError> {
    let descriptors = find_files(root, config, |name| DESCRIPTOR_FILE_NAMES.contains(&name))?;

    let mut seen = HashSet::new();
    let mut modules = Vec::new();
    for path in descriptors {
        let relative_dir = relative_parent(root, &path);
        match read_descriptor(&path, &relative_dir) {
            Ok(module) => {
                if seen.insert(module.id.clone()) {
                    modules.push(module);
                } else {
                    warn!(id = %module.id, path = %path.display(), "duplicate module id, skipping");
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping invalid module descriptor");
            }
        }
    }

    debug!(count = modules.len(), "discovered versioned modules");
    Ok(modules)
}

/// Finds every Helm chart below `root`, returned as repository-relative
/// directories with a trailing slash.
///
/// # Errors
///
/// Returns an error if the directory tree cannot be walked.
pub fn discover_charts(root: &Path, config: &DetectConfig) -> Result<Vec<String>, ProjectError> {
    let chart_files = find_files(root, config, |name| name == CHART_FILE_NAME)?;

    let charts: Vec<String> = chart_files
        .iter()
        .map(|path| relative_parent(root, path))
        .filter(|dir| dir != ".")
        .map(|dir| with_trailing_slash(&dir))
        .collect();

    debug!(count = charts.len(), "discovered helm charts");
    Ok(kaeter_core::label::sorted_unique(charts))
}

fn find_files<F>(root: &Path, config: &DetectConfig, matches: F) -> Result<Vec<PathBuf>, ProjectError>
where
    F: Fn(&str) -> bool,
{
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() || entry.depth() == 0 {
                return true;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            !config.is_ignored(relative)
        });

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ProjectError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && entry.file_name().to_str().is_some_and(&matches) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// Directory containing `file`, relative to `root` and `/`-separated, `.` for
/// the root itself.
fn relative_parent(root: &Path, file: &Path) -> String {
    let parent = file.parent().unwrap_or(root);
    let relative = parent.strip_prefix(root).unwrap_or(parent);
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, path: &str, content: &str) -> anyhow::Result<()> {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)?;
        Ok(())
    }

    const MAKEFILE_MODULE: &str = "id: ch.open.tools:api\ntype: Makefile\nversioning: SemVer\n";

    #[test]
    fn parse_descriptor_reads_id_type_and_annotations() -> anyhow::Result<()> {
        let content = r"
id: ch.open.tools:api
type: Makefile
versioning: SemVer
versions:
  0.1.0: 2023-01-01T00:00:00Z||abc
metadata:
  annotations:
    open.ch/owner: platform
";

        let module = parse_descriptor(content, Path::new("versions.yaml"), "services/api")?;

        assert_eq!(module.id, "ch.open.tools:api");
        assert_eq!(module.path, "services/api");
        assert_eq!(module.module_type, ModuleType::Makefile);
        let annotations = module.annotations.expect("annotations present");
        assert_eq!(annotations["open.ch/owner"], "platform");
        Ok(())
    }

    #[test]
    fn parse_descriptor_requires_id() {
        let result = parse_descriptor("type: Makefile\n", Path::new("versions.yaml"), ".");

        assert!(matches!(
            result,
            Err(ProjectError::MissingField { field: "id", .. })
        ));
    }

    #[test]
    fn parse_descriptor_keeps_unknown_types() -> anyhow::Result<()> {
        let module = parse_descriptor("id: web\ntype: Npm\n", Path::new("versions.yaml"), "web")?;

        assert_eq!(module.module_type, ModuleType::Other("Npm".to_string()));
        assert!(module.annotations.is_none());
        Ok(())
    }

    #[test]
    fn discovers_modules_in_nested_directories() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(&dir, "services/api/versions.yaml", MAKEFILE_MODULE)?;
        write(&dir, "web/versions.yml", "id: web\ntype: Npm\n")?;
        write(&dir, "versions.yaml", "id: root\ntype: Makefile\n")?;

        let modules = discover_modules(dir.path(), &DetectConfig::default())?;

        let mut paths: Vec<_> = modules.iter().map(|m| m.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec![".", "services/api", "web"]);
        Ok(())
    }

    #[test]
    fn invalid_descriptors_are_skipped() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(&dir, "good/versions.yaml", MAKEFILE_MODULE)?;
        write(&dir, "bad/versions.yaml", "id: [unterminated\n")?;
        write(&dir, "incomplete/versions.yaml", "type: Makefile\n")?;

        let modules = discover_modules(dir.path(), &DetectConfig::default())?;

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].path, "good");
        Ok(())
    }

    #[test]
    fn duplicate_ids_keep_first_module() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(&dir, "a/versions.yaml", MAKEFILE_MODULE)?;
        write(&dir, "b/versions.yaml", MAKEFILE_MODULE)?;

        let modules = discover_modules(dir.path(), &DetectConfig::default())?;

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].path, "a");
        Ok(())
    }

    #[test]
    fn ignored_directories_are_not_walked() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(&dir, "web/node_modules/dep/versions.yaml", MAKEFILE_MODULE)?;
        write(&dir, "bazel-out/k8/versions.yaml", MAKEFILE_MODULE)?;

        let modules = discover_modules(dir.path(), &DetectConfig::default())?;

        assert!(modules.is_empty());
        Ok(())
    }

    #[test]
    fn discovers_charts_with_trailing_slash() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(&dir, "charts/api/Chart.yaml", "name: api\n")?;
        write(&dir, "charts/web/Chart.yaml", "name: web\n")?;
        write(&dir, "charts/web/templates/deployment.yaml", "kind: Deployment\n")?;

        let charts = discover_charts(dir.path(), &DetectConfig::default())?;

        assert_eq!(charts, vec!["charts/api/", "charts/web/"]);
        Ok(())
    }
}
