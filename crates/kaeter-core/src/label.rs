//! Helpers for relating Bazel labels and repository-relative paths.
//!
//! Everything in here is pure string manipulation: no filesystem access and no
//! calls into Bazel.

use std::collections::{BTreeSet, HashSet};

use crate::error::{LabelError, Result};

/// Prefix of every fully-qualified label in the main repository.
pub const LABEL_PREFIX: &str = "//";

/// Prefix of labels that originate from an external repository.
pub const EXTERNAL_PREFIX: char = '@';

#[must_use]
pub fn is_external(label: &str) -> bool {
    label.starts_with(EXTERNAL_PREFIX)
}

#[must_use]
pub fn is_qualified(label: &str) -> bool {
    label.starts_with(LABEL_PREFIX)
}

/// Converts a source file label such as `//pkg/sub:file.go` into the path
/// `pkg/sub/file.go`. Files in the root package (`//:file.go`) map to
/// `file.go`.
#[must_use]
pub fn label_to_path(label: &str) -> String {
    let stripped = label.trim_start_matches('/');
    match stripped.strip_prefix(':') {
        Some(root_file) => root_file.to_string(),
        None => stripped.replacen(':', "/", 1),
    }
}

/// Splits a fully-qualified label into its package and target name.
///
/// A label without a colon uses the shorthand form where the target name is
/// the last package segment (`//foo/bar` is `//foo/bar:bar`).
///
/// # Errors
///
/// Returns [`LabelError::NotQualified`] if the label does not start with `//`
/// and [`LabelError::AmbiguousSeparator`] if it contains more than one colon.
pub fn split_label(label: &str) -> Result<(&str, &str)> {
    if !is_qualified(label) {
        return Err(LabelError::NotQualified(label.to_string()));
    }

    match label.split_once(':') {
        Some((_, name)) if name.contains(':') => {
            Err(LabelError::AmbiguousSeparator(label.to_string()))
        }
        Some((package, name)) => Ok((package, name)),
        None => {
            let name = label.rsplit('/').next().unwrap_or_default();
            Ok((label, name))
        }
    }
}

/// # Errors
///
/// See [`split_label`].
pub fn package_of(label: &str) -> Result<&str> {
    split_label(label).map(|(package, _)| package)
}

/// Projects targets onto their packages, keeping the first occurrence of each
/// package.
///
/// # Errors
///
/// Returns the first [`LabelError`] produced while splitting a target.
pub fn packages_of<'a, I>(targets: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    let mut packages = Vec::new();
    for target in targets {
        let package = package_of(target)?;
        if seen.insert(package) {
            packages.push(package.to_string());
        }
    }
    Ok(packages)
}

/// Returns the package label for a directory relative to the repository root,
/// `//` for the root itself.
#[must_use]
pub fn package_label(relative_dir: &str) -> String {
    let trimmed = relative_dir.trim_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        LABEL_PREFIX.to_string()
    } else {
        format!("{LABEL_PREFIX}{trimmed}")
    }
}

#[must_use]
pub fn with_trailing_slash(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

/// Whether `path` lies inside the directory `dir` (both repository-relative).
///
/// The match is a plain string prefix test against `dir` with a trailing
/// slash, so `app` does not claim `application/main.go`. The repository root
/// (empty or `.`) contains every path.
#[must_use]
pub fn is_within(path: &str, dir: &str) -> bool {
    let dir = dir.trim_start_matches("./");
    if dir.is_empty() || dir == "." {
        return true;
    }
    path.starts_with(&with_trailing_slash(dir))
}

/// Collects into an ascending, duplicate-free list.
#[must_use]
pub fn sorted_unique<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
