//! Path resolution for `read_*`/`write_*` steps.
//!
//! `spec.md` §4.2 resolves every step's file path as
//! `settings.root_folder ⊕ normalize_path(file)`, where `normalize_path`
//! "converts to the host's path separators and rejects absolute/escaping
//! paths per the orchestrator's convention." The orchestrator always
//! emits forward-slash-separated, relative, non-escaping paths; this is
//! the one place in the crate that defends against a hostile or buggy
//! caller smuggling a path outside `root_folder`.

use crate::error::StructuralError;
use std::path::{Component, Path, PathBuf};

/// Normalizes an orchestrator-supplied relative path and joins it to
/// `root_folder`, rejecting any path that is absolute or that escapes
/// `root_folder` via `..`.
pub fn resolve(
    root_folder: &Path,
    file: &str,
    step_index: usize,
    step_tag: &'static str,
) -> Result<PathBuf, StructuralError> {
    let relative = normalize_path(file, step_index, step_tag)?;
    Ok(root_folder.join(relative))
}

fn normalize_path(
    file: &str,
    step_index: usize,
    step_tag: &'static str,
) -> Result<PathBuf, StructuralError> {
    let mut normalized = PathBuf::new();
    for segment in file.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(StructuralError::InvalidParameters {
                    step_index,
                    step_tag,
                    message: format!("path '{file}' escapes root_folder via '..'"),
                })
            }
            other => normalized.push(other),
        }
    }

    for component in Path::new(file).components() {
        if matches!(component, Component::Prefix(_) | Component::RootDir) {
            return Err(StructuralError::InvalidParameters {
                step_index,
                step_tag,
                message: format!("path '{file}' must be relative to root_folder"),
            });
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_path_under_root() {
        let resolved = resolve(Path::new("/data"), "inputs/a.csv", 0, "read_csv").unwrap();
        assert_eq!(resolved, PathBuf::from("/data/inputs/a.csv"));
    }

    #[test]
    fn rejects_absolute_path() {
        let err = resolve(Path::new("/data"), "/etc/passwd", 0, "read_csv").unwrap_err();
        assert!(matches!(err, StructuralError::InvalidParameters { .. }));
    }

    #[test]
    fn rejects_parent_escape() {
        let err = resolve(Path::new("/data"), "../secrets.csv", 0, "read_csv").unwrap_err();
        assert!(matches!(err, StructuralError::InvalidParameters { .. }));
    }
}
