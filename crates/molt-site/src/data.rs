//! Shared data aggregation.
//!
//! Loads a directory of JSON data files into one nested mapping that
//! mirrors the directory structure: a subdirectory becomes a nested map,
//! a file becomes a map entry keyed by its stem. Aggregation is atomic: a
//! malformed data file fails the whole load rather than silently leaving
//! a hole templates would render around.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::error::BuildError;
use crate::slug::strip_suffixes;

/// Recursively load the data root into a nested mapping.
///
/// Files are visited in lexicographic order. A missing data root yields
/// an empty tree.
pub fn aggregate(root: &Path) -> Result<Map<String, Value>, BuildError> {
    let mut tree = Map::new();

    if !root.exists() {
        tracing::debug!("Data directory {} not present, skipping", root.display());
        return Ok(tree);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            BuildError::Read {
                path,
                source: e.into(),
            }
        })?;

        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "json" {
            continue;
        }

        let text = fs::read_to_string(path).map_err(|e| BuildError::read(path, e))?;

        let value: Value =
            serde_json::from_str(&text).map_err(|e| BuildError::MalformedMetadata {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let keys = nested_keys(path, root)?;
        insert_nested(&mut tree, &keys, value, path)?;
    }

    Ok(tree)
}

/// Compute the nested key path for a data file: its parent directories
/// relative to the root, plus the file's stem.
fn nested_keys(path: &Path, root: &Path) -> Result<Vec<String>, BuildError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| BuildError::InvalidPath {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let mut keys: Vec<String> = relative
        .parent()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    keys.push(strip_suffixes(&name).to_string());

    Ok(keys)
}

/// Insert `value` at the nested key path, creating intermediate maps.
/// A key that already holds something is a conflict and fails the load.
fn insert_nested(
    tree: &mut Map<String, Value>,
    keys: &[String],
    value: Value,
    path: &Path,
) -> Result<(), BuildError> {
    let Some((last, parents)) = keys.split_last() else {
        return Ok(());
    };

    let mut branch = tree;

    for key in parents {
        let slot = branch
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));

        branch = slot
            .as_object_mut()
            .ok_or_else(|| BuildError::MalformedMetadata {
                path: path.to_path_buf(),
                message: format!("data key '{key}' conflicts with an existing file"),
            })?;
    }

    if branch.contains_key(last) {
        return Err(BuildError::MalformedMetadata {
            path: path.to_path_buf(),
            message: format!("data key '{last}' conflicts with another item"),
        });
    }

    branch.insert(last.clone(), value);
    Ok(())
}
