//! Template discovery and resolution.

use std::path::Path;

use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::error::BuildError;

/// The set of templates discovered under the template root.
///
/// A template's identifier is its path relative to the root with `/`
/// separators (`layouts/post.html`). Identifiers are kept in
/// lexicographic order so the fallback pick is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    names: Vec<String>,
}

impl TemplateSet {
    /// Scan the template root (nested subdirectories included) for
    /// `.html` templates.
    pub fn discover(root: &Path) -> Result<Self, BuildError> {
        let mut names = Vec::new();

        if !root.exists() {
            tracing::debug!(
                "Template directory {} not present, skipping",
                root.display()
            );
            return Ok(Self { names });
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
            if ext != "html" {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            names.push(name);
        }

        names.sort();

        Ok(Self { names })
    }

    /// Resolve the template for an entry.
    ///
    /// An explicit `template` metadata field wins and must name a
    /// discovered template. Without one the lexicographically first
    /// template is used - a convenience default for single-template
    /// sites; anything bigger should declare templates explicitly.
    pub fn resolve(
        &self,
        slug: &str,
        metadata: &Map<String, Value>,
    ) -> Result<String, BuildError> {
        if let Some(wanted) = metadata.get("template").and_then(Value::as_str) {
            if self.contains(wanted) {
                return Ok(wanted.to_string());
            }
            return Err(BuildError::TemplateNotFound {
                slug: slug.to_string(),
                template: wanted.to_string(),
            });
        }

        self.names
            .first()
            .cloned()
            .ok_or_else(|| BuildError::TemplateNotFound {
                slug: slug.to_string(),
                template: "(default)".to_string(),
            })
    }

    /// Whether the identifier exists among discovered templates.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Discovered identifiers in lexicographic order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
