//! Sitemap construction.
//!
//! Walks the content root depth-first in lexicographic order, parses each
//! content file and assembles the entries into a sitemap keyed by slug
//! plus an ordered flat list. The build fails fast on the first
//! structural error: a partial sitemap could render internal links to
//! pages that do not exist.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use molt_content::parse_document;

use crate::error::BuildError;
use crate::slug::slug_for;
use crate::templates::TemplateSet;

/// One content file, parsed and ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct ContentEntry {
    /// Canonical path-derived identity, unique across the sitemap
    pub slug: String,

    /// Source file the entry came from
    pub source: PathBuf,

    /// Front matter fields, passed through opaquely to templates
    pub metadata: Map<String, Value>,

    /// Resolved template identifier
    pub template: String,

    /// Body rendered to HTML
    pub body_html: String,
}

/// The complete collection of parsed content entries.
///
/// Read-only after construction; downstream consumers only borrow it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Sitemap {
    /// Entries keyed by slug
    pub entries: HashMap<String, ContentEntry>,

    /// Slugs in discovery order
    pub flat: Vec<String>,
}

impl Sitemap {
    pub fn get(&self, slug: &str) -> Option<&ContentEntry> {
        self.entries.get(slug)
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentEntry> {
        self.flat.iter().filter_map(|slug| self.entries.get(slug))
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

/// Build the sitemap for the content root.
///
/// Eligible files end in `.md`. Every entry gets its template assigned
/// during construction so resolution failures surface before any output
/// is written.
pub fn build_sitemap(root: &Path, templates: &TemplateSet) -> Result<Sitemap, BuildError> {
    let mut sitemap = Sitemap::default();

    if !root.exists() {
        return Err(BuildError::read(
            root,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "content directory not found",
            ),
        ));
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
        if ext != "md" {
            continue;
        }

        let slug = slug_for(path, root)?;

        if let Some(existing) = sitemap.entries.get(&slug) {
            return Err(BuildError::DuplicateSlug {
                slug,
                first: existing.source.clone(),
                second: path.to_path_buf(),
            });
        }

        let source = fs::read_to_string(path).map_err(|e| BuildError::read(path, e))?;

        let doc = parse_document(&source).map_err(|e| BuildError::MalformedMetadata {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let template = templates.resolve(&slug, &doc.metadata)?;

        tracing::debug!("Mapped {} -> '{}' ({})", path.display(), slug, template);

        sitemap.flat.push(slug.clone());
        sitemap.entries.insert(
            slug.clone(),
            ContentEntry {
                slug,
                source: path.to_path_buf(),
                metadata: doc.metadata,
                template,
                body_html: doc.body_html,
            },
        );
    }

    Ok(sitemap)
}
