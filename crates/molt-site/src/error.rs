//! Build errors.
//!
//! Every error is fatal to the current build: the pipeline surfaces the
//! first error it hits, with enough context (path, slug, template) to
//! locate the cause, and halts. A build that visibly fails beats a site
//! with broken pages silently published.

use std::io;
use std::path::PathBuf;

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A path lies outside its declared root.
    #[error("path {path} is outside the root {root}", path = .path.display(), root = .root.display())]
    InvalidPath { path: PathBuf, root: PathBuf },

    /// A content or data file has an unparsable metadata block.
    #[error("malformed metadata in {path}: {message}", path = .path.display())]
    MalformedMetadata { path: PathBuf, message: String },

    /// Two files resolve to the same slug.
    #[error("duplicate slug '{slug}': {first} and {second}", first = .first.display(), second = .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A template identifier does not exist among discovered templates.
    #[error("template '{template}' not found (wanted by '{slug}')")]
    TemplateNotFound { slug: String, template: String },

    /// The template engine reported a syntax or binding error.
    #[error("failed to render '{slug}' with template '{template}': {message}")]
    Render {
        slug: String,
        template: String,
        message: String,
    },

    /// A file could not be read during discovery.
    #[error("failed to read {path}: {source}", path = .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A rendered file or directory could not be written.
    #[error("failed to write {path}: {source}", path = .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The external stylesheet compiler failed.
    #[error("stylesheet compilation failed: {0}")]
    Stylesheet(String),
}

impl BuildError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
