//! Output tree writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Map a slug back onto the output root.
///
/// The inverse of slug resolution: `blog/post` becomes
/// `<build>/blog/post.html`, and the empty root slug becomes
/// `<build>/index.html`.
pub fn output_path(build_root: &Path, slug: &str) -> PathBuf {
    if slug.is_empty() {
        return build_root.join("index.html");
    }

    let mut path = build_root.to_path_buf();
    let mut segments = slug.split('/').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.html"));
        }
    }

    path
}

/// Write one rendered page, creating intermediate directories.
/// Existing files are overwritten.
pub fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::write(parent, e))?;
    }

    fs::write(path, html).map_err(|e| BuildError::write(path, e))
}
