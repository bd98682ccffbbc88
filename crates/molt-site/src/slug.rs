//! Path-to-slug resolution.
//!
//! A slug is the canonical identity of a content entry: the file's path
//! relative to its root, extensions stripped, separators normalized to
//! `/`, and an `index` filename collapsed to its directory's own slug
//! (`section/index` and `section` are the same identity).

use std::path::{Component, Path};

use crate::error::BuildError;

/// Suffixes stripped from content file names when deriving the slug.
/// Content files carry `.md` plus an optional inner structured suffix
/// (`post.json.md`), data files carry `.json`.
const STRIP_SUFFIXES: &[&str] = &["md", "json"];

/// Derive the slug for `path` relative to `root`.
///
/// Fails with `InvalidPath` if the path lies outside the declared root.
/// The root itself and a root-level `index` file both map to the empty
/// slug.
pub fn slug_for(path: &Path, root: &Path) -> Result<String, BuildError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| BuildError::InvalidPath {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let mut segments: Vec<String> = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(seg) => {
                segments.push(seg.to_string_lossy().into_owned());
            }
            Component::CurDir => {}
            _ => {
                return Err(BuildError::InvalidPath {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                });
            }
        }
    }

    if let Some(last) = segments.pop() {
        let stem = strip_suffixes(&last);
        if stem != "index" {
            segments.push(stem.to_string());
        }
    }

    Ok(segments.join("/"))
}

/// Strip recognized trailing suffixes from a file name (`post.json.md`
/// becomes `post`). Unrecognized suffixes stay (`archive.tar` keeps its
/// dot).
pub fn strip_suffixes(name: &str) -> &str {
    let mut stem = name;

    while let Some((head, ext)) = stem.rsplit_once('.') {
        if head.is_empty() || !STRIP_SUFFIXES.contains(&ext) {
            break;
        }
        stem = head;
    }

    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn derives_slug_from_nested_path() {
        let root = PathBuf::from("/site/content");

        let slug = slug_for(&root.join("blog/post.json.md"), &root).unwrap();

        assert_eq!(slug, "blog/post");
    }

    #[test]
    fn strips_single_extension() {
        let root = PathBuf::from("/site/content");

        let slug = slug_for(&root.join("about.md"), &root).unwrap();

        assert_eq!(slug, "about");
    }

    #[test]
    fn collapses_index_to_directory_slug() {
        let root = PathBuf::from("/site/content");

        let section = slug_for(&root.join("section/index.json.md"), &root).unwrap();
        let top = slug_for(&root.join("index.md"), &root).unwrap();

        assert_eq!(section, "section");
        assert_eq!(top, "");
    }

    #[test]
    fn rejects_path_outside_root() {
        let root = PathBuf::from("/site/content");

        let result = slug_for(Path::new("/site/other/post.md"), &root);

        assert!(matches!(result, Err(BuildError::InvalidPath { .. })));
    }

    #[test]
    fn slug_is_stable_across_calls() {
        let root = PathBuf::from("/site/content");
        let path = root.join("docs/guide.json.md");

        assert_eq!(
            slug_for(&path, &root).unwrap(),
            slug_for(&path, &root).unwrap()
        );
    }

    #[test]
    fn keeps_unrecognized_suffixes() {
        assert_eq!(strip_suffixes("notes.2024.md"), "notes.2024");
        assert_eq!(strip_suffixes("site.json"), "site");
        assert_eq!(strip_suffixes(".hidden"), ".hidden");
    }
}
