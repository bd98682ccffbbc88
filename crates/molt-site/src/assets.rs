//! Asset, stylesheet and data-snapshot steps.
//!
//! Thin I/O around the core pipeline: static files are copied into the
//! output tree, SCSS compilation is delegated wholesale to the external
//! `sass` executable.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::error::BuildError;

/// Copy the static source trees (`assets/`, `js/`) under the build root.
/// Missing source directories are skipped.
pub fn copy_static(config: &SiteConfig) -> Result<(), BuildError> {
    copy_tree(&config.assets_path, &config.build_path.join("assets"))?;
    copy_tree(&config.js_path, &config.build_path.join("js"))?;
    Ok(())
}

/// Produce `<build>/css`: compile SCSS through the external compiler when
/// active, otherwise copy the plain CSS tree.
pub fn build_styles(config: &SiteConfig) -> Result<(), BuildError> {
    if !config.scss_active {
        return copy_tree(&config.css_path, &config.build_path.join("css"));
    }

    if !config.scss_path.exists() {
        tracing::debug!(
            "SCSS directory {} not present, skipping",
            config.scss_path.display()
        );
        return Ok(());
    }

    let out_dir = config.build_path.join("css");
    fs::create_dir_all(&out_dir).map_err(|e| BuildError::write(&out_dir, e))?;

    let output = Command::new("sass")
        .arg(format!("--style={}", config.scss_output_style.as_str()))
        .arg("--no-source-map")
        .arg(format!(
            "{}:{}",
            config.scss_path.display(),
            out_dir.display()
        ))
        .output()
        .map_err(|e| BuildError::Stylesheet(format!("failed to run sass: {e}")))?;

    if !output.status.success() {
        return Err(BuildError::Stylesheet(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(())
}

/// Serialize the shared data tree to `<build>/__data.json` for
/// client-side access. Runs against the current tree state, caller
/// mutations included.
pub fn write_data_snapshot(
    config: &SiteConfig,
    data: &Map<String, Value>,
) -> Result<(), BuildError> {
    let path = config.build_path.join("__data.json");

    let json = serde_json::to_string_pretty(data).map_err(|e| {
        BuildError::write(&path, std::io::Error::other(e))
    })?;

    fs::write(&path, json).map_err(|e| BuildError::write(&path, e))
}

/// Recursively copy a directory tree, creating destination directories.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), BuildError> {
    if !src.exists() {
        tracing::debug!("Source directory {} not present, skipping", src.display());
        return Ok(());
    }

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            BuildError::Read {
                path,
                source: e.into(),
            }
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::write(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::write(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| BuildError::write(&target, e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn copies_nested_trees() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("assets");
        let dst = temp.path().join("build/assets");
        fs::create_dir_all(src.join("img")).unwrap();
        fs::write(src.join("img/logo.svg"), "<svg/>").unwrap();
        fs::write(src.join("robots.txt"), "User-agent: *").unwrap();

        copy_tree(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("img/logo.svg")).unwrap(),
            "<svg/>"
        );
        assert_eq!(
            fs::read_to_string(dst.join("robots.txt")).unwrap(),
            "User-agent: *"
        );
    }

    #[test]
    fn missing_sources_are_skipped() {
        let temp = tempdir().unwrap();
        let config = SiteConfig {
            build_path: temp.path().join("build"),
            assets_path: temp.path().join("no-assets"),
            js_path: temp.path().join("no-js"),
            ..Default::default()
        };

        copy_static(&config).unwrap();
    }

    #[test]
    fn snapshot_reflects_current_tree() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        let config = SiteConfig {
            build_path: temp.path().join("build"),
            ..Default::default()
        };
        let data = json!({"api": {"live": true}}).as_object().cloned().unwrap();

        write_data_snapshot(&config, &data).unwrap();

        let written: Value = serde_json::from_str(
            &fs::read_to_string(config.build_path.join("__data.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written, json!({"api": {"live": true}}));
    }
}
