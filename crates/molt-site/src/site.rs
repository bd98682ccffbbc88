//! Site pipeline orchestration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use serde_json::{Map, Value};

use crate::assets;
use crate::config::SiteConfig;
use crate::data;
use crate::error::BuildError;
use crate::render::Renderer;
use crate::sitemap::{self, Sitemap};
use crate::templates::TemplateSet;
use crate::writer;

/// Result of a build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Number of pages written
    pub pages_built: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output root
    pub build_path: PathBuf,
}

/// A loaded site, ready to build.
///
/// `load` aggregates the shared data tree, discovers templates and builds
/// the sitemap; `build` renders and writes the output tree. Between the
/// two the data tree is open for mutation through [`Site::data_mut`], so
/// embedding programs can splice in externally-fetched data; the sitemap
/// is immutable once constructed. After a build the sitemap and data
/// tree stay queryable.
pub struct Site {
    config: SiteConfig,
    data: Map<String, Value>,
    templates: TemplateSet,
    sitemap: Sitemap,
    renderer: Renderer,
}

impl Site {
    /// Load data, templates and content for the given configuration.
    ///
    /// Fails fast: the first malformed file, duplicate slug or missing
    /// template aborts the load before anything is written.
    pub fn load(config: SiteConfig) -> Result<Self, BuildError> {
        let data = data::aggregate(&config.data_path)?;
        let templates = TemplateSet::discover(&config.templates_path)?;
        let sitemap = sitemap::build_sitemap(&config.content_path, &templates)?;
        let renderer = Renderer::new(&config.templates_path);

        tracing::debug!(
            "Loaded {} pages, {} templates",
            sitemap.len(),
            templates.names().len()
        );

        Ok(Self {
            config,
            data,
            templates,
            sitemap,
            renderer,
        })
    }

    /// Run a full build: assets, styles, every content page, and the
    /// optional data snapshot.
    ///
    /// The data tree is read-only for the duration of this pass. On
    /// failure, files already written stay on disk; callers wanting an
    /// atomic swap should build into a scratch directory.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.build_path)
            .map_err(|e| BuildError::write(&self.config.build_path, e))?;

        assets::copy_static(&self.config)?;
        assets::build_styles(&self.config)?;

        let mut pages_built = 0;

        for entry in self.sitemap.iter() {
            let html =
                self.renderer
                    .render(entry, &self.data, &self.sitemap, &self.config)?;

            let path = writer::output_path(&self.config.build_path, &entry.slug);
            writer::write_page(&path, &html)?;

            tracing::debug!("Wrote {}", path.display());
            pages_built += 1;
        }

        if self.config.data_in_build {
            assets::write_data_snapshot(&self.config, &self.data)?;
        }

        Ok(BuildReport {
            pages_built,
            duration_ms: start.elapsed().as_millis() as u64,
            build_path: self.config.build_path.clone(),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The shared data tree as loaded (plus any caller mutations).
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Mutable access to the shared data tree.
    ///
    /// The documented mutation window: between `load` and `build`.
    /// Renders observe whatever state the tree holds when `build` runs.
    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    pub fn sitemap(&self) -> &Sitemap {
        &self.sitemap
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use tempfile::tempdir;

    fn scaffold(root: &Path) -> SiteConfig {
        let config = SiteConfig {
            build_path: root.join("build"),
            content_path: root.join("content"),
            data_path: root.join("data"),
            templates_path: root.join("templates"),
            js_path: root.join("js"),
            assets_path: root.join("assets"),
            css_path: root.join("css"),
            scss_path: root.join("scss"),
            ..Default::default()
        };
        fs::create_dir_all(&config.content_path).unwrap();
        fs::create_dir_all(&config.templates_path).unwrap();
        config
    }

    #[test]
    fn builds_the_blog_post_example() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::create_dir_all(config.content_path.join("blog")).unwrap();
        fs::write(
            config.content_path.join("blog/post.json.md"),
            "{\"title\": \"Hi\"}\n# Hi",
        )
        .unwrap();
        fs::write(
            config.templates_path.join("a.html"),
            "<title>{{ metadata.title }}</title>{{ content | safe }}",
        )
        .unwrap();

        let site = Site::load(config.clone()).unwrap();
        let report = site.build().unwrap();

        assert_eq!(report.pages_built, 1);
        let html =
            fs::read_to_string(config.build_path.join("blog/post.html")).unwrap();
        assert!(html.contains("<title>Hi</title>"));
        assert!(html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn rebuilds_are_byte_identical() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::create_dir_all(config.data_path.join("globals")).unwrap();
        fs::write(
            config.data_path.join("globals/site.json"),
            r#"{"name": "X"}"#,
        )
        .unwrap();
        fs::write(config.content_path.join("index.md"), "# Home").unwrap();
        fs::write(config.content_path.join("about.md"), "# About").unwrap();
        fs::write(
            config.templates_path.join("page.html"),
            "{{ data.globals.site.name }}:{{ sitemap.flat | join(',') }}:{{ content | safe }}",
        )
        .unwrap();

        let first = Site::load(config.clone()).unwrap();
        first.build().unwrap();
        let index_1 = fs::read(config.build_path.join("index.html")).unwrap();
        let about_1 = fs::read(config.build_path.join("about.html")).unwrap();

        let second = Site::load(config.clone()).unwrap();
        second.build().unwrap();

        assert_eq!(
            fs::read(config.build_path.join("index.html")).unwrap(),
            index_1
        );
        assert_eq!(
            fs::read(config.build_path.join("about.html")).unwrap(),
            about_1
        );
    }

    #[test]
    fn data_mutation_before_build_is_visible_in_templates() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::write(config.content_path.join("index.md"), "# Home").unwrap();
        fs::write(
            config.templates_path.join("page.html"),
            "{{ data.api.status }}",
        )
        .unwrap();

        let mut site = Site::load(config.clone()).unwrap();
        site.data_mut()
            .insert("api".to_string(), json!({"status": "live"}));
        site.build().unwrap();

        let html = fs::read_to_string(config.build_path.join("index.html")).unwrap();
        assert_eq!(html, "live");
    }

    #[test]
    fn data_snapshot_written_when_enabled() {
        let temp = tempdir().unwrap();
        let mut config = scaffold(temp.path());
        config.data_in_build = true;
        fs::create_dir_all(&config.data_path).unwrap();
        fs::write(config.data_path.join("site.json"), r#"{"name": "X"}"#).unwrap();
        fs::write(config.content_path.join("index.md"), "# Home").unwrap();
        fs::write(config.templates_path.join("page.html"), "{{ content | safe }}")
            .unwrap();

        let site = Site::load(config.clone()).unwrap();
        site.build().unwrap();

        let snapshot: Value = serde_json::from_str(
            &fs::read_to_string(config.build_path.join("__data.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(snapshot, json!({"site": {"name": "X"}}));
    }

    #[test]
    fn failed_load_writes_nothing() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::write(config.content_path.join("bad.md"), "{broken\n# Bad").unwrap();
        fs::write(config.content_path.join("good.md"), "# Good").unwrap();
        fs::write(config.templates_path.join("page.html"), "{{ content | safe }}")
            .unwrap();

        let result = Site::load(config.clone());

        assert!(matches!(result, Err(BuildError::MalformedMetadata { .. })));
        assert!(!config.build_path.exists());
    }

    #[test]
    fn copies_assets_and_js() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::create_dir_all(&config.assets_path).unwrap();
        fs::create_dir_all(&config.js_path).unwrap();
        fs::write(config.assets_path.join("logo.svg"), "<svg/>").unwrap();
        fs::write(config.js_path.join("app.js"), "console.log(1)").unwrap();
        fs::write(config.content_path.join("index.md"), "# Home").unwrap();
        fs::write(config.templates_path.join("page.html"), "{{ content | safe }}")
            .unwrap();

        Site::load(config.clone()).unwrap().build().unwrap();

        assert!(config.build_path.join("assets/logo.svg").exists());
        assert!(config.build_path.join("js/app.js").exists());
    }
}
