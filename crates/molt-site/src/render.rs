//! Page rendering through the template engine.

use std::path::Path;

use minijinja::{context, path_loader, Environment};
use serde_json::{Map, Value};

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::sitemap::{ContentEntry, Sitemap};

/// Template renderer backed by minijinja.
///
/// Templates load from the template root, so `{% include %}` and
/// `{% extends %}` across the directory work. Every invocation receives
/// exactly five bindings: `data`, `sitemap`, `config`, `metadata`,
/// `content`.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a renderer over the given template root.
    pub fn new(templates_path: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_path.to_path_buf()));

        Self { env }
    }

    /// Render one entry with the current state of the shared data tree.
    ///
    /// Renders are referentially independent given the shared inputs:
    /// nothing here observes another entry's render.
    pub fn render(
        &self,
        entry: &ContentEntry,
        data: &Map<String, Value>,
        sitemap: &Sitemap,
        config: &SiteConfig,
    ) -> Result<String, BuildError> {
        let wrap = |e: minijinja::Error| BuildError::Render {
            slug: entry.slug.clone(),
            template: entry.template.clone(),
            message: e.to_string(),
        };

        let template = self.env.get_template(&entry.template).map_err(wrap)?;

        template
            .render(context! {
                data => data,
                sitemap => sitemap,
                config => config,
                metadata => &entry.metadata,
                content => &entry.body_html,
            })
            .map_err(wrap)
    }
}
