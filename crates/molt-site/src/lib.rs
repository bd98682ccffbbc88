//! Content-to-site build pipeline.
//!
//! Discovers content and shared-data files, parses them into typed
//! models, resolves a template per entry, renders through minijinja and
//! emits a mirrored output tree. One build invocation runs start to
//! finish with no persisted intermediate state.

pub mod assets;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod site;
pub mod sitemap;
pub mod slug;
pub mod templates;
pub mod writer;

pub use config::{ScssStyle, SiteConfig};
pub use error::BuildError;
pub use site::{BuildReport, Site};
pub use sitemap::{ContentEntry, Sitemap};
pub use templates::TemplateSet;
