//! Site build configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for building a site.
///
/// Constructed once per build and passed by reference into every component
/// that needs path or flag information; there is no process-wide config
/// state. Serialized into the render context as the read-only `config`
/// binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Output directory for the built site
    pub build_path: PathBuf,

    /// Source directory for content files
    pub content_path: PathBuf,

    /// Source directory for shared data files
    pub data_path: PathBuf,

    /// Source directory for templates
    pub templates_path: PathBuf,

    /// Source directory for JavaScript files
    pub js_path: PathBuf,

    /// Source directory for static assets
    pub assets_path: PathBuf,

    /// Source directory for plain CSS (ignored when scss_active is set)
    pub css_path: PathBuf,

    /// Source directory for SCSS files
    pub scss_path: PathBuf,

    /// Compile SCSS instead of copying plain CSS
    pub scss_active: bool,

    /// Output style passed to the SCSS compiler
    pub scss_output_style: ScssStyle,

    /// Serialize the shared data tree into the output tree for
    /// client-side access
    pub data_in_build: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            build_path: PathBuf::from("./build"),
            content_path: PathBuf::from("./content"),
            data_path: PathBuf::from("./data"),
            templates_path: PathBuf::from("./templates"),
            js_path: PathBuf::from("./js"),
            assets_path: PathBuf::from("./assets"),
            css_path: PathBuf::from("./css"),
            scss_path: PathBuf::from("./scss"),
            scss_active: true,
            scss_output_style: ScssStyle::Compressed,
            data_in_build: false,
        }
    }
}

/// Output style for the external SCSS compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScssStyle {
    Compressed,
    Nested,
    Expanded,
}

impl ScssStyle {
    /// Value passed on the compiler command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compressed => "compressed",
            Self::Nested => "nested",
            Self::Expanded => "expanded",
        }
    }
}
