//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing molt site...");

    let config_path = Path::new("molt.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write molt.toml")?;
        tracing::info!("Created molt.toml");
    }

    for dir in ["content", "templates", "data/globals", "scss", "js", "assets"] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {dir} directory"))?;
    }

    let starters = [
        ("content/index.json.md", DEFAULT_INDEX),
        ("templates/index.html", DEFAULT_TEMPLATE),
        ("data/globals/site.json", DEFAULT_SITE_DATA),
        ("scss/main.scss", DEFAULT_SCSS),
    ];

    for (path, contents) in starters {
        let path = Path::new(path);
        if !path.exists() || yes {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'molt dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Molt configuration
# Every key is optional; the values below are the defaults.

build_path = "./build"
content_path = "./content"
data_path = "./data"
templates_path = "./templates"
js_path = "./js"
assets_path = "./assets"
css_path = "./css"
scss_path = "./scss"
scss_active = true
scss_output_style = "compressed"
data_in_build = false
"#;

const DEFAULT_INDEX: &str = r#"{"title": "Welcome"}

# Welcome

This site is built with **molt**.

Edit `content/index.json.md` to change this page. The JSON object at the
top is the page's metadata; everything after it is Markdown.
"#;

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ metadata.title }} - {{ data.globals.site.name }}</title>
  <link rel="stylesheet" href="/css/main.css">
</head>
<body>
  <main>
    {{ content | safe }}
  </main>
</body>
</html>
"#;

const DEFAULT_SITE_DATA: &str = r#"{
  "name": "My Site"
}
"#;

const DEFAULT_SCSS: &str = r#"$text: #1a1a1a;
$background: #ffffff;

body {
  font-family: system-ui, sans-serif;
  color: $text;
  background: $background;
  max-width: 42rem;
  margin: 0 auto;
  padding: 2rem 1rem;
}
"#;
