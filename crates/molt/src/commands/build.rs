//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use molt_site::{Site, SiteConfig};

/// Load configuration from the config file if it exists, over documented
/// defaults. A config file that exists but is malformed is an error.
pub fn load_site_config(path: &Path) -> Result<SiteConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }

    Ok(SiteConfig::default())
}

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building site...");

    let mut config = load_site_config(config_path)?;

    if let Some(output) = output {
        config.build_path = output;
    }

    let site = Site::load(config)?;
    let report = site.build()?;

    tracing::info!(
        "Built {} pages in {}ms",
        report.pages_built,
        report.duration_ms
    );
    tracing::info!("Output: {}", report.build_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_site_config(&temp.path().join("molt.toml")).unwrap();

        assert_eq!(config.build_path, PathBuf::from("./build"));
        assert!(config.scss_active);
    }

    #[test]
    fn partial_config_file_overrides_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("molt.toml");
        fs::write(
            &path,
            "build_path = \"public\"\nscss_output_style = \"expanded\"\ndata_in_build = true\n",
        )
        .unwrap();

        let config = load_site_config(&path).unwrap();

        assert_eq!(config.build_path, PathBuf::from("public"));
        assert!(config.data_in_build);
        assert_eq!(config.content_path, PathBuf::from("./content"));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("molt.toml");
        fs::write(&path, "build_path = [not toml").unwrap();

        assert!(load_site_config(&path).is_err());
    }
}
