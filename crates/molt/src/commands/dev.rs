//! Development command: watch, rebuild, serve.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

use molt_site::Site;

use crate::commands::build::load_site_config;
use crate::watch::FileWatcher;

/// Run the dev command.
///
/// Performs an initial build, serves the build directory, and rebuilds
/// from scratch whenever a source tree changes. A failed rebuild logs the
/// error and leaves the previous output in place.
pub async fn run(config_path: PathBuf, port: u16, open_browser: bool) -> Result<()> {
    let config = load_site_config(&config_path)?;

    rebuild(&config_path);

    let watch_paths = vec![
        config.content_path.clone(),
        config.data_path.clone(),
        config.templates_path.clone(),
        config.scss_path.clone(),
        config.css_path.clone(),
        config.js_path.clone(),
        config.assets_path.clone(),
    ];

    let (_watcher, mut rx) = FileWatcher::new(&watch_paths)?;

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!(
        "Serving {} at http://{}",
        config.build_path.display(),
        addr
    );

    let serve_dir = config.build_path.clone();
    let app = Router::new().fallback_service(ServeDir::new(serve_dir));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    if open_browser {
        let _ = open::that(format!("http://{}", addr));
    }

    while let Some(event) = rx.recv().await {
        tracing::info!("Change detected: {:?}", event);
        rebuild(&config_path);
    }

    Ok(())
}

/// Run one full build, logging instead of propagating failures so the
/// dev loop keeps running.
fn rebuild(config_path: &Path) {
    let result = load_site_config(config_path)
        .and_then(|config| Site::load(config).map_err(Into::into))
        .and_then(|site| site.build().map_err(Into::into));

    match result {
        Ok(report) => {
            tracing::info!(
                "Built {} pages in {}ms",
                report.pages_built,
                report.duration_ms
            );
        }
        Err(e) => {
            tracing::error!("Build failed: {:#}", e);
        }
    }
}
