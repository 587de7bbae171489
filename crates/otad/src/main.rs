//! OTA Daemon - update manifest server.
//!
//! Watches a directory of `.mar` update archives and serves the update
//! manifest for the most recently modified one.

use anyhow::{Context, Result};
use clap::Parser;
use otad::config::Cli;
use otad::registry::UpdateRegistry;
use otad::server::{self, AppState};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let directory = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let directory = directory
        .canonicalize()
        .with_context(|| format!("update directory {}", directory.display()))?;

    info!("otad v{} starting", env!("CARGO_PKG_VERSION"));
    info!("Watching {} ({} channel)", directory.display(), cli.channel);

    let registry = UpdateRegistry::bootstrap(&directory, cli.channel).await?;
    if let Some(current) = registry.current() {
        let modified: chrono::DateTime<chrono::Utc> = current.modified().into();
        info!(
            "Current update: {} ({} bytes, modified {})",
            current.filename(),
            current.size(),
            modified.to_rfc3339()
        );
    }

    // The download URL's path segment is the directory's final component.
    let base_path = directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    server::run(AppState::new(registry, base_path), cli.port).await
}
