//! HTTP server for otad.

use crate::registry::UpdateRegistry;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    /// One lock guards the cache mapping and the current pointer for the
    /// whole duration of a scan. Lazy hash/metadata resolution happens on
    /// cloned `Arc<UpdateFile>`s outside of it.
    pub registry: Mutex<UpdateRegistry>,
    /// Path segment of the advertised download URL.
    pub base_path: String,
}

impl AppState {
    pub fn new(registry: UpdateRegistry, base_path: impl Into<String>) -> Self {
        Self {
            registry: Mutex::new(registry),
            base_path: base_path.into(),
        }
    }
}

/// Build the router. Tests drive this directly on an ephemeral port.
pub fn router(state: Arc<AppState>) -> Router {
    routes::manifest_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server, blocking forever.
pub async fn run(state: AppState, port: u16) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on http://localhost:{}/", port);

    axum::serve(listener, app).await?;
    Ok(())
}
