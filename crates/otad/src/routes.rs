//! API routes for otad.
//!
//! One recognized request: `GET /` returns the manifest for the current
//! update. Everything else, including other methods on `/`, is a plain 404
//! with no further detail.

use crate::manifest;
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

type AppStateArc = Arc<AppState>;

/// Query parameters recognized on the manifest endpoint.
#[derive(Debug, Deserialize)]
pub struct ManifestQuery {
    /// Opaque dogfooding identifier, passed through to the download URL.
    pub dogfood_id: Option<String>,
}

pub fn manifest_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(serve_manifest).fallback(not_found))
        .fallback(not_found)
}

async fn serve_manifest(
    State(state): State<AppStateArc>,
    Query(query): Query<ManifestQuery>,
) -> Result<Response, StatusCode> {
    // Freshness on every request: the scan runs inline, on the request's
    // critical path, under the registry lock.
    let current = {
        let mut registry = state.registry.lock().await;
        if let Err(e) = registry.scan().await {
            // A failed rescan keeps serving the last known good state.
            warn!("rescan failed, serving cached state: {:#}", e);
        }
        registry.current()
    };

    let Some(update) = current else {
        return Err(StatusCode::NOT_FOUND);
    };

    let application = update.application().await.map_err(|e| {
        error!("companion metadata for {}: {}", update.filename(), e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let hash = update.hash().await.map_err(|e| {
        error!("hashing {}: {}", update.filename(), e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let body = manifest::render(
        &update,
        application,
        hash,
        &state.base_path,
        query.dogfood_id.as_deref(),
    );
    Ok(([(header::CONTENT_TYPE, "text/xml")], body).into_response())
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
