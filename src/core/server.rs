//! HTTP API
//!
//! Read-only JSON endpoints over the catalog.
//!
//! ## Endpoints
//! - `GET /api/characters` - all characters, newest first, Trailblazers last
//! - `GET /api/character/:id` - one enriched character
//! - `GET /api/lightcones` - all lightcones, newest first, shop lightcones last
//! - `GET /api/lightcone/:id` - one enriched lightcone
//! - `GET /api/relics` - all relic sets, newest first
//! - `POST /api/markup` - translate an in-game template
//! - `GET /health` - health check

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::catalog::Catalog;
use crate::core::error::Result;
use crate::core::markup::translate;
use crate::core::models::{Character, Lightcone};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MarkupRequest {
    pub text: String,
    #[serde(default)]
    pub params: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkupResponse {
    pub html: String,
}

// ============================================================================
// Router
// ============================================================================

/// Build the API router over `catalog`.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/characters", get(list_characters))
        .route("/api/character/:id", get(get_character))
        .route("/api/lightcones", get(list_lightcones))
        .route("/api/lightcone/:id", get(get_lightcone))
        .route("/api/relics", get(list_relics))
        .route("/api/markup", post(render_markup))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
        )
        .with_state(catalog)
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    match listener.local_addr() {
        Ok(addr) => log::info!("Catalog API listening on http://{}", addr),
        Err(e) => log::warn!("Catalog API listening on unknown address: {}", e),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            log::info!("Catalog API shutting down");
        })
        .await
}

// ============================================================================
// HTTP Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_characters(State(catalog): State<Arc<Catalog>>) -> Result<Json<Vec<Value>>> {
    Ok(Json(catalog.characters().await?))
}

async fn get_character(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<Character>> {
    Ok(Json(catalog.character(&id).await?))
}

async fn list_lightcones(State(catalog): State<Arc<Catalog>>) -> Result<Json<Vec<Value>>> {
    Ok(Json(catalog.lightcones().await?))
}

async fn get_lightcone(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<Lightcone>> {
    Ok(Json(catalog.lightcone(&id).await?))
}

async fn list_relics(State(catalog): State<Arc<Catalog>>) -> Result<Json<Vec<Value>>> {
    Ok(Json(catalog.relics().await?))
}

async fn render_markup(Json(request): Json<MarkupRequest>) -> Json<MarkupResponse> {
    Json(MarkupResponse {
        html: translate(&request.text, request.params.as_deref()),
    })
}
