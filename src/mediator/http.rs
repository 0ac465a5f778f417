//! HTTP transport for the mediator. Maps HTTP requests to JSON dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:request`: dispatch a request by name. Body = JSON input.
//! - `GET /health`: `{ "ok": true, "requests": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let mediator = Arc::new(games_cqrs::in_memory());
//! let app = games_cqrs::mediator::router(mediator.clone());
//! games_cqrs::mediator::serve(mediator, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::mediator::{error_body, Mediator};

/// Build an axum `Router` that dispatches requests via the given mediator.
pub fn router<S: Send + Sync + 'static>(mediator: Arc<Mediator<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:request", post(request_handler))
        .with_state(mediator)
}

/// Serve the mediator over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: Send + Sync + 'static>(
    mediator: Arc<Mediator<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(mediator);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}

/// `GET /health`
async fn health_handler<S: Send + Sync + 'static>(
    State(mediator): State<Arc<Mediator<S>>>,
) -> impl IntoResponse {
    let mut requests = mediator.requests();
    requests.sort_unstable();
    Json(json!({ "ok": true, "requests": requests }))
}

/// `POST /:request`
async fn request_handler<S: Send + Sync + 'static>(
    State(mediator): State<Arc<Mediator<S>>>,
    Path(request): Path<String>,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    match mediator.dispatch(&request, input) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(error_body(&e))).into_response()
        }
    }
}
