//! # Health & Metrics Endpoints (C14, C13)
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `GET /healthz` | Liveness — the engine singleton finished constructing at router build time, so this is always 200 once the process is serving traffic at all. |
//! | `GET /metrics` | Prometheus scraping endpoint. |

use super::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

/// Liveness probe. There is no database or other external dependency to
/// degrade against — the service either isn't running, or it's ready.
pub async fn handler_healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Prometheus metrics endpoint: renders the current registry state.
pub async fn handler_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.prom_metrics.encode();
    (
        StatusCode::OK,
        [(
            "content-type",
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    )
}
