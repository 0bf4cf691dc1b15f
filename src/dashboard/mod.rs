//! # Dashboard — HTTP Server
//!
//! Runs an Axum HTTP server exposing the three external interfaces from
//! §6: the redirect resolver (`/search`), the OpenSearch suggestions feed
//! (`/api/suggest`), and the OpenSearch descriptor (`/opensearch.xml`),
//! plus the ambient operational endpoints (`/healthz`, `/metrics`).

mod routes_health;
mod routes_opensearch;
mod routes_search;
mod routes_suggest;

use crate::bang::BangRegistry;
use crate::predict::PredictionEngine;
use crate::prom_metrics;
use crate::suggest_client::SuggestClient;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only-after-construction application state (§5 "Engine
/// singletons"). Built once at router construction time — eagerly, not
/// lazily per request — so every handler can assume it is already
/// initialised; see DESIGN.md for why this departs from spec §4.7's
/// "lazily initialised on first request" note.
pub struct AppState {
    pub bangs: BangRegistry,
    pub engine: PredictionEngine,
    pub suggest_client: SuggestClient,
    pub prom_metrics: Arc<prom_metrics::Metrics>,
}

impl AppState {
    pub fn new(config: &crate::config::Config) -> Arc<Self> {
        let bangs = BangRegistry::new();
        let extensions: Vec<String> = bangs
            .all()
            .iter()
            .flat_map(|b| [b.trigger.to_string(), b.name.to_lowercase()])
            .collect();
        let base_corpus: Vec<String> = crate::predict::BASE_CORPUS.iter().map(|s| s.to_string()).collect();
        let engine = PredictionEngine::new(&base_corpus, &extensions);
        let prom_metrics = Arc::new(prom_metrics::Metrics::new());
        let suggest_client = SuggestClient::new(
            config.upstream_suggest_url.clone(),
            config.cache_capacity,
            config.cache_ttl(),
            config.external_timeout(),
        )
        .with_metrics(Arc::clone(&prom_metrics));
        Arc::new(AppState {
            bangs,
            engine,
            suggest_client,
            prom_metrics,
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", get(routes_search::handler_search))
        .route("/api/suggest", get(routes_suggest::handler_suggest))
        .route("/opensearch.xml", get(routes_opensearch::handler_opensearch))
        .route("/healthz", get(routes_health::handler_healthz))
        .route("/metrics", get(routes_health::handler_metrics))
        .fallback(handler_not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CatchPanicLayer::new())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handler_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub async fn run(config: crate::config::Config) -> anyhow::Result<()> {
    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(&config);
    let app = build_router(state);

    tracing::info!(listen_addr = %listen_addr, "shortbang starting");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
