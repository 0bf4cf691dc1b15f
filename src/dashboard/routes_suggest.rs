//! # Suggest service (C7, §4.7)
//!
//! Implements the OpenSearch suggestions wire format and orchestrates the
//! bang-aware and plain-text query paths. Every code path here ends in a
//! 200 with a valid two-element JSON array — per §7, this handler is
//! designed for zero user-visible failures.

use super::AppState;
use crate::bang::Bang;
use crate::dedup::Deduper;
use crate::predict::merge_with_external;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use serde::Deserialize;
use std::sync::Arc;

const MAX_SUGGESTIONS: usize = 8;
const MATCH_BANGS_MAX_TIER1: usize = 5;
const MATCH_BANGS_MAX_TIER2: usize = 2;
const LOCAL_PREDICT_LIMIT: usize = 8;

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    q: String,
}

/// First comma-separated tag of `Accept-Language`, quality parameter
/// stripped, defaulting to `en` on absence (§4.7).
fn parse_accept_language(headers: &HeaderMap) -> String {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .map(|tag| tag.split(';').next().unwrap_or(tag).trim().to_string())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| "en".to_string())
}

pub async fn handler_suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let query = params.q.trim();
    tracing::debug!(query, "handling suggest request");

    if query.is_empty() {
        let body = serde_json::json!(["", Vec::<String>::new()]).to_string();
        return (
            [
                (header::CONTENT_TYPE, "application/x-suggestions+json"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            body,
        );
    }

    let lang = parse_accept_language(&headers);
    let suggestions = if let Some(rest) = query.strip_prefix('!') {
        state.prom_metrics.suggest_requests.get_or_create(&crate::prom_metrics::SuggestKindLabel { kind: "bang".to_string() }).inc();
        handle_bang_query(&state, rest, &lang).await
    } else {
        state.prom_metrics.suggest_requests.get_or_create(&crate::prom_metrics::SuggestKindLabel { kind: "plain".to_string() }).inc();
        handle_plain_query(&state, query, &lang).await
    };

    let body = serde_json::json!([params.q, suggestions]).to_string();
    (
        [
            (header::CONTENT_TYPE, "application/x-suggestions+json"),
            (header::CACHE_CONTROL, "public, max-age=60, stale-while-revalidate=30"),
        ],
        body,
    )
}

/// Route A: bang-prefixed query (§4.7 A).
async fn handle_bang_query(state: &AppState, rest: &str, lang: &str) -> Vec<String> {
    let mut tokens = rest.split_whitespace();
    let bang_prefix = tokens.next().unwrap_or("");
    let text_after_bang = tokens.collect::<Vec<_>>().join(" ");

    let matches: Vec<&Bang> = state.bangs.match_bangs(bang_prefix, MATCH_BANGS_MAX_TIER1, MATCH_BANGS_MAX_TIER2);

    let mut dedup = Deduper::new();
    let mut out = Vec::new();

    for bang in &matches {
        let entry = if text_after_bang.is_empty() {
            format!("!{} — {}", bang.trigger, bang.name)
        } else {
            format!("!{} {}", bang.trigger, text_after_bang)
        };
        if dedup.admit(&entry) {
            out.push(entry);
        }
    }

    if !text_after_bang.is_empty() {
        if let Some(best) = matches.first() {
            let externals = state.suggest_client.fetch(&text_after_bang, lang).await;
            for s in externals {
                let entry = format!("!{} {}", best.trigger, s);
                if dedup.admit(&entry) {
                    out.push(entry);
                }
            }
        }
    }

    out.truncate(MAX_SUGGESTIONS);
    out
}

/// Route B: plain-text query (§4.7 B).
async fn handle_plain_query(state: &AppState, query: &str, lang: &str) -> Vec<String> {
    let (local, external) = tokio::join!(
        async { state.engine.predict(query, LOCAL_PREDICT_LIMIT) },
        state.suggest_client.fetch(query, lang),
    );

    let mut dedup = Deduper::new();
    let mut out = Vec::new();

    for s in &external {
        if dedup.admit(s) {
            out.push(s.clone());
        }
    }

    let merged = merge_with_external(local, &[], LOCAL_PREDICT_LIMIT);
    for p in merged {
        if dedup.admit(&p.text) {
            out.push(p.text);
        }
    }

    out.truncate(MAX_SUGGESTIONS);
    out
}
