//! # Search redirect handler (§6 `/search`)
//!
//! Resolves a submitted query via the bang registry (C1) and issues a 302
//! redirect to the resolved destination. Resolution never fails — an
//! absent or malformed `q` resolves to the default bang's home URL, the
//! same as any other unmatched query.

use super::AppState;
use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

pub async fn handler_search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Redirect {
    let target = state.bangs.resolve(&params.q);
    Redirect::to(&target)
}
