//! # Error Taxonomy
//!
//! Internal error types for the suggestion pipeline. None of these ever
//! escape the `/api/suggest` handler as a failed HTTP response — callers
//! collapse every variant to an empty result, per the "zero user-visible
//! failures" contract. The typed distinction exists for logging and metrics
//! only: it lets us log a meaningful `warn!` without guessing at a
//! `reqwest::Error`'s shape at the call site.

use std::time::Duration;

/// Failure modes for a single external-suggestions fetch.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    #[error("upstream returned a non-2xx status: {0}")]
    Status(u16),

    #[error("upstream response did not match the expected [query, [string...]] shape")]
    MalformedBody,
}
