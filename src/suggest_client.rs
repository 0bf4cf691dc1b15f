//! # External suggestions client (C6)
//!
//! Fetches autocomplete suggestions from an upstream provider (the Firefox
//! `complete/search` endpoint by default, per §6) behind a 3-second hard
//! deadline and a TTL+FIFO cache. Every failure mode — timeout, non-2xx,
//! malformed body, connectivity error — degrades to an empty result rather
//! than propagating; the typed [`SuggestError`](crate::error::SuggestError)
//! exists for logging, not for callers to match on.

use crate::cache::{cache_key, TtlCache};
use crate::error::SuggestError;
use crate::prom_metrics::Metrics;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; shortbang/0.1; +https://shortbang.dev)";
const MAX_SUGGESTIONS: usize = 10;

/// The expected `[echoedQuery, [suggestion, ...]]` upstream shape. A tuple
/// struct deserializes from a JSON array, so a body that isn't exactly
/// `[string, array-of-strings]` fails deserialization — the explicit schema
/// validation §9 asks for in place of optional-chaining over possibly-null
/// JSON.
#[derive(Debug, Deserialize)]
struct UpstreamResponse(String, Vec<String>);

pub struct SuggestClient {
    http: reqwest::Client,
    base_url: String,
    cache: TtlCache,
    deadline: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl SuggestClient {
    pub fn new(base_url: String, cache_capacity: usize, cache_ttl: Duration, deadline: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client construction should not fail");
        SuggestClient {
            http,
            base_url,
            cache: TtlCache::new(cache_capacity, cache_ttl),
            deadline,
            metrics: None,
        }
    }

    /// Attach a metrics registry; cache hit/miss and fetch latency are
    /// recorded against it from here on (C13).
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch suggestions for `query`/`lang`, collapsing every failure to an
    /// empty list (§7: "Upstream-unavailable ... local engine proceeds").
    pub async fn fetch(&self, query: &str, lang: &str) -> Vec<String> {
        match self.fetch_checked(query, lang).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(query, lang, error = %err, "external suggestions fetch failed, degrading to empty");
                if let Some(metrics) = &self.metrics {
                    metrics.external_fetch_errors.inc();
                }
                Vec::new()
            }
        }
    }

    /// Same as [`fetch`](Self::fetch) but surfaces the failure kind, for
    /// callers that want to log or count it precisely.
    async fn fetch_checked(&self, query: &str, lang: &str) -> Result<Vec<String>, SuggestError> {
        let key = cache_key(query, lang);
        if let Some(cached) = self.cache.get(&key) {
            if let Some(metrics) = &self.metrics {
                metrics.cache_hits.inc();
            }
            return Ok(cached);
        }
        if let Some(metrics) = &self.metrics {
            metrics.cache_misses.inc();
        }

        let url = format!(
            "{}?client=firefox&hl={}&q={}",
            self.base_url,
            urlencoding::encode(lang),
            urlencoding::encode(query)
        );

        // A single deadline covers the whole request — connect, headers, and
        // body — rather than resetting it per sub-step; a slow body must not
        // let the fetch run past `self.deadline` just because the headers
        // arrived quickly (§4.6/§5: one 3s hard deadline on the fetch).
        let started = std::time::Instant::now();
        let fetch = async {
            let response = self
                .http
                .get(&url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(SuggestError::Upstream)?;

            if !response.status().is_success() {
                return Err(SuggestError::Status(response.status().as_u16()));
            }

            response
                .json::<UpstreamResponse>()
                .await
                .map_err(|_| SuggestError::MalformedBody)
        };

        let parsed = match tokio::time::timeout(self.deadline, fetch).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(SuggestError::Timeout(self.deadline)),
        };
        if let Some(metrics) = &self.metrics {
            metrics.external_fetch_duration.observe(started.elapsed().as_secs_f64());
        }

        let results: Vec<String> = parsed.1.into_iter().take(MAX_SUGGESTIONS).collect();
        self.cache.insert(key, results.clone());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_body_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;
        let client = SuggestClient::new(format!("{}/complete", server.url()), 10, Duration::from_secs(60), Duration::from_secs(3));
        let results = client.fetch("rust", "en").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn non_2xx_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let client = SuggestClient::new(format!("{}/complete", server.url()), 10, Duration::from_secs(60), Duration::from_secs(3));
        let results = client.fetch("rust", "en").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn well_formed_body_is_parsed_and_truncated() {
        let mut server = mockito::Server::new_async().await;
        let suggestions: Vec<String> = (0..15).map(|i| format!("rust {i}")).collect();
        let body = serde_json::json!(["rust", suggestions]).to_string();
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        let client = SuggestClient::new(format!("{}/complete", server.url()), 10, Duration::from_secs(60), Duration::from_secs(3));
        let results = client.fetch("rust", "en").await;
        assert_eq!(results.len(), 10);
        assert_eq!(results[0], "rust 0");
    }

    #[tokio::test]
    async fn repeated_fetch_is_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!(["rust", ["rust lang"]]).to_string();
        let m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
        let client = SuggestClient::new(format!("{}/complete", server.url()), 10, Duration::from_secs(60), Duration::from_secs(3));
        let first = client.fetch("rust", "en").await;
        let second = client.fetch("rust", "en").await;
        assert_eq!(first, second);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn timeout_degrades_to_empty() {
        let client = SuggestClient::new(
            "http://10.255.255.1:1/complete".to_string(),
            10,
            Duration::from_secs(60),
            Duration::from_millis(50),
        );
        let start = std::time::Instant::now();
        let results = client.fetch("rust", "en").await;
        assert!(results.is_empty());
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
