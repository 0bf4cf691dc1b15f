//! # Prometheus Metrics — Exposition (C13)
//!
//! Exposes shortbang's operational metrics in the Prometheus text exposition
//! format for scraping by Prometheus, Grafana Agent, or any
//! OpenMetrics-compatible collector.
//!
//! ## Metrics exposed
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `shortbang_suggest_requests_total` | Counter | `kind` (`bang`/`plain`) | `/api/suggest` calls by routing kind |
//! | `shortbang_cache_hits_total` | Counter | — | Suggestions cache hits |
//! | `shortbang_cache_misses_total` | Counter | — | Suggestions cache misses |
//! | `shortbang_external_fetch_errors_total` | Counter | — | Failed external suggestions fetches |
//! | `shortbang_external_fetch_duration_seconds` | Histogram | — | External fetch latency |
//!
//! The `/metrics` endpoint renders the current registry state on each scrape.
//!
//! ## References
//!
//! - [Prometheus exposition format](https://prometheus.io/docs/instrumenting/exposition_formats/)

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

/// Label set distinguishing bang-prefixed from plain-text suggest requests.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct SuggestKindLabel {
    pub kind: String,
}

/// Thread-safe metrics registry for the shortbang service.
pub struct Metrics {
    pub registry: Registry,
    pub suggest_requests: Family<SuggestKindLabel, Counter>,
    pub cache_hits: Counter,
    pub cache_misses: Counter,
    pub external_fetch_errors: Counter,
    pub external_fetch_duration: Histogram,
}

impl Metrics {
    /// Create a new metrics registry with all shortbang metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let suggest_requests = Family::<SuggestKindLabel, Counter>::default();
        registry.register(
            "shortbang_suggest_requests",
            "Suggestion requests by routing kind (bang vs. plain)",
            suggest_requests.clone(),
        );

        let cache_hits = Counter::default();
        registry.register(
            "shortbang_cache_hits",
            "Suggestions cache hits",
            cache_hits.clone(),
        );

        let cache_misses = Counter::default();
        registry.register(
            "shortbang_cache_misses",
            "Suggestions cache misses",
            cache_misses.clone(),
        );

        let external_fetch_errors = Counter::default();
        registry.register(
            "shortbang_external_fetch_errors",
            "Failed external suggestions fetches",
            external_fetch_errors.clone(),
        );

        let external_fetch_duration = Histogram::new(exponential_buckets(0.01, 2.0, 10));
        registry.register(
            "shortbang_external_fetch_duration_seconds",
            "External suggestions fetch latency",
            external_fetch_duration.clone(),
        );

        Self {
            registry,
            suggest_requests,
            cache_hits,
            cache_misses,
            external_fetch_errors,
            external_fetch_duration,
        }
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        encode(&mut buf, &self.registry).expect("encoding metrics should not fail");
        buf
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_encode_returns_valid_text() {
        let m = Metrics::new();
        m.cache_hits.inc();
        m.suggest_requests
            .get_or_create(&SuggestKindLabel { kind: "bang".to_string() })
            .inc();

        let output = m.encode();
        assert!(output.contains("shortbang_cache_hits"));
        assert!(output.contains("shortbang_suggest_requests"));
        assert!(output.contains("bang"));
    }

    #[test]
    fn metrics_default_values_are_zero() {
        let m = Metrics::new();
        let output = m.encode();
        assert!(output.contains("shortbang_cache_hits"));
        assert!(output.contains("shortbang_external_fetch_errors"));
    }

    #[test]
    fn metrics_per_kind_counters_independent() {
        let m = Metrics::new();
        m.suggest_requests
            .get_or_create(&SuggestKindLabel { kind: "bang".to_string() })
            .inc_by(3);
        m.suggest_requests
            .get_or_create(&SuggestKindLabel { kind: "plain".to_string() })
            .inc_by(7);

        let output = m.encode();
        assert!(output.contains("bang"));
        assert!(output.contains("plain"));
    }

    #[test]
    fn external_fetch_duration_observations_recorded() {
        let m = Metrics::new();
        m.external_fetch_duration.observe(0.05);
        let output = m.encode();
        assert!(output.contains("shortbang_external_fetch_duration_seconds"));
    }
}
