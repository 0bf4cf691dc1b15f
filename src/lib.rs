//! # shortbang — Core Library
//!
//! A bang-style search shortcut resolver and autocomplete engine, in the
//! spirit of DuckDuckGo's `!bangs`: a query like `!gh tower-rs/tower` resolves
//! to a concrete destination URL without ever leaving the local process, and
//! a partial query like `!g rust web` drives a ranked, multi-source
//! suggestion list.
//!
//! ## Module organization
//!
//! **Core engine** (pure, synchronous, no I/O):
//! - [`bang`] — the bang registry and the `!trigger rest` resolver
//! - [`trie`] — arena-indexed prefix trie over the suggestion corpus
//! - [`edit_distance`] — OSA edit distance and bounded fuzzy matching
//! - [`ngram`] — character-trigram Jaccard similarity index
//! - [`predict`] — fuses the above into one ranked, source-tagged list
//! - [`dedup`] — normalised-key deduplicating sink
//! - [`cache`] — bounded TTL cache shared by the external suggestions client
//!
//! **Service layer** (async, I/O-bound):
//! - [`suggest_client`] — external suggestions fetch behind a hard deadline
//! - [`config`] — CLI/env configuration surface
//! - [`error`] — typed upstream error taxonomy
//! - [`prom_metrics`] — Prometheus counters and histograms
//! - [`dashboard`] — the Axum router, handlers, and shared application state
//!
//! ## Design philosophy
//!
//! Nothing in the core engine ever fails: a lookup either produces a
//! prediction or it doesn't. Fallibility lives entirely at the service edge —
//! the external suggestions fetch — and is always collapsed to "no
//! suggestions" before it reaches a response body.

pub mod bang;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod dedup;
pub mod edit_distance;
pub mod error;
pub mod ngram;
pub mod predict;
pub mod prom_metrics;
pub mod suggest_client;
pub mod trie;
