//! # Prediction engine (C5)
//!
//! Fuses exact prefix scanning, trie traversal, trigram/Jaccard similarity,
//! and bounded fuzzy matching into one ranked, deduplicated, source-tagged
//! list (§4.5). Initialised once with a base corpus plus caller-supplied
//! extensions (bang triggers and names); the trie and n-gram index are
//! built at construction time and never rebuilt.

use crate::edit_distance::{default_max_distance, edit_distance, fuzzy_match};
use crate::ngram::NgramIndex;
use crate::trie::Trie;
use std::collections::{HashMap, HashSet};

/// Which layer ultimately explains a prediction's presence in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Prefix,
    Trie,
    Ngram,
    Fuzzy,
    External,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub text: String,
    pub source: Source,
    pub score: f64,
}

/// Built-in corpus of common queries (§3 "Corpus"). Extended at construction
/// time with bang triggers and names — see [`PredictionEngine::new`].
pub const BASE_CORPUS: &[&str] = &[
    "weather", "weather forecast", "weather today", "news", "maps", "translate",
    "javascript", "typescript", "python", "rust", "rust programming", "golang",
    "java", "c++", "github", "gitlab", "stack overflow", "npm", "crates.io",
    "wikipedia", "youtube", "reddit", "amazon", "twitter", "images", "video",
    "calculator", "currency converter", "unit converter", "dictionary",
    "synonym", "thesaurus", "recipe", "movies", "restaurants near me",
    "flight status", "stock price", "sports scores", "crossword", "sudoku",
];

const PREFIX_WEIGHT: f64 = 1.0;
const TRIE_WEIGHT: f64 = 0.8;
const NGRAM_WEIGHT: f64 = 0.55;
const FUZZY_WEIGHT: f64 = 0.4;
const NGRAM_BOOST_FACTOR: f64 = 0.3;
const FUZZY_BOOST_FACTOR: f64 = 0.2;

pub struct PredictionEngine {
    corpus: Vec<String>,
    trie: Trie,
    ngram: NgramIndex,
}

impl PredictionEngine {
    /// Build the engine over `base_corpus` plus `extensions` (§3: "built-in
    /// list of common queries, concatenated with extension strings").
    pub fn new(base_corpus: &[String], extensions: &[String]) -> Self {
        let mut corpus: Vec<String> = base_corpus.to_vec();
        corpus.extend(extensions.iter().cloned());

        let mut trie = Trie::new();
        for word in &corpus {
            trie.insert(word);
        }
        let ngram = NgramIndex::build(&corpus, 3);

        PredictionEngine { corpus, trie, ngram }
    }

    /// Four-layer fused prediction, ordered by descending score (§4.5).
    pub fn predict(&self, query: &str, limit: usize) -> Vec<Prediction> {
        if query.is_empty() {
            return Vec::new();
        }
        let query_lower = query.to_lowercase();
        let query_chars = query.chars().count();
        let qlen = query_chars as f64;

        // key = lowercased word; value = (score, display text)
        let mut scored: HashMap<String, (f64, String)> = HashMap::new();

        // Layer 1: linear corpus scan for startsWith(query).
        for word in &self.corpus {
            let wl = word.to_lowercase();
            if wl.starts_with(&query_lower) {
                let wlen = word.chars().count().max(1) as f64;
                let score = PREFIX_WEIGHT * (qlen / wlen);
                scored.entry(wl).or_insert((score, word.clone()));
            }
        }

        // Layer 2: Trie.prefixSearch(query, 10).
        let trie_hits = self.trie.prefix_search(query, 10);
        let trie_set: HashSet<String> = trie_hits.iter().map(|w| w.to_lowercase()).collect();
        for word in &trie_hits {
            let wl = word.to_lowercase();
            let wlen = word.chars().count().max(1) as f64;
            let score = TRIE_WEIGHT * (qlen / wlen);
            scored.entry(wl).or_insert((score, word.clone()));
        }

        // Layer 3: ngramSearch(query, 10), applied when |query| >= 2.
        if query_chars >= 2 {
            for m in self.ngram.search(query, 10) {
                let wl = m.word.to_lowercase();
                let layer_score = m.jaccard;
                match scored.get_mut(&wl) {
                    Some((existing, _)) => *existing += NGRAM_WEIGHT * layer_score * NGRAM_BOOST_FACTOR,
                    None => {
                        scored.insert(wl, (NGRAM_WEIGHT * layer_score, m.word.clone()));
                    }
                }
            }
        }

        // Layer 4: fuzzyMatch(query, corpus), applied when |query| >= 3.
        if query_chars >= 3 {
            for f in fuzzy_match(query, &self.corpus, None) {
                let wl = f.word.to_lowercase();
                let layer_score = f.score;
                match scored.get_mut(&wl) {
                    Some((existing, _)) => *existing += FUZZY_WEIGHT * layer_score * FUZZY_BOOST_FACTOR,
                    None => {
                        scored.insert(wl, (FUZZY_WEIGHT * layer_score, f.word.clone()));
                    }
                }
            }
        }

        let max_fuzzy_dist = default_max_distance(query_chars);
        let mut predictions: Vec<Prediction> = scored
            .into_iter()
            .map(|(wl, (score, text))| {
                let source = if wl.starts_with(&query_lower) {
                    Source::Prefix
                } else if trie_set.contains(&wl) {
                    Source::Trie
                } else if edit_distance(&query_lower, &wl) <= max_fuzzy_dist {
                    Source::Fuzzy
                } else {
                    Source::Ngram
                };
                Prediction { text, source, score }
            })
            .collect();

        predictions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        predictions.truncate(limit);
        predictions
    }
}

const EXTERNAL_BASE_SCORE: f64 = 0.9;
const EXTERNAL_BOOST: f64 = 0.15;

/// Merge `externals` into `local` predictions (§4.9 "merge-with-external").
///
/// An external string matching an existing local prediction (lowercased
/// exact equality) boosts that prediction's score by 0.15, clamped at 1.0,
/// rather than adding a second entry. Everything else becomes a new
/// `Source::External` prediction at the fixed base score 0.9. Result is
/// sorted descending by score and truncated to `limit`.
pub fn merge_with_external(local: Vec<Prediction>, externals: &[String], limit: usize) -> Vec<Prediction> {
    let mut by_key: HashMap<String, Prediction> =
        local.into_iter().map(|p| (p.text.to_lowercase(), p)).collect();

    for ext in externals {
        let key = ext.to_lowercase();
        match by_key.get_mut(&key) {
            Some(p) => p.score = (p.score + EXTERNAL_BOOST).min(1.0),
            None => {
                by_key.insert(
                    key,
                    Prediction {
                        text: ext.clone(),
                        source: Source::External,
                        score: EXTERNAL_BASE_SCORE,
                    },
                );
            }
        }
    }

    let mut merged: Vec<Prediction> = by_key.into_values().collect();
    merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PredictionEngine {
        let base: Vec<String> = [
            "javascript", "java", "typescript", "python", "rust programming",
            "weather", "weather forecast", "youtube",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        PredictionEngine::new(&base, &[])
    }

    #[test]
    fn exact_prefix_ranks_first_and_tagged_prefix() {
        let e = engine();
        let preds = e.predict("java", 8);
        assert!(!preds.is_empty());
        let top = &preds[0];
        assert!(top.text == "java" || top.text == "javascript");
        assert_eq!(top.source, Source::Prefix);
    }

    #[test]
    fn typo_resolves_via_fuzzy_or_ngram() {
        let e = engine();
        let preds = e.predict("javascrpt", 8);
        let hit = preds.iter().find(|p| p.text == "javascript");
        assert!(hit.is_some(), "expected javascript in {:?}", preds);
        let hit = hit.unwrap();
        assert!(matches!(hit.source, Source::Fuzzy | Source::Ngram));
        assert!(hit.score > 0.0);
    }

    #[test]
    fn results_truncated_to_limit() {
        let e = engine();
        let preds = e.predict("w", 1);
        assert!(preds.len() <= 1);
    }

    #[test]
    fn results_sorted_descending_by_score() {
        let e = engine();
        let preds = e.predict("weath", 8);
        for pair in preds.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn no_duplicate_words_across_layers() {
        let e = engine();
        let preds = e.predict("weather", 8);
        let mut seen = HashSet::new();
        for p in &preds {
            assert!(seen.insert(p.text.to_lowercase()), "duplicate: {}", p.text);
        }
    }

    #[test]
    fn empty_query_yields_no_predictions() {
        let e = engine();
        assert!(e.predict("", 8).is_empty());
    }

    #[test]
    fn short_query_skips_ngram_and_fuzzy_layers() {
        let e = engine();
        // length 1: neither ngram (>=2) nor fuzzy (>=3) apply, only
        // prefix/trie layers contribute.
        let preds = e.predict("j", 8);
        for p in &preds {
            assert!(matches!(p.source, Source::Prefix | Source::Trie));
        }
    }

    #[test]
    fn merge_with_external_boosts_matching_local() {
        let local = vec![Prediction { text: "Rust".to_string(), source: Source::Prefix, score: 0.7 }];
        let merged = merge_with_external(local, &["rust".to_string()], 8);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Rust");
        assert!((merged[0].score - 0.85).abs() < 1e-9);
    }

    #[test]
    fn merge_with_external_boost_clamps_at_one() {
        let local = vec![Prediction { text: "rust".to_string(), source: Source::Prefix, score: 0.95 }];
        let merged = merge_with_external(local, &["rust".to_string()], 8);
        assert_eq!(merged[0].score, 1.0);
    }

    #[test]
    fn merge_with_external_adds_unmatched_as_external_source() {
        let merged = merge_with_external(Vec::new(), &["golang".to_string()], 8);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::External);
        assert_eq!(merged[0].score, EXTERNAL_BASE_SCORE);
    }

    #[test]
    fn merge_with_external_truncates_to_limit() {
        let externals: Vec<String> = (0..5).map(|i| format!("word{i}")).collect();
        let merged = merge_with_external(Vec::new(), &externals, 2);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_with_external_sorts_descending() {
        let local = vec![
            Prediction { text: "a".to_string(), source: Source::Prefix, score: 0.2 },
            Prediction { text: "b".to_string(), source: Source::Prefix, score: 0.9 },
        ];
        let merged = merge_with_external(local, &[], 8);
        for pair in merged.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
