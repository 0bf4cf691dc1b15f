//! # N-gram index (C4)
//!
//! Character-trigram inverted index with Jaccard scoring. Grams are
//! length-3 windows over `$<lowercase(word)>$`: the `$` boundary sentinels
//! make the first and last two characters of a word contribute a
//! distinctive gram, the way the teacher's corpus-scanning layers treat
//! prefixes and suffixes as first-class signal.

use std::collections::{HashMap, HashSet};

pub struct NgramIndex {
    n: usize,
    /// gram -> candidate words containing it.
    postings: HashMap<String, Vec<String>>,
}

/// A scored n-gram match.
#[derive(Debug, Clone, PartialEq)]
pub struct NgramMatch {
    pub word: String,
    pub jaccard: f64,
}

/// Noise floor below which a candidate is not worth returning (§4.4).
const JACCARD_FLOOR: f64 = 0.1;

impl NgramIndex {
    /// Build an index over `corpus` using grams of length `n` (3 per §4.4).
    pub fn build(corpus: &[String], n: usize) -> Self {
        let mut postings: HashMap<String, Vec<String>> = HashMap::new();
        for word in corpus {
            for gram in grams(word, n) {
                postings.entry(gram).or_default().push(word.clone());
            }
        }
        NgramIndex { n, postings }
    }

    /// Jaccard-ranked search: shared grams over the union of query and
    /// candidate gram sets, discarding anything at or below the noise floor.
    pub fn search(&self, query: &str, limit: usize) -> Vec<NgramMatch> {
        let query_grams: HashSet<String> = grams(query, self.n).into_iter().collect();
        if query_grams.is_empty() {
            return Vec::new();
        }

        let mut shared_counts: HashMap<&str, usize> = HashMap::new();
        for g in &query_grams {
            if let Some(words) = self.postings.get(g) {
                for w in words {
                    *shared_counts.entry(w.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut out: Vec<NgramMatch> = shared_counts
            .into_iter()
            .filter_map(|(word, shared)| {
                let candidate_grams = grams(word, self.n).len();
                let union = query_grams.len() + candidate_grams - shared;
                if union == 0 {
                    return None;
                }
                let jaccard = shared as f64 / union as f64;
                if jaccard > JACCARD_FLOOR {
                    Some(NgramMatch {
                        word: word.to_string(),
                        jaccard,
                    })
                } else {
                    None
                }
            })
            .collect();

        out.sort_by(|a, b| b.jaccard.partial_cmp(&a.jaccard).unwrap_or(std::cmp::Ordering::Equal));
        out.truncate(limit);
        out
    }
}

/// Length-`n` character windows over `$<lowercase(word)>$`.
fn grams(word: &str, n: usize) -> Vec<String> {
    let padded: Vec<char> = std::iter::once('$')
        .chain(word.to_lowercase().chars())
        .chain(std::iter::once('$'))
        .collect();
    if padded.len() < n {
        return Vec::new();
    }
    (0..=padded.len() - n)
        .map(|i| padded[i..i + n].iter().collect())
        .collect()
}
