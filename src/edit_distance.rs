//! # Edit-distance matcher (C3)
//!
//! Optimal String Alignment (OSA) Damerau–Levenshtein distance: insertions,
//! deletions, substitutions, and *restricted* adjacent transpositions (each
//! character pair may be transposed at most once — this is the cheap,
//! three-row variant, not the full Damerau–Levenshtein with its larger
//! DP table). Case-insensitive throughout.

/// OSA edit distance between `a` and `b`, case-insensitive.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev2: Vec<usize> = vec![0; n + 1];
    let mut prev1: Vec<usize> = (0..=n).collect();
    let mut cur: Vec<usize> = vec![0; n + 1];

    for i in 1..=m {
        cur[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let mut best = (cur[j - 1] + 1).min(prev1[j] + 1).min(prev1[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(prev2[j - 2] + 1);
            }
            cur[j] = best;
        }
        std::mem::swap(&mut prev2, &mut prev1);
        std::mem::swap(&mut prev1, &mut cur);
    }
    prev1[n]
}

/// A fuzzy candidate with its distance from the query and derived score.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyCandidate {
    pub word: String,
    pub distance: usize,
    pub score: f64,
}

/// Default max edit distance for a query of this length, per §4.3.
pub fn default_max_distance(query_len: usize) -> usize {
    (query_len / 3).max(1)
}

/// Fuzzy-match `query` against `corpus`, per §4.3.
///
/// Pre-filters candidates by length delta before paying for the DP, then
/// keeps everything within `max_dist`, sorted ascending by distance and
/// descending by score.
pub fn fuzzy_match(query: &str, corpus: &[String], max_dist: Option<usize>) -> Vec<FuzzyCandidate> {
    let max_dist = max_dist.unwrap_or_else(|| default_max_distance(query.chars().count()));
    let query_len = query.chars().count();

    let mut out: Vec<FuzzyCandidate> = corpus
        .iter()
        .filter(|candidate| {
            let candidate_len = candidate.chars().count();
            candidate_len.abs_diff(query_len) <= max_dist
        })
        .filter_map(|candidate| {
            let distance = edit_distance(query, candidate);
            if distance <= max_dist {
                let candidate_len = candidate.chars().count();
                let denom = query_len.max(candidate_len).max(1) as f64;
                let score = 1.0 - (distance as f64 / denom);
                Some(FuzzyCandidate {
                    word: candidate.clone(),
                    distance,
                    score,
                })
            } else {
                None
            }
        })
        .collect();

    out.sort_by(|a, b| {
        a.distance.cmp(&b.distance).then_with(|| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    out
}
