//! # Trie (C2)
//!
//! A case-insensitive prefix index over a corpus of strings. Comparisons
//! walk the lowercased form of each word; terminal nodes store the original
//! casing so lookups can return display-ready text. Append-only: there is
//! no remove operation, matching the corpus's own "populated once, immutable
//! thereafter" lifecycle (§3).

use std::collections::BTreeMap;

#[derive(Default)]
struct Node {
    // BTreeMap keeps children in a deterministic, first-insert-independent
    // order impossible to rely on for *insertion* order — so we additionally
    // track insertion order explicitly below for DFS determinism.
    children: BTreeMap<char, usize>,
    insertion_order: Vec<char>,
    terminal_word: Option<String>,
}

/// A case-insensitive prefix tree.
pub struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::default()],
        }
    }

    /// Insert `word`, indexed by its lowercased form. O(|word|).
    ///
    /// First-insert-wins: children are visited in the order they were first
    /// created, which makes `prefix_search`'s DFS order deterministic and
    /// tied to insertion order rather than character value.
    pub fn insert(&mut self, word: &str) {
        let mut cur = 0usize;
        for c in word.to_lowercase().chars() {
            cur = match self.nodes[cur].children.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[cur].children.insert(c, next);
                    self.nodes[cur].insertion_order.push(c);
                    next
                }
            };
        }
        if self.nodes[cur].terminal_word.is_none() {
            self.nodes[cur].terminal_word = Some(word.to_string());
        }
    }

    /// Walk by lowercased `prefix`; if the path breaks, return no matches.
    /// Otherwise collect terminal words beneath that node in DFS order
    /// (insertion order at each level), stopping at `limit`.
    pub fn prefix_search(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut cur = 0usize;
        for c in prefix.to_lowercase().chars() {
            match self.nodes[cur].children.get(&c) {
                Some(&next) => cur = next,
                None => return Vec::new(),
            }
        }
        let mut out = Vec::new();
        self.collect_dfs(cur, limit, &mut out);
        out
    }

    fn collect_dfs(&self, node: usize, limit: usize, out: &mut Vec<String>) {
        if out.len() >= limit {
            return;
        }
        if let Some(word) = &self.nodes[node].terminal_word {
            out.push(word.clone());
            if out.len() >= limit {
                return;
            }
        }
        for c in &self.nodes[node].insertion_order {
            let child = self.nodes[node].children[c];
            self.collect_dfs(child, limit, out);
            if out.len() >= limit {
                return;
            }
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}
