//! # Bang Registry & Resolver (C1) and Bang Match Policy (C9)
//!
//! A static, ordered catalogue of `!trigger` shortcuts and the pure function
//! that turns an address-bar query into a redirect URL. The registry is
//! built once at process start and never mutated afterwards — callers only
//! ever see `&BangRegistry`.

use std::collections::HashMap;

/// A single search-shortcut entry.
///
/// `url_template` either contains the `{{{s}}}` placeholder, or is a
/// "bare-site" template where `{{{s}}}` is appended directly after the
/// domain's path (e.g. the `ghr` repo shortcut below).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bang {
    pub trigger: &'static str,
    pub url_template: &'static str,
    pub domain: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The ordered, immutable bang catalogue plus the resolver built on top of it.
pub struct BangRegistry {
    bangs: Vec<Bang>,
    trigger_index: HashMap<&'static str, usize>,
    default_index: usize,
}

/// Placeholder substituted with the percent-encoded query remainder.
const PLACEHOLDER: &str = "{{{s}}}";

impl BangRegistry {
    /// Build the registry from the built-in catalogue (see [`default_bangs`]).
    ///
    /// Panics at startup (not at request time — per §7, initialisation
    /// failure is fatal, everything after it is infallible) if the built-in
    /// catalogue ever violates an invariant: duplicate, empty, uppercase, or
    /// whitespace-containing triggers, or a missing default.
    pub fn new() -> Self {
        Self::from_bangs(default_bangs(), DEFAULT_TRIGGER)
    }

    fn from_bangs(bangs: Vec<Bang>, default_trigger: &str) -> Self {
        let mut trigger_index = HashMap::with_capacity(bangs.len());
        for (i, b) in bangs.iter().enumerate() {
            assert!(!b.trigger.is_empty(), "bang trigger must be nonempty");
            assert!(
                b.trigger.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "bang trigger {:?} must be lowercase ASCII with no whitespace",
                b.trigger
            );
            let prior = trigger_index.insert(b.trigger, i);
            assert!(prior.is_none(), "duplicate bang trigger {:?}", b.trigger);
        }
        let default_index = *trigger_index
            .get(default_trigger)
            .unwrap_or_else(|| panic!("default bang trigger {default_trigger:?} not found in catalogue"));
        BangRegistry {
            bangs,
            trigger_index,
            default_index,
        }
    }

    /// All bangs, in registry (display priority) order.
    pub fn all(&self) -> &[Bang] {
        &self.bangs
    }

    pub fn default_bang(&self) -> &Bang {
        &self.bangs[self.default_index]
    }

    /// Exact, case-insensitive trigger lookup.
    pub fn get(&self, trigger: &str) -> Option<&Bang> {
        self.trigger_index.get(trigger).map(|&i| &self.bangs[i])
    }

    /// Resolve a freeform address-bar query to a target URL (§4.1).
    ///
    /// Pure function of `query`: no I/O, no fallible paths. Unknown
    /// triggers and malformed input fall through to the default bang
    /// rather than erroring.
    pub fn resolve(&self, query: &str) -> String {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return home_url(self.default_bang());
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let bang_token_pos = tokens.iter().position(|t| is_bang_token(t));

        let (bang, rest, had_trigger) = match bang_token_pos {
            Some(pos) => {
                let trigger = tokens[pos][1..].to_lowercase();
                let bang = self.get(&trigger).unwrap_or_else(|| self.default_bang());
                let rest = tokens
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != pos)
                    .map(|(_, t)| *t)
                    .collect::<Vec<_>>()
                    .join(" ");
                (bang, rest, true)
            }
            None => (self.default_bang(), trimmed.to_string(), false),
        };

        if rest.is_empty() {
            return if had_trigger {
                home_url(bang)
            } else {
                home_url(self.default_bang())
            };
        }

        let encoded = encode_preserving_slashes(&rest);
        bang.url_template.replace(PLACEHOLDER, &encoded)
    }

    /// Two-tier bang match policy (C9, §4.9): triggers first, then names,
    /// tier 1 never displaced by tier 2.
    pub fn match_bangs(&self, prefix: &str, max_tier1: usize, max_tier2: usize) -> Vec<&Bang> {
        let prefix = prefix.to_lowercase();
        let tier1: Vec<&Bang> = self
            .bangs
            .iter()
            .filter(|b| b.trigger.starts_with(prefix.as_str()))
            .take(max_tier1)
            .collect();

        let tier1_triggers: std::collections::HashSet<&str> =
            tier1.iter().map(|b| b.trigger).collect();

        let tier2 = self
            .bangs
            .iter()
            .filter(|b| !tier1_triggers.contains(b.trigger))
            .filter(|b| b.name.to_lowercase().starts_with(prefix.as_str()))
            .take(max_tier2);

        tier1.into_iter().chain(tier2).collect()
    }
}

impl Default for BangRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `https://<domain>` — used both as the default bang's home page and as the
/// bare-site fallback for a trigger with no remaining query text.
fn home_url(bang: &Bang) -> String {
    format!("https://{}", bang.domain)
}

/// A whitespace-delimited token matches `!<non-space>+` iff it starts with
/// `!` and has at least one more character (an empty trigger is not a bang).
fn is_bang_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('!')
}

/// RFC 3986 component-encode `s`, then restore literal `/` characters —
/// load-bearing for path-style bangs like `ghr` (`owner/repo`), per §4.1
/// step 7 and §6 "Redirect encoding".
fn encode_preserving_slashes(s: &str) -> String {
    urlencoding::encode(s).replace("%2F", "/").replace("%2f", "/")
}

const DEFAULT_TRIGGER: &str = "ddg";

/// The built-in catalogue. Also feeds the prediction engine's corpus
/// extension (names and triggers, §3 "Corpus").
pub fn default_bangs() -> Vec<Bang> {
    vec![
        Bang {
            trigger: "ddg",
            url_template: "https://duckduckgo.com/?q={{{s}}}",
            domain: "duckduckgo.com",
            name: "DuckDuckGo",
            description: "Privacy-focused web search (default engine)",
        },
        Bang {
            trigger: "g",
            url_template: "https://www.google.com/search?q={{{s}}}",
            domain: "www.google.com",
            name: "Google",
            description: "Google web search",
        },
        Bang {
            trigger: "y",
            url_template: "https://www.youtube.com/results?search_query={{{s}}}",
            domain: "www.youtube.com",
            name: "YouTube",
            description: "Search YouTube videos",
        },
        Bang {
            trigger: "w",
            url_template: "https://en.wikipedia.org/w/index.php?search={{{s}}}",
            domain: "en.wikipedia.org",
            name: "Wikipedia",
            description: "Search English Wikipedia",
        },
        Bang {
            trigger: "gh",
            url_template: "https://github.com/search?q={{{s}}}",
            domain: "github.com",
            name: "GitHub",
            description: "Search GitHub repositories and code",
        },
        Bang {
            trigger: "ghr",
            url_template: "https://github.com/{{{s}}}",
            domain: "github.com",
            name: "GitHub Repo",
            description: "Jump straight to a GitHub repo (owner/repo)",
        },
        Bang {
            trigger: "so",
            url_template: "https://stackoverflow.com/search?q={{{s}}}",
            domain: "stackoverflow.com",
            name: "Stack Overflow",
            description: "Search Stack Overflow questions",
        },
        Bang {
            trigger: "r",
            url_template: "https://www.reddit.com/search/?q={{{s}}}",
            domain: "www.reddit.com",
            name: "Reddit",
            description: "Search Reddit posts and communities",
        },
        Bang {
            trigger: "a",
            url_template: "https://www.amazon.com/s?k={{{s}}}",
            domain: "www.amazon.com",
            name: "Amazon",
            description: "Search Amazon product listings",
        },
        Bang {
            trigger: "tw",
            url_template: "https://x.com/search?q={{{s}}}",
            domain: "x.com",
            name: "X (Twitter)",
            description: "Search X / Twitter posts",
        },
        Bang {
            trigger: "npm",
            url_template: "https://www.npmjs.com/search?q={{{s}}}",
            domain: "www.npmjs.com",
            name: "npm",
            description: "Search the npm package registry",
        },
        Bang {
            trigger: "crates",
            url_template: "https://crates.io/search?q={{{s}}}",
            domain: "crates.io",
            name: "crates.io",
            description: "Search the Rust crate registry",
        },
        Bang {
            trigger: "rs",
            url_template: "https://doc.rust-lang.org/std/?search={{{s}}}",
            domain: "doc.rust-lang.org",
            name: "Rust Docs",
            description: "Search the Rust standard library docs",
        },
        Bang {
            trigger: "mdn",
            url_template: "https://developer.mozilla.org/search?q={{{s}}}",
            domain: "developer.mozilla.org",
            name: "MDN Web Docs",
            description: "Search MDN web platform documentation",
        },
        Bang {
            trigger: "maps",
            url_template: "https://www.google.com/maps/search/{{{s}}}",
            domain: "www.google.com",
            name: "Google Maps",
            description: "Search Google Maps",
        },
        Bang {
            trigger: "img",
            url_template: "https://www.google.com/search?tbm=isch&q={{{s}}}",
            domain: "www.google.com",
            name: "Google Images",
            description: "Search Google Images",
        },
        Bang {
            trigger: "news",
            url_template: "https://news.google.com/search?q={{{s}}}",
            domain: "news.google.com",
            name: "Google News",
            description: "Search Google News",
        },
        Bang {
            trigger: "tr",
            url_template: "https://translate.google.com/?text={{{s}}}",
            domain: "translate.google.com",
            name: "Google Translate",
            description: "Translate text with Google Translate",
        },
        Bang {
            trigger: "wa",
            url_template: "https://www.wolframalpha.com/input?i={{{s}}}",
            domain: "www.wolframalpha.com",
            name: "Wolfram Alpha",
            description: "Computational knowledge engine",
        },
        Bang {
            trigger: "az",
            url_template: "https://archive.org/search?query={{{s}}}",
            domain: "archive.org",
            name: "Internet Archive",
            description: "Search the Internet Archive",
        },
    ]
}
