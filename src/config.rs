//! # Configuration surface (C10)
//!
//! CLI flags with environment-variable fallbacks, following the teacher's
//! `clap(derive, env)` pattern: every setting can be passed on the command
//! line or picked up from the environment (and, via `dotenvy` in `main`,
//! from a `.env` file), with the flag taking precedence.

use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "shortbang", about = "Bang-style search shortcut resolver and OpenSearch autocomplete service")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long = "listen", env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Upstream suggestions provider base URL (a Firefox-style `complete/search` endpoint)
    #[arg(
        long = "upstream-suggest-url",
        env = "UPSTREAM_SUGGEST_URL",
        default_value = "https://suggestqueries.google.com/complete/search"
    )]
    pub upstream_suggest_url: String,

    /// Suggestions cache entry lifetime, in seconds
    #[arg(long = "cache-ttl-secs", env = "CACHE_TTL_SECS", default_value_t = 60)]
    pub cache_ttl_secs: u64,

    /// Maximum number of distinct query/lang pairs held in the suggestions cache
    #[arg(long = "cache-capacity", env = "CACHE_CAPACITY", default_value_t = 500)]
    pub cache_capacity: usize,

    /// Hard deadline for a single external suggestions fetch, in milliseconds
    #[arg(long = "external-timeout-ms", env = "EXTERNAL_TIMEOUT_MS", default_value_t = 3_000)]
    pub external_timeout_ms: u64,
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_millis(self.external_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn defaults_parse_with_no_args() {
        let cfg = Config::parse_from(["shortbang"]);
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.cache_capacity, 500);
        assert_eq!(cfg.external_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::parse_from(["shortbang", "--listen", "127.0.0.1:9000", "--cache-ttl-secs", "120"]);
        assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(120));
    }

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }
}
