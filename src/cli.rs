//! # CLI Execution
//!
//! Extracted from `main.rs` to keep the entry point slim: logging setup,
//! configuration parsing, and handing off to the Tokio runtime.

use anyhow::Result;
use clap::Parser;
use shortbang::config::Config;

/// Parse configuration, initialise logging, and run the HTTP server until
/// it exits (normally only on a fatal bind error or signal).
pub fn run() -> Result<()> {
    let _ = dotenvy::dotenv();

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let config = Config::parse();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(shortbang::dashboard::run(config))
}
