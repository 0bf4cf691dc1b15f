//! # Main — CLI Entry Point
//!
//! Parses configuration, initialises structured logging, and starts the
//! HTTP server that implements the `/search`, `/api/suggest`, and
//! `/opensearch.xml` external interfaces (§6).

mod cli;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    cli::run()
}
