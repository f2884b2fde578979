//! # Marquee
//!
//! Scrapes a "trending movies" chart, caches it under one key and serves it
//! over HTTP and on a timer.
//!
//! ## Architecture
//!
//! ```text
//! trigger (HTTP / timer / CLI) → Fetcher → Extractor → updater → Store → response
//! ```
//!
//! - [`fetcher`]: HTTP client with a browser-like identity
//! - [`extractor`]: CSS-selector extraction per chart source
//! - [`updater`]: merge and cache policy, writes the snapshot
//! - [`store`]: SQLite-backed key-value persistence
//! - [`server`]: axum routes
//! - [`daemon`]: scheduled trigger
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape once and print the report
//! marquee update
//!
//! # Print the cached snapshot
//! marquee show
//!
//! # Serve HTTP and refresh daily
//! marquee --source trakt serve --bind 0.0.0.0:8787
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// source, fetcher, extractor, store.
pub mod app;

/// Command-line interface using clap.
///
/// - `serve` - HTTP server plus scheduled updates
/// - `update` - One scrape, printed as a JSON report
/// - `show` - Print the cached snapshot
/// - `schedule` - Scheduled updates only
pub mod cli;

/// TOML configuration, loaded from `~/.config/marquee/config.toml`.
pub mod config;

/// Scheduled trigger running updates on an interval.
pub mod daemon;

/// Core domain models.
///
/// - [`MovieEntry`](domain::MovieEntry): One scraped chart record
/// - [`Source`](domain::Source): Which chart is scraped and how it is cached
/// - [`UpdateReport`](domain::UpdateReport): JSON outcome envelope
pub mod domain;

/// CSS-selector chart extraction.
pub mod extractor;

/// Page fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for page fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// HTTP surface built on axum.
pub mod server;

/// Key-value persistence.
///
/// - [`KvStore`](store::KvStore): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Fetch, extract, merge and cache.
pub mod updater;
