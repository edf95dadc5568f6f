//! Scanproxy: blockchain explorer data as cached JSON
//!
//! Scrapes token holder lists and verified contract ABIs from Etherscan-family
//! explorer sites and serves them over a small local HTTP API. Each scrape is
//! retried with exponential backoff on transient failure, and successful
//! results are kept in a bounded LRU cache per operation kind.
//!
//! # Layers
//!
//! ```text
//! api ─▶ service ─▶ cache ─▶ retry ─▶ scraper ─▶ network ─▶ explorer site
//! ```
//!
//! - [`network`]: network identifiers and explorer base URLs
//! - [`scraper`]: page fetching and pattern extraction
//! - [`retry`]: exponential backoff for transient failures
//! - [`cache`]: bounded LRU result cache
//! - [`service`]: the composition of the above
//! - [`api`]: axum routes on top of the service

pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod errors;
pub mod network;
pub mod retry;
pub mod scraper;
pub mod service;
mod spans;

pub use config::{ProxyConfig, ProxyConfigBuilder};
pub use errors::{ConfigError, ProxyError, ScrapeError};
pub use network::Network;
pub use service::{ExplorerService, ServiceStats};
