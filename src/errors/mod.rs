//! Error types for the scanproxy library.
//!
//! This module follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`ScrapeError`],
//!   [`ConfigError`])
//! - **Unified error type** ([`ProxyError`]) for callers that do not need to
//!   distinguish between error sources
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use scanproxy::{ExplorerService, ScrapeError};
//!
//! async fn example(service: &ExplorerService) {
//!     match service.holders("eth", "0xdac17f958d2ee523a2206206994597c13d831ec7").await {
//!         Ok(holders) => println!("{} holders", holders.len()),
//!         Err(ScrapeError::UnsupportedNetwork { network }) => {
//!             eprintln!("Unknown network: {}", network);
//!         }
//!         Err(e) if e.is_transient() => eprintln!("Explorer unavailable: {}", e),
//!         Err(e) => eprintln!("Other error: {}", e),
//!     }
//! }
//! ```

mod config;
mod scrape;

pub use config::ConfigError;
pub use scrape::ScrapeError;

/// Unified error type for all scanproxy operations.
///
/// All module-specific error types convert to `ProxyError` via `From`
/// implementations, so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Error from resolving a network or scraping an explorer.
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Error from loading configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
