//! Span creation helpers for scanproxy operations.
//!
//! Telemetry concerns are kept out of business logic: each instrumented
//! operation has a span helper here, and the operation attaches it with
//! [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param))
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::network::Network;

/// Create span for a single explorer page request.
///
/// Parent: fetch_holders or fetch_abi span
#[inline]
pub(crate) fn fetch_page(url: &str) -> Span {
    tracing::debug_span!("scanproxy.fetch_page", url = %url)
}

/// Create span for scraping a token holders page.
///
/// Parent: service holders span
/// Children: fetch_page spans (one per attempt)
#[inline]
pub(crate) fn fetch_holders(network: Network, token_address: &str) -> Span {
    tracing::debug_span!(
        "scanproxy.fetch_holders",
        network = %network,
        chain = %network.chain(),
        token_address = %token_address,
    )
}

/// Create span for scraping a contract ABI.
///
/// Parent: service abi span
/// Children: fetch_page spans (one per attempt)
#[inline]
pub(crate) fn fetch_abi(network: Network, address: &str) -> Span {
    tracing::debug_span!(
        "scanproxy.fetch_abi",
        network = %network,
        chain = %network.chain(),
        address = %address,
    )
}

/// Create span for a cached service lookup.
///
/// This is the root span for one API request's scrape chain.
///
/// Parent: HTTP request span
/// Children: fetch_holders or fetch_abi span on cache miss
#[inline]
pub(crate) fn service_lookup(kind: &'static str, network: &str, address: &str) -> Span {
    tracing::span!(
        Level::INFO,
        "scanproxy.service_lookup",
        kind = kind,
        network = %network,
        address = %address,
    )
}
