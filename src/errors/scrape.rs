//! Error types for explorer scraping.
//!
//! This module provides the error type shared by the network resolver, the
//! scraper, and the retry and caching layers built on top of them.

use reqwest::StatusCode;

/// Errors that can occur while resolving a network or scraping an explorer page.
///
/// Errors split into two classes, reported by [`ScrapeError::is_transient`]:
///
/// - **Transient**: the upstream request failed or returned a non-success
///   status. The same request may succeed later, so the retry layer tries again.
/// - **Permanent**: the input or the page content is wrong in a way that
///   another attempt cannot fix.
///
/// "No holders found" and "no ABI published" are not errors; the scraper
/// returns an empty result for those.
///
/// # Examples
///
/// ```rust
/// use scanproxy::ScrapeError;
///
/// let error = ScrapeError::UnsupportedNetwork {
///     network: "solana".to_string(),
/// };
/// assert!(!error.is_transient());
/// assert_eq!(error.to_string(), "Unsupported network: solana");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The network identifier is not one of the supported explorers.
    #[error("Unsupported network: {network}")]
    UnsupportedNetwork {
        /// The identifier that failed to resolve
        network: String,
    },

    /// The request could not be sent or the response body could not be read.
    ///
    /// Covers connection failures, DNS errors, TLS errors and timeouts.
    #[error("Request to {url} failed")]
    Request {
        /// The URL being fetched
        url: String,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The explorer answered with a non-success HTTP status.
    #[error("Explorer returned HTTP {status} for {url}")]
    HttpStatus {
        /// The URL being fetched
        url: String,
        /// The status code returned by the explorer
        status: StatusCode,
    },

    /// A page URL could not be built from the base URL and the address.
    #[error("Invalid explorer URL {url}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to initialize HTTP client")]
    ClientInit(#[source] reqwest::Error),

    /// The ABI block was found on the page but does not contain valid JSON.
    #[error("Malformed ABI for {address}")]
    MalformedAbi {
        /// The contract address whose ABI failed to parse
        address: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl ScrapeError {
    /// Helper to create an `UnsupportedNetwork` error.
    pub fn unsupported_network(network: impl Into<String>) -> Self {
        ScrapeError::UnsupportedNetwork {
            network: network.into(),
        }
    }

    /// Helper to create a `Request` error from a client error.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        ScrapeError::Request {
            url: url.into(),
            source,
        }
    }

    /// Helper to create an `HttpStatus` error.
    pub fn http_status(url: impl Into<String>, status: StatusCode) -> Self {
        ScrapeError::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Returns `true` if retrying the same request may succeed.
    ///
    /// Network failures and non-success statuses are transient. Unknown
    /// networks, bad URLs and malformed ABI blocks are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScrapeError::Request { .. } | ScrapeError::HttpStatus { .. }
        )
    }
}
