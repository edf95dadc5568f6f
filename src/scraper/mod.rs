// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Explorer page scraping
//!
//! The [`Scraper`] trait is the seam between the caching service and the
//! upstream explorers. [`ExplorerScraper`] is the production implementation:
//! it fetches explorer HTML with a browser-like header bundle and extracts
//! holder lists and contract ABIs from it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use scanproxy::network::{Endpoints, Network};
//! use scanproxy::scraper::{ExplorerScraper, Scraper};
//! use std::time::Duration;
//!
//! let scraper = ExplorerScraper::new(Endpoints::new(), Duration::from_secs(30))?;
//! let holders = scraper
//!     .fetch_holders(Network::Eth, "0xdac17f958d2ee523a2206206994597c13d831ec7")
//!     .await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, Instrument};

use crate::errors::ScrapeError;
use crate::network::{Endpoints, Network};
use crate::spans;

mod extract;
mod headers;

pub use extract::{extract_abi, extract_holders, find_abi_block};
pub use headers::browser_headers;

/// Source of holder lists and contract ABIs.
///
/// Implementations must be idempotent: the same inputs against an unchanged
/// upstream yield the same output. Failures should be classified through
/// [`ScrapeError::is_transient`] so the retry layer can decide whether to try
/// again.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Fetches the holder addresses listed for `token_address`.
    ///
    /// An empty list means the page was fetched but listed no holders.
    async fn fetch_holders(
        &self,
        network: Network,
        token_address: &str,
    ) -> Result<Vec<String>, ScrapeError>;

    /// Fetches the published ABI of the contract at `address`.
    ///
    /// An empty JSON array means the page was fetched but has no ABI.
    async fn fetch_abi(&self, network: Network, address: &str) -> Result<Value, ScrapeError>;
}

/// Scraper for Etherscan-family explorer sites.
#[derive(Debug, Clone)]
pub struct ExplorerScraper {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ExplorerScraper {
    /// Creates a scraper using `endpoints` for base URLs.
    ///
    /// `timeout` bounds each individual page request.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ScrapeError::ClientInit)?;

        Ok(Self { client, endpoints })
    }

    /// The endpoint table this scraper resolves base URLs from
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// URL of the holder listing for a token
    pub fn holders_url(&self, network: Network, token_address: &str) -> String {
        format!(
            "{}/token/generic-tokenholders2?a={}",
            self.endpoints.base_url(network),
            token_address
        )
    }

    /// URL of the detail page for an address
    pub fn address_url(&self, network: Network, address: &str) -> String {
        format!("{}/address/{}", self.endpoints.base_url(network), address)
    }

    /// Fetches a page and returns its body.
    ///
    /// Any non-success status is an error.
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        async {
            let parsed = url::Url::parse(url).map_err(|source| ScrapeError::InvalidUrl {
                url: url.to_string(),
                source,
            })?;

            let response = self
                .client
                .get(parsed.clone())
                .headers(browser_headers(parsed.host_str()))
                .send()
                .await
                .map_err(|e| ScrapeError::request(url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::http_status(url, status));
            }

            let body = response
                .text()
                .await
                .map_err(|e| ScrapeError::request(url, e))?;

            debug!(status = %status, bytes = body.len(), "Fetched explorer page");
            Ok(body)
        }
        .instrument(spans::fetch_page(url))
        .await
    }
}

#[async_trait]
impl Scraper for ExplorerScraper {
    async fn fetch_holders(
        &self,
        network: Network,
        token_address: &str,
    ) -> Result<Vec<String>, ScrapeError> {
        async {
            let html = self
                .fetch_page(&self.holders_url(network, token_address))
                .await?;
            let holders = extract_holders(&html, token_address);
            debug!(count = holders.len(), "Extracted token holders");
            Ok(holders)
        }
        .instrument(spans::fetch_holders(network, token_address))
        .await
    }

    async fn fetch_abi(&self, network: Network, address: &str) -> Result<Value, ScrapeError> {
        async {
            let html = self.fetch_page(&self.address_url(network, address)).await?;
            extract_abi(&html, address)
        }
        .instrument(spans::fetch_abi(network, address))
        .await
    }
}
