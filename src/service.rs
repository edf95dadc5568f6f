// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached, retrying access to explorer data
//!
//! [`ExplorerService`] composes the layers explicitly:
//!
//! ```text
//! resolve network ─▶ cache lookup ─▶ (miss) retry policy ─▶ scraper ─▶ cache insert
//! ```
//!
//! Only successful results are cached, including empty ones. A failed lookup
//! leaves the cache untouched, so the next request for the same key starts
//! from scratch. Concurrent misses for the same key are not coalesced; each
//! one scrapes independently and the last insert wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, Instrument};

use crate::cache::{CacheKey, CacheStats, LruCache};
use crate::config::ProxyConfig;
use crate::errors::{ProxyError, ScrapeError};
use crate::network::Network;
use crate::retry::RetryPolicy;
use crate::scraper::{ExplorerScraper, Scraper};
use crate::spans;

/// Statistics for both result caches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Holder list cache
    pub holders: CacheStats,
    /// Contract ABI cache
    pub abi: CacheStats,
}

/// Explorer data with retry and caching in front of a [`Scraper`]
///
/// Constructed once at startup and shared by all request handlers.
///
/// # Examples
///
/// ```rust,ignore
/// use scanproxy::{ExplorerService, ProxyConfig};
///
/// let service = ExplorerService::from_config(&ProxyConfig::default())?;
/// let holders = service
///     .holders("eth", "0xdac17f958d2ee523a2206206994597c13d831ec7")
///     .await?;
/// ```
pub struct ExplorerService {
    scraper: Box<dyn Scraper>,
    retry: RetryPolicy,
    holders: LruCache<CacheKey, Vec<String>>,
    abis: LruCache<CacheKey, Value>,
}

impl ExplorerService {
    /// Creates a service around `scraper`
    ///
    /// Cache capacities are per operation kind.
    pub fn new(
        scraper: Box<dyn Scraper>,
        retry: RetryPolicy,
        holders_capacity: usize,
        abi_capacity: usize,
    ) -> Self {
        Self {
            scraper,
            retry,
            holders: LruCache::new(holders_capacity),
            abis: LruCache::new(abi_capacity),
        }
    }

    /// Creates a service backed by an [`ExplorerScraper`] built from `config`
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let scraper = ExplorerScraper::new(config.endpoints.clone(), config.request_timeout)?;
        Ok(Self::new(
            Box::new(scraper),
            config.retry.clone(),
            config.holders_cache_capacity,
            config.abi_cache_capacity,
        ))
    }

    /// The retry policy applied to scrapes
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the holder addresses of `token_address` on `network`.
    ///
    /// Unknown networks fail immediately. Transient explorer failures are
    /// retried according to the retry policy.
    pub async fn holders(
        &self,
        network: &str,
        token_address: &str,
    ) -> Result<Vec<String>, ScrapeError> {
        async {
            let network = network.parse::<Network>()?;
            let key = CacheKey::new(network, token_address);

            if let Some(holders) = self.holders.get(&key).await {
                return Ok(holders);
            }

            let holders = self
                .retry
                .run(|| self.scraper.fetch_holders(network, token_address))
                .await?;

            debug!(key = %key, count = holders.len(), "Caching token holders");
            self.holders.insert(key, holders.clone()).await;
            Ok(holders)
        }
        .instrument(spans::service_lookup("holders", network, token_address))
        .await
    }

    /// Returns the published ABI of the contract at `address` on `network`.
    ///
    /// An empty JSON array means the explorer has no ABI for the address.
    /// A malformed ABI block fails without retrying.
    pub async fn abi(&self, network: &str, address: &str) -> Result<Value, ScrapeError> {
        async {
            let network = network.parse::<Network>()?;
            let key = CacheKey::new(network, address);

            if let Some(abi) = self.abis.get(&key).await {
                return Ok(abi);
            }

            let abi = self
                .retry
                .run(|| self.scraper.fetch_abi(network, address))
                .await?;

            debug!(key = %key, "Caching contract ABI");
            self.abis.insert(key, abi.clone()).await;
            Ok(abi)
        }
        .instrument(spans::service_lookup("abi", network, address))
        .await
    }

    /// Returns statistics for both caches
    pub async fn stats(&self) -> ServiceStats {
        ServiceStats {
            holders: self.holders.stats().await,
            abi: self.abis.stats().await,
        }
    }
}

impl std::fmt::Debug for ExplorerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerService")
            .field("retry", &self.retry)
            .field("holders", &self.holders)
            .field("abis", &self.abis)
            .finish_non_exhaustive()
    }
}
