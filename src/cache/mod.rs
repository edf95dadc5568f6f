//! Result caching for scraped explorer data
//!
//! Scraped results are cached in a bounded [`LruCache`] keyed by
//! [`CacheKey`]. The service keeps one cache per operation kind, so the same
//! address can have both a holders entry and an ABI entry.
//!
//! Entries never expire. Holder snapshots are allowed to be slightly stale and
//! ABIs are immutable once a contract is verified, so an entry only leaves the
//! cache when it is evicted to make room.
//!
//! # Examples
//!
//! ```rust,ignore
//! use scanproxy::cache::{CacheKey, LruCache};
//! use scanproxy::network::Network;
//!
//! let cache: LruCache<CacheKey, Vec<String>> = LruCache::new(10_240);
//! let key = CacheKey::new(Network::Eth, "0xdac17f958d2ee523a2206206994597c13d831ec7");
//!
//! cache.insert(key.clone(), vec![]).await;
//! assert_eq!(cache.get(&key).await, Some(vec![]));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::Network;

mod memory;

pub use memory::LruCache;

/// Key for cached scrape results
///
/// The address is kept verbatim: it is inserted literally into explorer URLs
/// and holder link matching, so differently-cased addresses are different
/// requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub(crate) network: Network,
    pub(crate) address: String,
}

impl CacheKey {
    /// Creates a new cache key for an address on a network
    pub fn new(network: Network, address: impl Into<String>) -> Self {
        Self {
            network,
            address: address.into(),
        }
    }

    /// The network part of the key
    pub fn network(&self) -> Network {
        self.network
    }

    /// The address part of the key
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.network, self.address)
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Current number of entries in the cache
    pub entries: usize,
    /// Maximum number of entries the cache holds
    pub capacity: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, entries={}/{}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.entries,
            self.capacity,
            self.hit_rate()
        )
    }
}
