// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded in-memory cache with LRU eviction

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use tokio::sync::Mutex;
use tracing::debug;

use super::CacheStats;

/// Monotonic sequence number for LRU ordering
///
/// Every read hit and every insert stamps the entry with the next sequence
/// number. The entry with the lowest number is the least recently used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
struct AccessSequence(u64);

impl AccessSequence {
    fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Entry in the cache with its recency stamp
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    access_seq: AccessSequence,
}

/// Internal state for the cache
///
/// `recency` holds exactly one key per entry, indexed by that entry's
/// current access stamp, so its first element is the LRU entry.
#[derive(Debug)]
struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    recency: BTreeMap<AccessSequence, K>,
    stats: CacheStats,
    next_seq: AccessSequence,
}

impl<K, V> CacheState<K, V> {
    fn bump_seq(&mut self) -> AccessSequence {
        let seq = self.next_seq;
        self.next_seq = seq.next();
        seq
    }
}

/// In-memory cache with a fixed maximum number of entries
///
/// When the cache is full, inserting a new key evicts the least recently used
/// entry. Reads count as use. Access is serialized through an async mutex that
/// is only held for the map operation itself, never while the caller computes
/// a value to insert.
///
/// # Examples
///
/// ```rust
/// # tokio_test_block(async {
/// use scanproxy::cache::LruCache;
///
/// let cache = LruCache::new(2);
/// cache.insert("a", 1).await;
/// cache.insert("b", 2).await;
/// cache.get(&"a").await; // "a" is now the most recently used
/// cache.insert("c", 3).await; // evicts "b"
///
/// assert_eq!(cache.get(&"b").await, None);
/// assert_eq!(cache.get(&"a").await, Some(1));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
///
/// # Performance
///
/// - Get: O(log n), HashMap lookup plus a recency index update
/// - Insert: O(log n), including eviction of the LRU entry
pub struct LruCache<K, V> {
    max_entries: usize,
    state: Mutex<CacheState<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: Clone,
{
    /// Creates an empty cache holding at most `max_entries` entries
    ///
    /// A capacity of zero disables caching: inserts are dropped.
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                recency: BTreeMap::new(),
                stats: CacheStats {
                    capacity: max_entries,
                    ..Default::default()
                },
                next_seq: AccessSequence::default(),
            }),
        }
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Returns a clone of the cached value and marks it most recently used
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().await;
        let seq = state.bump_seq();

        let touched = state
            .entries
            .get_mut(key)
            .map(|entry| (std::mem::replace(&mut entry.access_seq, seq), entry.value.clone()));
        let result = touched.map(|(previous, value)| {
            state.recency.remove(&previous);
            state.recency.insert(seq, key.clone());
            value
        });

        if result.is_some() {
            state.stats.hits += 1;
            debug!(key = %key, "Cache hit");
        } else {
            state.stats.misses += 1;
            debug!(key = %key, "Cache miss");
        }

        result
    }

    /// Inserts or replaces a value, evicting the LRU entry if the cache is full
    pub async fn insert(&self, key: K, value: V) {
        if self.max_entries == 0 {
            return;
        }

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let seq = state.bump_seq();

        if let Some(entry) = state.entries.get_mut(&key) {
            entry.value = value;
            let previous = std::mem::replace(&mut entry.access_seq, seq);
            state.recency.remove(&previous);
            state.recency.insert(seq, key);
            return;
        }

        while state.entries.len() >= self.max_entries {
            if !Self::evict_lru(state) {
                break;
            }
        }

        debug!(key = %key, "Inserting cache entry");
        state.recency.insert(seq, key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                value,
                access_seq: seq,
            },
        );
        state.stats.entries = state.entries.len();
    }

    /// Returns `true` if `key` is cached, without counting as use
    pub async fn contains(&self, key: &K) -> bool {
        self.state.lock().await.entries.contains_key(key)
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns `true` if nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes all entries; statistics other than the entry count are kept
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing cache");
        state.entries.clear();
        state.recency.clear();
        state.stats.entries = 0;
    }

    /// Returns current cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    /// Evicts the least recently used entry. Returns `false` if the cache was empty.
    fn evict_lru(state: &mut CacheState<K, V>) -> bool {
        match state.recency.pop_first() {
            Some((_, key)) => {
                debug!(key = %key, "Evicting LRU cache entry");
                state.entries.remove(&key);
                state.stats.evictions += 1;
                true
            }
            None => false,
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}
