//! Configuration for scanproxy
//!
//! This module provides the service configuration: listen address, explorer
//! request timeout, retry policy, cache capacities and explorer endpoint
//! overrides.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use scanproxy::ProxyConfig;
//!
//! // Listens on 127.0.0.1:5003, 3 attempts per scrape, 10240 cached results per kind
//! let config = ProxyConfig::default();
//! assert_eq!(config.listen_addr.port(), 5003);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use scanproxy::ProxyConfigBuilder;
//! use scanproxy::network::Network;
//! use std::time::Duration;
//!
//! let config = ProxyConfigBuilder::new()
//!     .request_timeout(Duration::from_secs(10))
//!     .holders_cache_capacity(1_000)
//!     .endpoint(Network::Eth, "http://127.0.0.1:8080")
//!     .unwrap()
//!     .build();
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use scanproxy::ProxyConfig;
//!
//! // SCANPROXY_LISTEN_ADDR=0.0.0.0:8080 SCANPROXY_ENDPOINT_ETH=https://etherscan.io
//! let config = ProxyConfig::from_env()?;
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::network::{Endpoints, Network};
use crate::retry::RetryPolicy;

pub mod constants;

use constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT};

/// Environment variable names read by [`ProxyConfig::from_env`]
pub mod env {
    pub const LISTEN_ADDR: &str = "SCANPROXY_LISTEN_ADDR";
    pub const REQUEST_TIMEOUT_SECS: &str = "SCANPROXY_REQUEST_TIMEOUT_SECS";
    pub const RETRY_ATTEMPTS: &str = "SCANPROXY_RETRY_ATTEMPTS";
    pub const RETRY_BASE_DELAY_MS: &str = "SCANPROXY_RETRY_BASE_DELAY_MS";
    pub const HOLDERS_CACHE_CAPACITY: &str = "SCANPROXY_HOLDERS_CACHE_CAPACITY";
    pub const ABI_CACHE_CAPACITY: &str = "SCANPROXY_ABI_CACHE_CAPACITY";
    /// Prefix for per-network endpoint overrides, e.g. `SCANPROXY_ENDPOINT_ETH`
    pub const ENDPOINT_PREFIX: &str = "SCANPROXY_ENDPOINT_";
}

/// Configuration for the proxy service
///
/// Use [`ProxyConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Address the HTTP API listens on
    /// Default: 127.0.0.1:5003
    pub listen_addr: SocketAddr,

    /// Timeout for a single explorer request
    /// Default: 30 seconds (prevents hanging on unresponsive explorers)
    pub request_timeout: Duration,

    /// Retry policy for transient explorer failures
    /// Default: 3 attempts, 500ms base delay
    pub retry: RetryPolicy,

    /// Maximum number of cached holder lists
    /// Default: 10240
    pub holders_cache_capacity: usize,

    /// Maximum number of cached ABIs
    /// Default: 10240
    pub abi_cache_capacity: usize,

    /// Explorer base URLs
    pub endpoints: Endpoints,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
            holders_cache_capacity: DEFAULT_CACHE_CAPACITY,
            abi_cache_capacity: DEFAULT_CACHE_CAPACITY,
            endpoints: Endpoints::default(),
        }
    }
}

impl ProxyConfig {
    /// Create configuration from environment variables
    ///
    /// Unset variables keep their defaults. Set but unparseable variables are
    /// an error. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(env::LISTEN_ADDR) {
            config.listen_addr = parse_value(env::LISTEN_ADDR, &value)?;
        }

        if let Some(value) = lookup(env::REQUEST_TIMEOUT_SECS) {
            let secs: u64 = parse_value(env::REQUEST_TIMEOUT_SECS, &value)?;
            if secs == 0 {
                return Err(ConfigError::invalid_value(
                    env::REQUEST_TIMEOUT_SECS,
                    value,
                    "must be at least 1",
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        let mut retry = RetryPolicy::builder();
        if let Some(value) = lookup(env::RETRY_ATTEMPTS) {
            let attempts: u32 = parse_value(env::RETRY_ATTEMPTS, &value)?;
            if attempts == 0 {
                return Err(ConfigError::invalid_value(
                    env::RETRY_ATTEMPTS,
                    value,
                    "must be at least 1",
                ));
            }
            retry = retry.max_attempts(attempts);
        }
        if let Some(value) = lookup(env::RETRY_BASE_DELAY_MS) {
            retry = retry.base_delay(Duration::from_millis(parse_value(
                env::RETRY_BASE_DELAY_MS,
                &value,
            )?));
        }
        config.retry = retry.build();

        if let Some(value) = lookup(env::HOLDERS_CACHE_CAPACITY) {
            config.holders_cache_capacity = parse_value(env::HOLDERS_CACHE_CAPACITY, &value)?;
        }

        if let Some(value) = lookup(env::ABI_CACHE_CAPACITY) {
            config.abi_cache_capacity = parse_value(env::ABI_CACHE_CAPACITY, &value)?;
        }

        for network in Network::ALL {
            let key = format!(
                "{}{}",
                env::ENDPOINT_PREFIX,
                network.as_str().to_uppercase()
            );
            if let Some(url) = lookup(&key) {
                config.endpoints = config.endpoints.with_override(network, url)?;
            }
        }

        Ok(config)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid_value(key, value, e))
}

/// Builder for [`ProxyConfig`]
///
/// # Example
///
/// ```rust
/// use scanproxy::ProxyConfigBuilder;
/// use scanproxy::retry::RetryPolicy;
///
/// let config = ProxyConfigBuilder::new()
///     .retry(RetryPolicy::never())
///     .abi_cache_capacity(100)
///     .build();
/// assert_eq!(config.retry.max_attempts(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ProxyConfigBuilder {
    config: ProxyConfig,
}

impl ProxyConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listen address
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.config.listen_addr = addr;
        self
    }

    /// Set the timeout for a single explorer request
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the holder list cache capacity
    pub fn holders_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.holders_cache_capacity = capacity;
        self
    }

    /// Set the ABI cache capacity
    pub fn abi_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.abi_cache_capacity = capacity;
        self
    }

    /// Override the explorer base URL for a network
    pub fn endpoint(
        mut self,
        network: Network,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.config.endpoints = self.config.endpoints.with_override(network, base_url)?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> ProxyConfig {
        self.config
    }
}
