// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network identifiers and explorer endpoint resolution
//!
//! A request names its network with a short tag (`eth`, `bsc`, `polygon`,
//! `mumbai`). The set is closed: anything else fails with
//! [`ScrapeError::UnsupportedNetwork`] and is never defaulted to some other
//! explorer.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use alloy_chains::{Chain, NamedChain};
use serde::{Deserialize, Serialize};

use crate::config::constants::explorers;
use crate::errors::{ConfigError, ScrapeError};

/// Chain id of the Polygon Mumbai testnet
const MUMBAI_CHAIN_ID: u64 = 80001;

/// A supported explorer network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Ethereum mainnet, served by Etherscan
    Eth,
    /// BNB Smart Chain, served by BscScan
    Bsc,
    /// Polygon PoS, served by PolygonScan
    Polygon,
    /// Polygon Mumbai testnet
    Mumbai,
}

impl Network {
    /// All supported networks
    pub const ALL: [Network; 4] = [Network::Eth, Network::Bsc, Network::Polygon, Network::Mumbai];

    /// The identifier used in request paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Eth => "eth",
            Network::Bsc => "bsc",
            Network::Polygon => "polygon",
            Network::Mumbai => "mumbai",
        }
    }

    /// The chain the explorer indexes
    ///
    /// Mumbai is retired and no longer has a named variant, so it is
    /// identified by chain id alone.
    pub fn chain(&self) -> Chain {
        match self {
            Network::Eth => Chain::from_named(NamedChain::Mainnet),
            Network::Bsc => Chain::from_named(NamedChain::BinanceSmartChain),
            Network::Polygon => Chain::from_named(NamedChain::Polygon),
            Network::Mumbai => Chain::from_id(MUMBAI_CHAIN_ID),
        }
    }

    /// The built-in explorer base URL for this network
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Network::Eth => explorers::ETHERSCAN,
            Network::Bsc => explorers::BSCSCAN,
            Network::Polygon => explorers::POLYGONSCAN,
            Network::Mumbai => explorers::MUMBAI_POLYGONSCAN,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eth" => Ok(Network::Eth),
            "bsc" => Ok(Network::Bsc),
            "polygon" => Ok(Network::Polygon),
            "mumbai" => Ok(Network::Mumbai),
            other => Err(ScrapeError::unsupported_network(other)),
        }
    }
}

/// Resolves a network identifier to its built-in explorer base URL.
///
/// # Examples
///
/// ```rust
/// use scanproxy::network::resolve;
///
/// assert_eq!(resolve("bsc").unwrap(), "https://bscscan.com");
/// assert!(resolve("solana").is_err());
/// ```
pub fn resolve(network: &str) -> Result<&'static str, ScrapeError> {
    Ok(network.parse::<Network>()?.default_base_url())
}

/// Effective explorer base URLs, with optional per-network overrides
///
/// Starts from the built-in table. Overrides replace the base URL of an
/// existing network (for a mirror, a proxy, or a mock upstream in tests) but
/// never extend the set of supported networks.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    overrides: HashMap<Network, String>,
}

impl Endpoints {
    /// Creates the built-in endpoint table
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the base URL used for `network`
    ///
    /// The URL must be absolute. A trailing `/` is dropped so page paths can
    /// be appended directly.
    pub fn with_override(
        mut self,
        network: Network,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|source| ConfigError::InvalidEndpoint {
            network: network.to_string(),
            url: base_url.clone(),
            source,
        })?;
        self.overrides
            .insert(network, base_url.trim_end_matches('/').to_string());
        Ok(self)
    }

    /// Returns the base URL for an already-parsed network
    pub fn base_url(&self, network: Network) -> &str {
        self.overrides
            .get(&network)
            .map(String::as_str)
            .unwrap_or_else(|| network.default_base_url())
    }

    /// Resolves a raw network identifier to the network and its base URL
    pub fn resolve(&self, network: &str) -> Result<(Network, &str), ScrapeError> {
        let network = network.parse::<Network>()?;
        Ok((network, self.base_url(network)))
    }
}
