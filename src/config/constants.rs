//! Well-known endpoints and constants
//!
//! This module centralizes the explorer base URLs, default limits and the
//! browser header bundle used throughout the scanproxy crate.

use std::time::Duration;

/// Explorer base URLs for the supported networks
pub mod explorers {
    /// Etherscan (Ethereum mainnet)
    pub const ETHERSCAN: &str = "https://etherscan.io";

    /// BscScan (BNB Smart Chain)
    pub const BSCSCAN: &str = "https://bscscan.com";

    /// PolygonScan (Polygon PoS mainnet)
    pub const POLYGONSCAN: &str = "https://polygonscan.com";

    /// PolygonScan for the Mumbai testnet
    pub const MUMBAI_POLYGONSCAN: &str = "https://mumbai.polygonscan.com";
}

/// Default listen port for the HTTP API (bound on 127.0.0.1)
pub const DEFAULT_PORT: u16 = 5003;

/// Default timeout for a single explorer request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum number of cached results per operation kind
pub const DEFAULT_CACHE_CAPACITY: usize = 10_240;

/// Browser header bundle sent with every explorer request.
///
/// Explorers serve a challenge page or reject requests that do not look like
/// an ordinary browser navigation. These values pin a specific Chrome release
/// and go stale as browsers move on; refresh them when explorers start
/// answering with 403s.
pub mod browser {
    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";
    pub const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";
    pub const CACHE_CONTROL: &str = "max-age=0";
    pub const SEC_CH_UA: &str =
        r#""Not?A_Brand";v="8", "Chromium";v="108", "Google Chrome";v="108""#;
    pub const SEC_CH_UA_MOBILE: &str = "?0";
    pub const SEC_CH_UA_PLATFORM: &str = r#""macOS""#;
    pub const SEC_FETCH_DEST: &str = "document";
    pub const SEC_FETCH_MODE: &str = "navigate";
    pub const SEC_FETCH_SITE: &str = "none";
    pub const SEC_FETCH_USER: &str = "?1";
    pub const UPGRADE_INSECURE_REQUESTS: &str = "1";
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";
}
