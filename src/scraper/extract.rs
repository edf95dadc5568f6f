// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Pattern-based extraction from explorer HTML
//!
//! Explorer pages are third-party markup with no stable contract. Each
//! function looks for one fixed textual pattern
//! and treats "pattern not present" as an empty result rather than an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::errors::ScrapeError;

/// Holder links on the token holders page look like
/// `/token/<token>?a=<holder>'`. The token segment is captured so it can be
/// compared against the requested token; the holder must be lower-case hex.
static HOLDER_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"/token/([^/?'"\s]+)\?a=(0x[0-9a-f]{40})'"#).expect("holder link pattern is valid")
});

/// The verified contract ABI is rendered into a fixed `<pre>` block.
static ABI_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"id='js-copytextarea2' style='height: 200px; max-height: 400px; margin-top: 5px;'>(.+?)</pre>",
    )
    .expect("ABI block pattern is valid")
});

/// Extracts holder addresses linked from a token holders page.
///
/// Only links that point back at `token_address` (compared verbatim) are
/// considered. Addresses are returned in page order, duplicates included.
///
/// # Examples
///
/// ```rust
/// use scanproxy::scraper::extract_holders;
///
/// let html = "<a href='/token/0xabc?a=0x1111111111111111111111111111111111111111'>";
/// assert_eq!(
///     extract_holders(html, "0xabc"),
///     vec!["0x1111111111111111111111111111111111111111".to_string()]
/// );
/// ```
pub fn extract_holders(html: &str, token_address: &str) -> Vec<String> {
    HOLDER_LINK
        .captures_iter(html)
        .filter(|caps| &caps[1] == token_address)
        .map(|caps| caps[2].to_string())
        .collect()
}

/// Returns the raw text of the first ABI block on a contract page, if any.
pub fn find_abi_block(html: &str) -> Option<&str> {
    ABI_BLOCK
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts the contract ABI from a contract page.
///
/// Returns an empty JSON array when the page has no ABI block (unverified
/// contract, or not a contract at all). A block that is present but not valid
/// JSON fails with [`ScrapeError::MalformedAbi`].
pub fn extract_abi(html: &str, address: &str) -> Result<Value, ScrapeError> {
    match find_abi_block(html) {
        Some(block) => {
            debug!(bytes = block.len(), "Found ABI block");
            serde_json::from_str(block).map_err(|source| ScrapeError::MalformedAbi {
                address: address.to_string(),
                source,
            })
        }
        None => {
            debug!("No ABI block on page");
            Ok(Value::Array(Vec::new()))
        }
    }
}
