// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for scanproxy integration tests
//!
//! Provides a scripted [`Scraper`] implementation and HTML fixtures so the
//! service and API layers can be tested without reaching real explorers.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use scanproxy::retry::RetryPolicy;
use scanproxy::scraper::Scraper;
use scanproxy::{ExplorerService, Network, ScrapeError};
use serde_json::{json, Value};

/// Token used throughout the fixtures
#[allow(dead_code)]
pub const TOKEN: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

#[derive(Default)]
struct MockState {
    holders: Mutex<Vec<String>>,
    abi: Mutex<Option<Value>>,
    holders_calls: AtomicU32,
    abi_calls: AtomicU32,
    fail_first: AtomicU32,
    always_fail: AtomicBool,
    malformed_abi: AtomicBool,
}

/// Mock Scraper with scripted results and call counters
///
/// Clones share state, so a test can hand one clone to the service and keep
/// another to inspect call counts.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockScraper::new()
///     .with_holders(vec!["0x1111111111111111111111111111111111111111".into()])
///     .failing_first(2);
///
/// let service = fast_service(&mock, 16);
/// service.holders("eth", TOKEN).await?;
/// assert_eq!(mock.holders_calls(), 3);
/// ```
#[derive(Clone, Default)]
pub struct MockScraper {
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockScraper {
    /// Create a mock that returns no holders and an empty ABI
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the holders returned on success
    pub fn with_holders(self, holders: Vec<String>) -> Self {
        *self.state.holders.lock().unwrap() = holders;
        self
    }

    /// Set the ABI returned on success
    pub fn with_abi(self, abi: Value) -> Self {
        *self.state.abi.lock().unwrap() = Some(abi);
        self
    }

    /// Fail the next `n` calls with a transient error
    pub fn failing_first(self, n: u32) -> Self {
        self.state.fail_first.store(n, Ordering::SeqCst);
        self
    }

    /// Fail every call with a transient error
    pub fn always_failing(self) -> Self {
        self.set_always_fail(true);
        self
    }

    /// Make ABI fetches fail with a malformed ABI error
    pub fn with_malformed_abi(self) -> Self {
        self.state.malformed_abi.store(true, Ordering::SeqCst);
        self
    }

    /// Toggle permanent failure while the mock is in use
    pub fn set_always_fail(&self, fail: bool) {
        self.state.always_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of fetch_holders calls so far
    pub fn holders_calls(&self) -> u32 {
        self.state.holders_calls.load(Ordering::SeqCst)
    }

    /// Number of fetch_abi calls so far
    pub fn abi_calls(&self) -> u32 {
        self.state.abi_calls.load(Ordering::SeqCst)
    }

    fn should_fail(&self) -> bool {
        if self.state.always_fail.load(Ordering::SeqCst) {
            return true;
        }
        self.state
            .fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_holders(
        &self,
        network: Network,
        token_address: &str,
    ) -> Result<Vec<String>, ScrapeError> {
        self.state.holders_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(transient_error(network, token_address));
        }
        Ok(self.state.holders.lock().unwrap().clone())
    }

    async fn fetch_abi(&self, network: Network, address: &str) -> Result<Value, ScrapeError> {
        self.state.abi_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail() {
            return Err(transient_error(network, address));
        }
        if self.state.malformed_abi.load(Ordering::SeqCst) {
            let source = serde_json::from_str::<Value>("[{\"type\":").unwrap_err();
            return Err(ScrapeError::MalformedAbi {
                address: address.to_string(),
                source,
            });
        }
        Ok(self.state.abi.lock().unwrap().clone().unwrap_or_else(|| json!([])))
    }
}

fn transient_error(network: Network, address: &str) -> ScrapeError {
    ScrapeError::http_status(
        format!("https://{network}.example/address/{address}"),
        StatusCode::SERVICE_UNAVAILABLE,
    )
}

/// Retry policy with the default attempt budget and no backoff delay
#[allow(dead_code)]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::builder().base_delay(Duration::ZERO).build()
}

/// Service around `mock` with fast retries and `capacity` entries per cache
#[allow(dead_code)]
pub fn fast_service(mock: &MockScraper, capacity: usize) -> ExplorerService {
    ExplorerService::new(Box::new(mock.clone()), fast_retry(), capacity, capacity)
}

/// Base URL of a local upstream that accepts connections and never replies
#[allow(dead_code)]
pub async fn silent_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    format!("http://{addr}")
}

/// Holder address with every hex digit set to `digit`
#[allow(dead_code)]
pub fn holder(digit: char) -> String {
    format!("0x{}", digit.to_string().repeat(40))
}

/// Token holders page listing `holders` for `token`
#[allow(dead_code)]
pub fn holders_page(token: &str, holders: &[String]) -> String {
    let rows: String = holders
        .iter()
        .enumerate()
        .map(|(rank, holder)| {
            format!(
                "<tr><td>{}</td><td><span><a href='/token/{token}?a={holder}' target='_parent'>{holder}</a></span></td><td>1,000</td></tr>\n",
                rank + 1
            )
        })
        .collect();
    format!("<html><body><table><tbody>\n{rows}</tbody></table></body></html>")
}

/// Contract page with `abi` in the ABI block
#[allow(dead_code)]
pub fn abi_page(abi: &str) -> String {
    format!(
        "<html><body><div class='mb-4'><pre class='wordwrap js-copytextarea2' id='js-copytextarea2' style='height: 200px; max-height: 400px; margin-top: 5px;'>{abi}</pre></div></body></html>"
    )
}
