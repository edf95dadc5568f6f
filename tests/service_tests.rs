//! Tests for ExplorerService caching and retry behavior
//!
//! These tests drive the service with a scripted scraper and count upstream
//! calls to observe cache hits, retries and evictions.

mod helpers;

use std::sync::Arc;

use helpers::{fast_service, holder, MockScraper, TOKEN};
use scanproxy::retry::RetryPolicy;
use scanproxy::{ExplorerService, ScrapeError};
use serde_json::json;

#[tokio::test]
async fn test_second_request_served_from_cache() {
    let mock = MockScraper::new().with_holders(vec![holder('1'), holder('2')]);
    let service = fast_service(&mock, 16);

    let first = service.holders("eth", TOKEN).await.unwrap();
    let second = service.holders("eth", TOKEN).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, vec![holder('1'), holder('2')]);
    assert_eq!(mock.holders_calls(), 1, "Second request should not reach upstream");
}

#[tokio::test]
async fn test_empty_results_are_cached() {
    let mock = MockScraper::new();
    let service = fast_service(&mock, 16);

    assert!(service.holders("bsc", TOKEN).await.unwrap().is_empty());
    assert!(service.holders("bsc", TOKEN).await.unwrap().is_empty());
    assert_eq!(service.abi("bsc", TOKEN).await.unwrap(), json!([]));
    assert_eq!(service.abi("bsc", TOKEN).await.unwrap(), json!([]));

    assert_eq!(mock.holders_calls(), 1);
    assert_eq!(mock.abi_calls(), 1);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let mock = MockScraper::new()
        .with_holders(vec![holder('3')])
        .always_failing();
    let service = fast_service(&mock, 16);

    let result = service.holders("eth", TOKEN).await;
    assert!(matches!(result, Err(ScrapeError::HttpStatus { .. })));

    mock.set_always_fail(false);

    let holders = service.holders("eth", TOKEN).await.unwrap();
    assert_eq!(holders, vec![holder('3')]);
    // 3 failed attempts, then 1 fresh successful call
    assert_eq!(mock.holders_calls(), 4);
}

#[tokio::test]
async fn test_retry_succeeds_on_third_attempt() {
    let mock = MockScraper::new()
        .with_holders(vec![holder('4')])
        .failing_first(2);
    let service = fast_service(&mock, 16);

    let holders = service.holders("polygon", TOKEN).await.unwrap();

    assert_eq!(holders, vec![holder('4')]);
    assert_eq!(mock.holders_calls(), 3);
}

#[tokio::test]
async fn test_retry_gives_up_after_three_attempts() {
    let mock = MockScraper::new().always_failing();
    let service = fast_service(&mock, 16);

    let result = service.abi("mumbai", TOKEN).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().is_transient());
    assert_eq!(mock.abi_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_default_policy_backs_off_between_attempts() {
    let mock = MockScraper::new().failing_first(2);
    let service = ExplorerService::new(Box::new(mock.clone()), RetryPolicy::new(), 16, 16);

    let started = tokio::time::Instant::now();
    service.holders("eth", TOKEN).await.unwrap();

    assert_eq!(mock.holders_calls(), 3);
    assert!(started.elapsed() >= std::time::Duration::from_millis(1500));
}

#[tokio::test]
async fn test_malformed_abi_fails_without_retry_or_caching() {
    let mock = MockScraper::new().with_malformed_abi();
    let service = fast_service(&mock, 16);

    let result = service.abi("eth", TOKEN).await;
    assert!(matches!(result, Err(ScrapeError::MalformedAbi { .. })));
    assert_eq!(mock.abi_calls(), 1);

    let _ = service.abi("eth", TOKEN).await;
    assert_eq!(mock.abi_calls(), 2, "Failure must not be cached");
}

#[tokio::test]
async fn test_unsupported_network_fails_immediately() {
    let mock = MockScraper::new();
    let service = fast_service(&mock, 16);

    let result = service.holders("ropsten", TOKEN).await;

    match result {
        Err(ScrapeError::UnsupportedNetwork { network }) => assert_eq!(network, "ropsten"),
        other => panic!("expected UnsupportedNetwork, got {other:?}"),
    }
    assert_eq!(mock.holders_calls(), 0);
}

#[tokio::test]
async fn test_lru_eviction_triggers_fresh_fetch() {
    let mock = MockScraper::new().with_holders(vec![holder('5')]);
    let service = fast_service(&mock, 2);
    let a = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    let b = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    let c = "0xcccccccccccccccccccccccccccccccccccccccc";

    service.holders("eth", a).await.unwrap();
    service.holders("eth", b).await.unwrap();
    // Touch a so that b becomes least recently used
    service.holders("eth", a).await.unwrap();
    assert_eq!(mock.holders_calls(), 2);

    // Cache is full: c evicts b
    service.holders("eth", c).await.unwrap();
    assert_eq!(mock.holders_calls(), 3);

    // a is still cached
    service.holders("eth", a).await.unwrap();
    assert_eq!(mock.holders_calls(), 3);

    // b was evicted and has to be fetched again
    service.holders("eth", b).await.unwrap();
    assert_eq!(mock.holders_calls(), 4);

    let stats = service.stats().await;
    assert_eq!(stats.holders.entries, 2);
    assert_eq!(stats.holders.evictions, 2);
}

#[tokio::test]
async fn test_concurrent_requests_for_different_keys() {
    let mock = MockScraper::new().with_holders(vec![holder('6')]);
    let service = Arc::new(fast_service(&mock, 64));

    let handles: Vec<_> = (0..16u8)
        .map(|n| {
            let service = service.clone();
            tokio::spawn(async move {
                let token = format!("0x{n:040x}");
                service.holders("eth", &token).await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), vec![holder('6')]);
    }

    assert_eq!(mock.holders_calls(), 16);
    assert_eq!(service.stats().await.holders.entries, 16);
}
