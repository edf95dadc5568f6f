//! Browser-like request headers for explorer page fetches

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};

use crate::config::constants::browser;

/// Builds the header bundle for a page request to `host`.
///
/// `authority` mirrors the target host, the rest are fixed values taken from
/// a desktop Chrome navigation.
pub fn browser_headers(host: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(13);

    if let Some(value) = host.and_then(|host| HeaderValue::from_str(host).ok()) {
        headers.insert(HeaderName::from_static("authority"), value);
    }

    headers.insert(ACCEPT, HeaderValue::from_static(browser::ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(browser::ACCEPT_LANGUAGE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(browser::CACHE_CONTROL));
    headers.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static(browser::SEC_CH_UA),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static(browser::SEC_CH_UA_MOBILE),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static(browser::SEC_CH_UA_PLATFORM),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static(browser::SEC_FETCH_DEST),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static(browser::SEC_FETCH_MODE),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static(browser::SEC_FETCH_SITE),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static(browser::SEC_FETCH_USER),
    );
    headers.insert(
        UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static(browser::UPGRADE_INSECURE_REQUESTS),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(browser::USER_AGENT));

    headers
}
