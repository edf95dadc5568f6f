//! Error types for service configuration.

/// Errors that can occur while loading [`crate::ProxyConfig`].
///
/// Configuration problems are reported at startup instead of being replaced
/// with defaults, so a typo in an environment variable is never silently ignored.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Name of the environment variable
        key: String,
        /// The raw value that was rejected
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An endpoint override is not a valid absolute URL.
    #[error("Invalid endpoint {url:?} for network {network}")]
    InvalidEndpoint {
        /// The network the override was meant for
        network: String,
        /// The rejected URL
        url: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}

impl ConfigError {
    /// Helper to create an `InvalidValue` error.
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
