//! Client configuration.

use std::time::Duration;

/// Timeout applied when [`Config::timeout`] is zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`Client`](crate::Client).
///
/// # Examples
///
/// ```
/// use processor_client::{Client, Config};
/// use std::time::Duration;
///
/// let client = Client::new(Config::new("http://localhost:3003/").with_timeout(Duration::from_secs(3)))?;
/// assert_eq!(client.base_url(), "http://localhost:3003");
/// assert_eq!(client.timeout(), Duration::from_secs(3));
/// # Ok::<(), processor_client::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Processor service base URL, e.g. `http://localhost:3003`. Required.
    pub base_url: String,

    /// Request timeout. Zero means [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::ZERO,
        }
    }

    /// Sets the request timeout. Zero keeps [`DEFAULT_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The timeout the transport will actually use.
    pub fn resolved_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// The base URL without trailing slashes.
    pub(crate) fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
