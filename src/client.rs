//! HTTP client for the processor service.
//!
//! The [`Client`] type is the entry point. Resource methods live in the
//! `events`, `scripts` and `executions` modules; all of them funnel through
//! the shared dispatch in this file, which owns status checking, error
//! classification and JSON decoding.

use crate::{config::Config, request::RequestMetadata, ApiError, Error, Result};
use reqwest::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A client for the processor service API.
///
/// The client is cheap to clone and safe to share between tasks; clones share
/// one connection pool. It holds no per-call state, so overlapping calls are
/// independent.
///
/// Every call is a single request/response exchange with no retries. To cancel
/// a call or impose a deadline tighter than the configured timeout, drop its
/// future, e.g. via `tokio::time::timeout` or `tokio::select!`; the in-flight
/// request is aborted.
///
/// # Examples
///
/// ```no_run
/// use processor_client::{Client, CreateScript};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), processor_client::Error> {
/// let client = Client::builder()
///     .base_url("http://localhost:3003")
///     .timeout(Duration::from_secs(5))
///     .build()?;
///
/// let created = client
///     .create_script(&CreateScript::new("enrich", "billing", "javascript", "return event;"))
///     .await?;
/// println!("created script {}", created.data.id);
///
/// let scripts = client.list_scripts("service=billing&page=1").await?;
/// for script in &scripts.data {
///     println!("{} v{} enabled={}", script.name, script.version, script.enabled);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Client {
    /// Creates a client from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the base URL is empty or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Configuration("Base URL is required".to_string()));
        }

        let timeout = config.resolved_timeout();
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                Error::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: config.normalized_base_url().to_string(),
                timeout,
            }),
        })
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The base URL, without trailing slashes.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Dispatches a request and decodes the JSON response body.
    pub(crate) async fn call<Req, Res>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<Res>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let response = self.execute_request(&metadata, body).await?;
        let status = response.status();

        let raw_body = response
            .text()
            .await
            .map_err(|e| Error::transport(metadata.context, e))?;

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(data),
            Err(source) => {
                tracing::error!(
                    error = %source,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::Decode {
                    context: metadata.context,
                    status,
                    raw_response: raw_body,
                    source,
                })
            }
        }
    }

    /// Dispatches a request whose response body is not needed.
    pub(crate) async fn call_no_content<Req>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<()>
    where
        Req: Serialize,
    {
        let response = self.execute_request(&metadata, body).await?;

        // Drain so the connection goes back to the pool.
        if let Err(e) = response.bytes().await {
            tracing::debug!(error = %e, "Failed to drain response body");
        }
        Ok(())
    }

    /// Sends one request and checks its status against the success set.
    async fn execute_request<Req>(
        &self,
        metadata: &RequestMetadata,
        body: Option<&Req>,
    ) -> Result<reqwest::Response>
    where
        Req: Serialize,
    {
        let url = metadata.url(&self.inner.base_url)?;

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.request(metadata.method.clone(), url);

        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(|source| Error::Serialization {
                context: metadata.context,
                source,
            })?;
            request = request.header(CONTENT_TYPE, "application/json").body(json);
        }

        let start_time = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %metadata.method,
                    timeout = e.is_timeout(),
                    "Request failed"
                );
                return Err(Error::transport(metadata.context, e));
            }
        };

        let status = response.status();
        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "Received HTTP response"
        );

        if metadata.accepts(status) {
            return Ok(response);
        }

        let raw_response = response.text().await.unwrap_or_default();

        if status.is_client_error() {
            tracing::error!(
                status = status.as_u16(),
                response = %raw_response,
                "Client error (4xx)"
            );
        } else if status.is_server_error() {
            tracing::warn!(
                status = status.as_u16(),
                response = %raw_response,
                "Server error (5xx)"
            );
        }

        Err(ApiError::from_response(status, raw_response).into())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```
/// use processor_client::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new()
///     .base_url("http://localhost:3003")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok::<(), processor_client::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: Config,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the request timeout. Zero keeps the default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided.
    pub fn build(self) -> Result<Client> {
        Client::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMEOUT;

    #[test]
    fn empty_base_url_is_rejected() {
        let err = Client::new(Config::default()).err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));

        let err = Client::builder().build().err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        for input in [
            "http://localhost:3003",
            "http://localhost:3003/",
            "http://localhost:3003////",
        ] {
            let client = Client::builder().base_url(input).build().unwrap();
            assert_eq!(client.base_url(), "http://localhost:3003");
        }
    }

    #[test]
    fn non_empty_base_url_is_not_parsed_at_construction() {
        let client = Client::builder().base_url("not a url").build().unwrap();
        assert_eq!(client.base_url(), "not a url");
    }

    #[test]
    fn timeout_defaults_when_unset_or_zero() {
        let client = Client::builder().base_url("http://x").build().unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = Client::builder()
            .base_url("http://x")
            .timeout(Duration::ZERO)
            .build()
            .unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = Client::builder()
            .base_url("http://x")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Client>();
    }
}
