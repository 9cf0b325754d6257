//! Error types for processor service calls.
//!
//! Every client method fails with exactly one [`Error`]. The variants fall into
//! three kinds that callers usually branch on:
//!
//! - **validation**: a required identifier was empty, nothing was sent
//!   ([`Error::Validation`]);
//! - **transport**: the exchange itself failed, including timeouts and
//!   undecodable success bodies ([`Error::Transport`], [`Error::Timeout`],
//!   [`Error::Decode`]);
//! - **API**: the service answered with a status outside the call's success set
//!   ([`Error::Api`], carrying an [`ApiError`]).
//!
//! Construction and encoding problems have their own variants.

use http::StatusCode;
use serde::Deserialize;

/// The main error type for processor service calls.
///
/// # Examples
///
/// ```no_run
/// use processor_client::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("http://localhost:3003")
///     .build()?;
///
/// match client.get_event("abc").await {
///     Ok(response) => println!("event type: {}", response.data.event_type),
///     Err(Error::Api(api)) if api.status == http::StatusCode::NOT_FOUND => {
///         println!("no such event: {}", api.message);
///     }
///     Err(e) if e.is_transport() => eprintln!("service unreachable: {}", e),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required argument was missing. Raised before any network activity.
    #[error("{0}")]
    Validation(&'static str),

    /// The request could not be sent or the response could not be read.
    ///
    /// `context` names the failed operation, e.g. `"failed to list events"`.
    #[error("{context}: {source}")]
    Transport {
        /// Short description of the operation that failed
        context: &'static str,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the client's configured timeout.
    #[error("{context}: request timed out")]
    Timeout {
        /// Short description of the operation that failed
        context: &'static str,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a success status but the body did not decode.
    ///
    /// The raw body is kept so schema drift can be diagnosed from logs.
    #[error("{context}: failed to decode response (status {status}): {source}")]
    Decode {
        /// Short description of the operation that failed
        context: &'static str,
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body that failed to decode
        raw_response: String,
        /// The serde error
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded as JSON.
    #[error("{context}: failed to encode request body: {source}")]
    Serialization {
        /// Short description of the operation that failed
        context: &'static str,
        /// The serde error
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with a status outside the call's success set.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configured base URL could not be turned into a request URL.
    #[error("{context}: invalid URL: {source}")]
    InvalidUrl {
        /// Short description of the operation that failed
        context: &'static str,
        /// The URL parse error
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Returns the [`ApiError`] if the service itself reported the failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }

    /// Returns `true` if the service answered with a non-success status.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// Returns `true` if a local precondition failed before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns `true` for failures of the exchange itself: connection errors,
    /// timeouts, unreadable bodies and undecodable success bodies.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::Timeout { .. } | Error::Decode { .. }
        )
    }

    /// Returns the HTTP status code if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if a response was received.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Api(api) => Some(&api.body),
            Error::Decode { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Wraps a transport failure, splitting timeouts into their own variant.
    pub(crate) fn transport(context: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Error::Timeout { context, source }
        } else {
            Error::Transport { context, source }
        }
    }
}

/// An error reported by the processor service.
///
/// `message` is a best-effort human readable description: the `error` field of
/// the service's JSON error body, else its `message` field, else the raw body.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "processor service returned status {}: {}",
    .status.as_u16(),
    detail(.message, .body)
)]
pub struct ApiError {
    /// The HTTP status code of the response
    pub status: StatusCode,
    /// Best-effort message extracted from the body
    pub message: String,
    /// The raw response body
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Classifies a non-success response body.
    ///
    /// # Examples
    ///
    /// ```
    /// use processor_client::ApiError;
    /// use http::StatusCode;
    ///
    /// let err = ApiError::from_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#);
    /// assert_eq!(err.message, "not found");
    ///
    /// let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
    /// assert_eq!(err.message, "upstream down");
    /// ```
    pub fn from_response(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| {
                let error = parsed.error.filter(|e| !e.is_empty());
                error.or_else(|| parsed.message.filter(|m| !m.is_empty()))
            })
            .unwrap_or_else(|| body.clone());

        Self {
            status,
            message,
            body,
        }
    }
}

/// The message, or the raw body when the message is empty.
fn detail<'a>(message: &'a str, body: &'a str) -> &'a str {
    if message.is_empty() {
        body
    } else {
        message
    }
}

/// A specialized `Result` type for processor service calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_wins_over_message() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"status":400,"message":"bad request","error":"name is required"}"#,
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn message_used_when_error_empty() {
        let err = ApiError::from_response(
            StatusCode::CONFLICT,
            r#"{"message":"script already exists","error":""}"#,
        );
        assert_eq!(err.message, "script already exists");
    }

    #[test]
    fn plain_text_body_becomes_message() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.message, "boom");
        assert_eq!(err.body, "boom");
    }

    #[test]
    fn json_without_known_fields_falls_back_to_body() {
        let body = r#"{"success":false,"status":500}"#;
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(err.message, body);
    }

    #[test]
    fn mistyped_fields_fall_back_to_body() {
        let body = r#"{"error":{"code":7}}"#;
        let err = ApiError::from_response(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.message, body);
    }

    #[test]
    fn empty_body_gives_empty_message() {
        let err = ApiError::from_response(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.message, "");
        assert_eq!(
            err.to_string(),
            "processor service returned status 503: "
        );
    }

    #[test]
    fn display_falls_back_to_body() {
        let err = ApiError {
            status: StatusCode::BAD_GATEWAY,
            message: String::new(),
            body: "upstream closed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "processor service returned status 502: upstream closed"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn invalid_url_carries_context() {
        let err = Error::InvalidUrl {
            context: "failed to list events",
            source: url::Url::parse("not a url").unwrap_err(),
        };
        assert!(err
            .to_string()
            .starts_with("failed to list events: invalid URL: "));
        assert!(!err.is_transport());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = Error::from(ApiError::from_response(
            StatusCode::NOT_FOUND,
            r#"{"error":"not found"}"#,
        ));
        assert_eq!(
            err.to_string(),
            "processor service returned status 404: not found"
        );
    }

    #[test]
    fn classification_helpers() {
        let api = Error::from(ApiError::from_response(StatusCode::NOT_FOUND, "missing"));
        assert!(api.is_api_error());
        assert!(!api.is_transport());
        assert_eq!(api.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(api.raw_response(), Some("missing"));
        assert_eq!(api.api_error().map(|e| e.message.as_str()), Some("missing"));

        let validation = Error::Validation("event id is required");
        assert!(validation.is_validation());
        assert!(!validation.is_api_error());
        assert!(validation.api_error().is_none());
        assert_eq!(validation.to_string(), "event id is required");

        let decode = Error::Decode {
            context: "failed to get event",
            status: StatusCode::OK,
            raw_response: "nope".to_string(),
            source: serde_json::from_str::<serde_json::Value>("nope").unwrap_err(),
        };
        assert!(decode.is_transport());
        assert_eq!(decode.status(), Some(StatusCode::OK));
        assert!(decode.to_string().starts_with("failed to get event: "));
    }
}
