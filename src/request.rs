//! Endpoint description and request URL construction.

use crate::{Error, Result};
use http::{Method, StatusCode};
use url::Url;

/// Path prefix shared by every processor service endpoint.
pub const API_PATH_PREFIX: &str = "/api/v1";

const OK: &[StatusCode] = &[StatusCode::OK];

/// Everything needed to dispatch one call: where it goes, what counts as
/// success, and how failures are labelled.
#[derive(Debug, Clone)]
pub(crate) struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// Path segments below [`API_PATH_PREFIX`], unescaped.
    pub segments: Vec<String>,

    /// Raw query string forwarded as-is, without the leading `?`.
    pub query: Option<String>,

    /// Status codes treated as success for this call.
    pub success: &'static [StatusCode],

    /// Prefix for wrapped transport errors, e.g. `"failed to get script"`.
    pub context: &'static str,
}

impl RequestMetadata {
    /// Creates metadata for `method` that succeeds on `200 OK`.
    pub fn new(method: Method, context: &'static str) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: None,
            success: OK,
            context,
        }
    }

    /// Appends a path segment. Reserved characters are escaped when the URL is built.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Forwards a raw query string. Empty strings are ignored.
    pub fn query(mut self, raw: &str) -> Self {
        if !raw.is_empty() {
            self.query = Some(raw.to_string());
        }
        self
    }

    /// Replaces the success set.
    pub fn success(mut self, statuses: &'static [StatusCode]) -> Self {
        self.success = statuses;
        self
    }

    /// Returns `true` if `status` is in the success set.
    pub fn accepts(&self, status: StatusCode) -> bool {
        self.success.contains(&status)
    }

    /// Builds the full request URL below `base_url`.
    ///
    /// Segments that are exactly `.` or `..` are dropped by the URL serializer,
    /// so ids go through [`require_id`] first.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", base_url, API_PATH_PREFIX)).map_err(
            |source| Error::InvalidUrl {
                context: self.context,
                source,
            },
        )?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::Configuration(format!("Base URL cannot carry a path: {}", base_url))
            })?
            .extend(&self.segments);
        url.set_query(self.query.as_deref());
        Ok(url)
    }
}

/// The resource an identifier belongs to, for validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resource {
    Event,
    Script,
    ScriptExecution,
}

impl Resource {
    fn id_required(self) -> &'static str {
        match self {
            Resource::Event => "event id is required",
            Resource::Script => "script id is required",
            Resource::ScriptExecution => "script execution id is required",
        }
    }

    fn id_dot_segment(self) -> &'static str {
        match self {
            Resource::Event => "event id must not be \".\" or \"..\"",
            Resource::Script => "script id must not be \".\" or \"..\"",
            Resource::ScriptExecution => "script execution id must not be \".\" or \"..\"",
        }
    }
}

/// Rejects an identifier that cannot address a single resource, before
/// anything touches the network.
///
/// An empty id, `.` or `..` would collapse into the parent path and hit the
/// collection endpoint instead.
pub(crate) fn require_id(id: &str, resource: Resource) -> Result<()> {
    match id {
        "" => Err(Error::Validation(resource.id_required())),
        "." | ".." => Err(Error::Validation(resource.id_dot_segment())),
        _ => Ok(()),
    }
}
