//! Event endpoints.

use crate::{
    request::{require_id, RequestMetadata, Resource},
    types::{GetEventResponse, ListEventsResponse, Payload, UpdateEvent},
    Client, Result,
};
use http::Method;

impl Client {
    /// Lists events, forwarding `query` (e.g. `"page=2&per_page=5"`) verbatim.
    pub async fn list_events(&self, query: &str) -> Result<ListEventsResponse> {
        let metadata = RequestMetadata::new(Method::GET, "failed to list events")
            .segment("events")
            .query(query);
        self.call::<(), _>(metadata, None).await
    }

    /// Gets one event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) without sending
    /// anything if `id` is empty.
    pub async fn get_event(&self, id: &str) -> Result<GetEventResponse> {
        require_id(id, Resource::Event)?;
        let metadata = RequestMetadata::new(Method::GET, "failed to get event")
            .segment("events")
            .segment(id);
        self.call::<(), _>(metadata, None).await
    }

    /// Replaces an event's payload, the only mutable part of an event.
    pub async fn update_event(&self, id: &str, payload: Payload) -> Result<GetEventResponse> {
        require_id(id, Resource::Event)?;
        let metadata = RequestMetadata::new(Method::PUT, "failed to update event")
            .segment("events")
            .segment(id);
        self.call(metadata, Some(&UpdateEvent { payload })).await
    }

    /// Deletes an event.
    pub async fn delete_event(&self, id: &str) -> Result<()> {
        require_id(id, Resource::Event)?;
        let metadata = RequestMetadata::new(Method::DELETE, "failed to delete event")
            .segment("events")
            .segment(id);
        self.call_no_content::<()>(metadata, None).await
    }
}
