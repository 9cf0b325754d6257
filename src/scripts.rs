//! Script endpoints.

use crate::{
    request::{require_id, RequestMetadata, Resource},
    types::{CreateScript, GetScriptResponse, ListScriptsResponse, UpdateScript},
    Client, Result,
};
use http::{Method, StatusCode};

impl Client {
    /// Lists scripts, forwarding `query` verbatim.
    pub async fn list_scripts(&self, query: &str) -> Result<ListScriptsResponse> {
        let metadata = RequestMetadata::new(Method::GET, "failed to list scripts")
            .segment("scripts")
            .query(query);
        self.call::<(), _>(metadata, None).await
    }

    /// Gets one script.
    pub async fn get_script(&self, id: &str) -> Result<GetScriptResponse> {
        require_id(id, Resource::Script)?;
        let metadata = RequestMetadata::new(Method::GET, "failed to get script")
            .segment("scripts")
            .segment(id);
        self.call::<(), _>(metadata, None).await
    }

    /// Creates a script. The service answers `201 Created` with the stored script.
    pub async fn create_script(&self, script: &CreateScript) -> Result<GetScriptResponse> {
        let metadata = RequestMetadata::new(Method::POST, "failed to create script")
            .segment("scripts")
            .success(&[StatusCode::CREATED]);
        self.call(metadata, Some(script)).await
    }

    /// Applies a partial update; fields left as `None` are not sent.
    pub async fn update_script(
        &self,
        id: &str,
        update: &UpdateScript,
    ) -> Result<GetScriptResponse> {
        require_id(id, Resource::Script)?;
        let metadata = RequestMetadata::new(Method::PUT, "failed to update script")
            .segment("scripts")
            .segment(id);
        self.call(metadata, Some(update)).await
    }

    /// Deletes a script.
    pub async fn delete_script(&self, id: &str) -> Result<()> {
        require_id(id, Resource::Script)?;
        let metadata = RequestMetadata::new(Method::DELETE, "failed to delete script")
            .segment("scripts")
            .segment(id);
        self.call_no_content::<()>(metadata, None).await
    }
}
