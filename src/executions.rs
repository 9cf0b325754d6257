//! Script execution endpoints. Executions are read-only.

use crate::{
    request::{require_id, RequestMetadata, Resource},
    types::{GetScriptExecutionResponse, ListScriptExecutionsResponse},
    Client, Result,
};
use http::Method;

impl Client {
    /// Lists the executions of one script, forwarding `query` verbatim.
    pub async fn list_script_executions_by_script(
        &self,
        script_id: &str,
        query: &str,
    ) -> Result<ListScriptExecutionsResponse> {
        require_id(script_id, Resource::Script)?;
        let metadata = RequestMetadata::new(Method::GET, "failed to list script executions")
            .segment("scripts")
            .segment(script_id)
            .segment("executions")
            .query(query);
        self.call::<(), _>(metadata, None).await
    }

    /// Lists executions across all scripts, forwarding `query` verbatim.
    pub async fn list_script_executions(
        &self,
        query: &str,
    ) -> Result<ListScriptExecutionsResponse> {
        let metadata = RequestMetadata::new(Method::GET, "failed to list script executions")
            .segment("script-executions")
            .query(query);
        self.call::<(), _>(metadata, None).await
    }

    /// Gets one execution.
    pub async fn get_script_execution(&self, id: &str) -> Result<GetScriptExecutionResponse> {
        require_id(id, Resource::ScriptExecution)?;
        let metadata = RequestMetadata::new(Method::GET, "failed to get script execution")
            .segment("script-executions")
            .segment(id);
        self.call::<(), _>(metadata, None).await
    }
}
