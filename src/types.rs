//! Wire types for the processor service API.
//!
//! Field names follow the service's lowerCamelCase JSON. Decoding is lenient:
//! missing scalar fields take their default value, so a sparse response from
//! an older service build still decodes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Free-form event payload.
pub type Payload = Map<String, Value>;

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<u32>,
}

impl Pagination {
    /// Query string for the next page, keeping `per_page`.
    ///
    /// Returns `None` on the last page.
    ///
    /// ```
    /// use processor_client::Pagination;
    ///
    /// let page = Pagination { page: 1, per_page: 20, has_next: true, next_page: Some(2), ..Default::default() };
    /// assert_eq!(page.next_query().as_deref(), Some("page=2&per_page=20"));
    /// ```
    pub fn next_query(&self) -> Option<String> {
        if !self.has_next {
            return None;
        }
        let next = self.next_page.unwrap_or(self.page.saturating_add(1));
        Some(format!("page={}&per_page={}", next, self.per_page))
    }
}

/// Envelope around list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Envelope around single-item responses (get, create, update).
///
/// A missing or `null` `data` decodes as `T::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ItemResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

/// An event recorded by the processor service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: String,
    /// Name of the service that emitted the event.
    pub service: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: Payload,
    pub created_at: String,
    pub updated_at: String,
}

/// A script run by the processor service when matching events arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Script {
    pub id: String,
    pub name: String,
    pub service: String,
    #[serde(rename = "type")]
    pub script_type: String,
    pub version: String,
    pub code: String,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// One run of a script against an event. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptExecution {
    pub id: String,
    pub script_id: String,
    pub event_id: String,
    /// Script version at the time of execution.
    pub script_version: String,
    /// Script name at the time of execution.
    pub script_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub duration_ms: i64,
    pub executed_at: String,
}

pub type ListEventsResponse = ListResponse<Event>;
pub type GetEventResponse = ItemResponse<Event>;
pub type ListScriptsResponse = ListResponse<Script>;
pub type GetScriptResponse = ItemResponse<Script>;
pub type ListScriptExecutionsResponse = ListResponse<ScriptExecution>;
pub type GetScriptExecutionResponse = ItemResponse<ScriptExecution>;

/// Body of an event update. Only the payload is mutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub payload: Payload,
}

/// Body for creating a script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScript {
    pub name: String,
    pub service: String,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub code: String,
    /// Left to the service default when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl CreateScript {
    /// Creates a body with the required fields; `version` and `enabled` are left unset.
    pub fn new(
        name: impl Into<String>,
        service: impl Into<String>,
        script_type: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            script_type: script_type.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    /// Sets an explicit version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the enabled flag instead of leaving it to the service.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// Partial script update. `None` fields are omitted and left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateScript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl UpdateScript {
    /// Returns `true` if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_event_envelope() {
        let body = json!({
            "success": true,
            "message": "Event retrieved",
            "status": 200,
            "data": {
                "id": "evt-1",
                "service": "billing",
                "type": "invoice.paid",
                "payload": {"amount": 42, "currency": "EUR", "lines": [1, 2]},
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-01T10:00:00Z"
            }
        });
        let resp: GetEventResponse = serde_json::from_value(body).unwrap();
        assert!(resp.success);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.data.event_type, "invoice.paid");
        assert_eq!(resp.data.payload["amount"], json!(42));
        assert_eq!(resp.data.payload["lines"], json!([1, 2]));
    }

    #[test]
    fn null_item_data_decodes_as_default() {
        let resp: GetScriptResponse =
            serde_json::from_value(json!({"success": true, "status": 200, "data": null})).unwrap();
        assert_eq!(resp.data, Script::default());

        let resp: GetScriptExecutionResponse =
            serde_json::from_value(json!({"success": false, "message": "gone"})).unwrap();
        assert_eq!(resp.message, "gone");
        assert_eq!(resp.data, ScriptExecution::default());
    }

    #[test]
    fn null_payload_decodes_as_empty_map() {
        let event: Event = serde_json::from_value(json!({"id": "e", "payload": null})).unwrap();
        assert!(event.payload.is_empty());
        assert_eq!(event.service, "");
    }

    #[test]
    fn decodes_list_with_pagination() {
        let body = json!({
            "success": true,
            "message": "ok",
            "status": 200,
            "data": [{"id": "s1", "name": "one", "enabled": true}],
            "pagination": {
                "page": 1, "perPage": 1, "total": 3, "totalPages": 3,
                "hasNext": true, "hasPrevious": false, "nextPage": 2
            }
        });
        let resp: ListScriptsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.data.len(), 1);
        assert!(resp.data[0].enabled);
        let page = resp.pagination.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.previous_page, None);
        assert_eq!(page.next_query().as_deref(), Some("page=2&per_page=1"));
    }

    #[test]
    fn list_without_pagination_or_data() {
        let resp: ListScriptExecutionsResponse =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert!(resp.data.is_empty());
        assert!(resp.pagination.is_none());
    }

    #[test]
    fn last_page_has_no_next_query() {
        let page = Pagination {
            page: 3,
            per_page: 10,
            total: 25,
            total_pages: 3,
            has_previous: true,
            previous_page: Some(2),
            ..Default::default()
        };
        assert!(page.next_query().is_none());
    }

    #[test]
    fn execution_error_message_is_optional() {
        let ok: ScriptExecution = serde_json::from_value(json!({
            "id": "x1", "scriptId": "s1", "eventId": "e1", "status": "success", "durationMs": 12
        }))
        .unwrap();
        assert_eq!(ok.duration_ms, 12);
        assert!(ok.error_message.is_none());

        let failed: ScriptExecution = serde_json::from_value(json!({
            "id": "x2", "status": "failed", "errorMessage": "ReferenceError: foo"
        }))
        .unwrap();
        assert_eq!(failed.error_message.as_deref(), Some("ReferenceError: foo"));
    }

    #[test]
    fn create_script_omits_unset_optionals() {
        let body = serde_json::to_value(CreateScript::new("s1", "svc", "t", "print()")).unwrap();
        assert_eq!(
            body,
            json!({"name": "s1", "service": "svc", "type": "t", "code": "print()"})
        );

        let body = serde_json::to_value(
            CreateScript::new("s1", "svc", "t", "print()")
                .version("2")
                .enabled(false),
        )
        .unwrap();
        assert_eq!(body["version"], "2");
        assert_eq!(body["enabled"], false);
    }

    #[test]
    fn update_script_sends_only_set_fields() {
        let update = UpdateScript {
            enabled: Some(false),
            code: Some(String::new()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"code": "", "enabled": false})
        );
        assert!(UpdateScript::default().is_empty());
        assert_eq!(serde_json::to_value(UpdateScript::default()).unwrap(), json!({}));
    }

    #[test]
    fn update_event_wraps_payload() {
        let mut payload = Payload::new();
        payload.insert("retries".to_string(), json!(3));
        let body = serde_json::to_value(UpdateEvent { payload }).unwrap();
        assert_eq!(body, json!({"payload": {"retries": 3}}));
    }
}
