//! Wire format for the remote calendar store.
//!
//! The store speaks JSON over HTTP. Mutation bodies are the payload
//! types below; responses are either an `{success, data?, error?}`
//! envelope or a bare resource with a non-2xx status signaling failure.
//! The store client normalizes both shapes to `StoreResult`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::settings::CalendarSettings;

/// Body of `POST /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
    pub notification: bool,
    pub notification_time: i64,
    pub user_id: String,
}

/// Body of `PATCH /events/{id}`. Absent fields are left untouched by
/// the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<i64>,
}

impl EventPatch {
    /// Patch that only reschedules the event.
    pub fn reschedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        EventPatch {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }
}

/// Body of `POST /settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    pub user_id: String,
    #[serde(flatten)]
    pub settings: CalendarSettings,
}

/// The `{success, data?, error?}` response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Collapse to a result, requiring `data` on success.
    pub fn into_result(self) -> StoreResult<T> {
        match self.into_optional()? {
            Some(data) => Ok(data),
            None => Err(StoreError::BadResponse(
                "missing data in successful response".to_string(),
            )),
        }
    }

    /// Collapse to a result where `data` may legitimately be absent
    /// (e.g. `GET /settings` for a user with nothing stored).
    pub fn into_optional(self) -> StoreResult<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(StoreError::Api(
                self.error.unwrap_or_else(|| "request failed".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_yields_data() {
        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), 7);
    }

    #[test]
    fn envelope_failure_carries_server_message() {
        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success":false,"error":"event not found"}"#).unwrap();
        assert_eq!(
            env.into_result(),
            Err(StoreError::Api("event not found".to_string()))
        );
    }

    #[test]
    fn envelope_success_without_data_is_none_when_optional() {
        let env: ApiEnvelope<i32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(env.into_optional().unwrap(), None);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = EventPatch::reschedule(
            "2024-06-12T09:00:00Z".parse().unwrap(),
            "2024-06-12T10:00:00Z".parse().unwrap(),
        );
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("start").is_some());
        assert!(json.get("title").is_none(), "untouched fields must be absent");
    }
}
