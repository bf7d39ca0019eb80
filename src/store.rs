//! Remote calendar store access.
//!
//! The subsystem is generic over `CalendarStore` so controllers can be
//! exercised against an in-memory mock. `HttpStore` is the production
//! implementation, speaking the JSON contract in
//! `calgrid_core::protocol` with a client-side timeout on every call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use calgrid_core::protocol::{ApiEnvelope, EventPatch, EventPayload, SettingsPayload};
use calgrid_core::{CalendarSettings, DateRange, Event, StoreError, StoreResult};

use crate::config::GridConfig;

/// The remote store contract. Transport details are an implementation
/// concern; callers only see normalized results.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    async fn fetch_events(&self, user_id: &str, range: &DateRange) -> StoreResult<Vec<Event>>;
    async fn create_event(&self, payload: &EventPayload) -> StoreResult<Event>;
    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> StoreResult<Event>;
    async fn delete_event(&self, event_id: &str) -> StoreResult<()>;
    async fn fetch_settings(&self, user_id: &str) -> StoreResult<Option<CalendarSettings>>;
    async fn save_settings(&self, user_id: &str, settings: &CalendarSettings) -> StoreResult<()>;
}

/// Normalize a store response body to its data value.
///
/// The store answers in one of two shapes:
/// - an `{success, data?, error?}` envelope, where `success: false`
///   carries the failure message regardless of HTTP status;
/// - a bare resource, where a non-2xx status signals failure.
///
/// Both collapse to the same result here so callers never branch on
/// the wire shape.
fn normalize(status: StatusCode, body: &str) -> StoreResult<Value> {
    let parsed: Option<Value> = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str(body).ok()
    };

    if let Some(value) = &parsed {
        if value.get("success").is_some() {
            if let Ok(envelope) = serde_json::from_value::<ApiEnvelope<Value>>(value.clone()) {
                return Ok(envelope.into_optional()?.unwrap_or(Value::Null));
            }
        }
    }

    if !status.is_success() {
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(StoreError::Api(message));
    }

    Ok(parsed.unwrap_or(Value::Null))
}

fn decode<T: DeserializeOwned>(value: Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::BadResponse(e.to_string()))
}

/// HTTP client for the remote calendar store.
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpStore {
    pub fn new(config: &GridConfig) -> Self {
        HttpStore {
            http: reqwest::Client::new(),
            base_url: config.store_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with the configured timeout and normalize the
    /// response. Expiry converts to `StoreError::Timeout`.
    async fn send(&self, request: reqwest::RequestBuilder) -> StoreResult<Value> {
        let response = timeout(self.timeout, request.send())
            .await
            .map_err(|_| StoreError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        debug!(%status, bytes = body.len(), "store response");
        normalize(status, &body)
    }
}

#[async_trait]
impl CalendarStore for HttpStore {
    async fn fetch_events(&self, user_id: &str, range: &DateRange) -> StoreResult<Vec<Event>> {
        let request = self.http.get(self.url("/events")).query(&[
            ("userId", user_id.to_string()),
            ("from", range.from_rfc3339()),
            ("to", range.to_rfc3339()),
        ]);
        decode(self.send(request).await?)
    }

    async fn create_event(&self, payload: &EventPayload) -> StoreResult<Event> {
        let request = self.http.post(self.url("/events")).json(payload);
        decode(self.send(request).await?)
    }

    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> StoreResult<Event> {
        let request = self
            .http
            .patch(self.url(&format!("/events/{event_id}")))
            .json(patch);
        decode(self.send(request).await?)
    }

    async fn delete_event(&self, event_id: &str) -> StoreResult<()> {
        let request = self.http.delete(self.url(&format!("/events/{event_id}")));
        self.send(request).await?;
        Ok(())
    }

    async fn fetch_settings(&self, user_id: &str) -> StoreResult<Option<CalendarSettings>> {
        let request = self
            .http
            .get(self.url("/settings"))
            .query(&[("userId", user_id.to_string())]);
        match self.send(request).await? {
            Value::Null => Ok(None),
            value => Ok(Some(decode(value)?)),
        }
    }

    async fn save_settings(&self, user_id: &str, settings: &CalendarSettings) -> StoreResult<()> {
        let payload = SettingsPayload {
            user_id: user_id.to_string(),
            settings: settings.clone(),
        };
        let request = self.http.post(self.url("/settings")).json(&payload);
        self.send(request).await?;
        Ok(())
    }
}
