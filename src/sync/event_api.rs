use crate::events::{Event, EventDraft, EventId};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use thiserror::Error;

pub const DEFAULT_EVENTS_URL: &str = "http://localhost:3000/events";

/// Failures of the remote store. Not-found, server-side validation and
/// server errors all land in `Status`.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Update of event {requested} returned event {returned}")]
    MismatchedId { requested: EventId, returned: EventId },
}

impl RemoteError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        RemoteError::Status { status, body: body.into() }
    }
}

/// One attempt per call: no retries, no timeouts, no idempotency keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteEventStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, RemoteError>;

    async fn create(&self, draft: &EventDraft) -> Result<Event, RemoteError>;

    async fn remove(&self, id: EventId) -> Result<serde_json::Value, RemoteError>;

    async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, RemoteError>;
}

pub struct HttpEventStore {
    events_url: String,
    client: reqwest::Client,
}

impl HttpEventStore {
    pub fn new(events_url: impl Into<String>) -> Self {
        Self {
            events_url: events_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    fn event_url(&self, id: EventId) -> String {
        format!("{}/{}", self.events_url, id)
    }

    async fn check_status(response: Response, action: &str) -> Result<Response, RemoteError> {
        let status = response.status();
        tracing::info!("{} response status: {}", action, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Failed to {}. Status: {}, Body: {}", action, status, body);
        Err(RemoteError::status(status.as_u16(), body))
    }
}

impl Default for HttpEventStore {
    fn default() -> Self {
        Self::new(DEFAULT_EVENTS_URL)
    }
}

fn log_transport(action: &'static str) -> impl FnOnce(reqwest::Error) -> RemoteError {
    move |e| {
        tracing::error!("Failed to {}: {}", action, e);
        RemoteError::Transport(e)
    }
}

#[async_trait]
impl RemoteEventStore for HttpEventStore {
    async fn list(&self) -> Result<Vec<Event>, RemoteError> {
        let action = "list events";
        tracing::info!("GET {}", self.events_url);

        let response = self.client
            .get(&self.events_url)
            .send()
            .await
            .map_err(log_transport(action))?;

        let response = Self::check_status(response, action).await?;
        let events: Vec<Event> = response.json().await.map_err(log_transport(action))?;

        tracing::info!("Fetched {} events", events.len());
        Ok(events)
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event, RemoteError> {
        let action = "create event";
        tracing::info!("POST {} ({})", self.events_url, draft.event_name);
        tracing::debug!("Create payload: {:?}", draft);

        let response = self.client
            .post(&self.events_url)
            .json(draft)
            .send()
            .await
            .map_err(log_transport(action))?;

        let response = Self::check_status(response, action).await?;
        let created: Event = response.json().await.map_err(log_transport(action))?;

        tracing::info!("Event created with ID: {}", created.id);
        Ok(created)
    }

    async fn remove(&self, id: EventId) -> Result<serde_json::Value, RemoteError> {
        let action = "delete event";
        let url = self.event_url(id);
        tracing::info!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .send()
            .await
            .map_err(log_transport(action))?;

        let response = Self::check_status(response, action).await?;
        tracing::info!("Event {} deleted", id);

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Null);
        }

        let body = response.text().await.map_err(log_transport(action))?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }

    async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, RemoteError> {
        let action = "update event";
        let url = self.event_url(id);
        tracing::info!("PUT {} ({})", url, draft.event_name);
        tracing::debug!("Update payload: {:?}", draft);

        let response = self.client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(log_transport(action))?;

        let response = Self::check_status(response, action).await?;
        let updated: Event = response.json().await.map_err(log_transport(action))?;

        tracing::info!("Event {} updated", updated.id);
        Ok(updated)
    }
}
