// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the job queue's admin API.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET  queues` → `["default", ...]`
//! - `GET  jobs?queue=<name>&limit=<n>` → `[JobRecord, ...]`
//! - `POST jobs/<message_id>/retry`
//! - `POST jobs/<message_id>/cancel`
//!
//! Error bodies may carry `detail`, `message`, or `error`; that text is
//! kept as the rejection reason.

use std::time::Duration;

use async_trait::async_trait;
use jw_core::{JobAction, JobRecord, MessageId};
use reqwest::{Method, StatusCode, Url};

use crate::queue::{JobQueueAdapter, RemoteError};

const MAX_REASON_LEN: usize = 300;

/// Connection settings for [`HttpJobQueue`]
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), token: None, timeout: Duration::from_secs(10) }
    }

    jw_core::setters! {
        set {
            timeout: Duration,
        }
        option {
            token: String,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpJobQueue {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpJobQueue {
    pub fn new(config: HttpConfig) -> Result<Self, RemoteError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| RemoteError::Transport(format!("invalid API URL {}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(RemoteError::Transport(format!("invalid API URL {}", config.base_url)));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self { client, base, token: config.token })
    }

    /// Base URL joined with `segments`, each percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, method: Method, url: Url) -> Result<reqwest::Response, RemoteError> {
        tracing::debug!(%method, %url, "queue request");
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Rejected { status: status.as_u16(), reason: extract_reason(&body) })
    }

    async fn mutate(&self, message_id: &MessageId, action: JobAction) -> Result<(), RemoteError> {
        let action = action.to_string();
        let url = self.endpoint(&["jobs", message_id.as_str(), &action]);
        self.send(Method::POST, url).await.map(|_| ())
    }
}

fn map_transport(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Transport(err.to_string())
    }
}

/// Pull an operator-readable reason out of an error body.
pub(crate) fn extract_reason(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(obj)) = serde_json::from_str::<serde_json::Value>(body) {
        return ["detail", "message", "error"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
    }
    Some(body.chars().take(MAX_REASON_LEN).collect())
}

#[async_trait]
impl JobQueueAdapter for HttpJobQueue {
    async fn list_queues(&self) -> Result<Vec<String>, RemoteError> {
        let response = self.send(Method::GET, self.endpoint(&["queues"])).await?;
        response.json().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn list_jobs(&self, queue: &str, limit: usize) -> Result<Vec<JobRecord>, RemoteError> {
        let mut url = self.endpoint(&["jobs"]);
        url.query_pairs_mut().append_pair("queue", queue).append_pair("limit", &limit.to_string());
        match self.send(Method::GET, url).await {
            Ok(response) => response.json().await.map_err(|e| RemoteError::Decode(e.to_string())),
            Err(RemoteError::Rejected { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                tracing::debug!(queue, "queue not found, listing as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn retry_job(&self, message_id: &MessageId) -> Result<(), RemoteError> {
        self.mutate(message_id, JobAction::Retry).await
    }

    async fn cancel_job(&self, message_id: &MessageId) -> Result<(), RemoteError> {
        self.mutate(message_id, JobAction::Cancel).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
