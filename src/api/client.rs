//! reqwest-backed client for the commuting endpoint

use super::traits::CommutingApi;
use crate::error::DispatchError;
use crate::submission::OutboundRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Connection establishment limit; the whole-call limit is applied per dispatch
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error bodies are truncated to this many characters
const MAX_ERROR_BODY: usize = 200;

/// Client posting commuting records as JSON
#[derive(Debug, Clone)]
pub struct HttpCommutingClient {
    http: Client,
}

impl HttpCommutingClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl CommutingApi for HttpCommutingClient {
    async fn create_record(
        &self,
        endpoint: &Url,
        record: &OutboundRecord,
    ) -> Result<Value, DispatchError> {
        let response = self
            .http
            .post(endpoint.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        // The body is diagnostic only; a non-JSON success is still a success
        Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}
