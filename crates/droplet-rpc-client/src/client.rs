// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use droplet_model::Frame;
use tracing::{debug, trace};

use crate::error::RpcError;
use crate::wire::{decode_frame, RpcRequest};

/// HTTP JSON-RPC client for the simulator's frame method.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    method: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Client with reqwest's default settings.
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), url, method)
    }

    /// Client whose calls fail after `timeout`.
    pub fn with_timeout(
        url: impl Into<String>,
        method: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, url, method))
    }

    fn with_http(http: reqwest::Client, url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            method: method.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Method called for each frame.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Call the frame method once and label the result as frame `index`.
    pub async fn fetch_frame(&self, index: usize) -> Result<Frame, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(id, index, method = %self.method, "requesting frame");
        let response = self
            .http
            .post(&self.url)
            .json(&RpcRequest::new(id, &self.method))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        trace!(id, bytes = body.len(), "response received");
        decode_frame(id, index, &body)
    }
}
