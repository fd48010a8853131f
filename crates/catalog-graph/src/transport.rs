//! HTTP transport seam.
//!
//! Clients only need "POST this JSON, give me the response". The trait keeps
//! the network out of view tests; [`ReqwestTransport`] is the real thing.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::response::HttpResponse;
use crate::FetchError;

/// Sends a JSON body and returns the raw response.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<HttpResponse, FetchError>;
}

/// Transport backed by `reqwest`. Uses the browser fetch API on wasm.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                FetchError::Transport(format!("Failed to read response body: {}", e.without_url()))
            })?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
