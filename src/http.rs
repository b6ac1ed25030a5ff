//! HTTP client utilities for talking to the AutoCompChem REST API.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::options::ClientOptions;

/// Build a configured HTTP client from client options.
///
/// A new client is built for every request, so no connection outlives the
/// tool call that opened it.
pub fn build_http_client(options: &ClientOptions) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(options.timeout).build()
}

/// Attaches a task parameter payload to a POST, logging it at debug level.
pub trait PayloadExt {
    fn payload_logged(self, payload: &Value) -> Self;
}

impl PayloadExt for RequestBuilder {
    fn payload_logged(self, payload: &Value) -> Self {
        tracing::debug!("AutoCompChem parameters: {}", payload);
        self.json(payload)
    }
}

/// Splits a reply from the AutoCompChem server into its status and raw body.
#[async_trait::async_trait]
pub trait ReplyExt {
    /// Reads the whole body as text, whatever the status. Consumes the response.
    async fn status_and_body(self) -> Result<(StatusCode, String), reqwest::Error>;
}

#[async_trait::async_trait]
impl ReplyExt for reqwest::Response {
    async fn status_and_body(self) -> Result<(StatusCode, String), reqwest::Error> {
        let status = self.status();
        let body = self.text().await?;
        tracing::debug!("AutoCompChem replied {} ({} bytes):\n{}", status.as_u16(), body.len(), body);
        Ok((status, body))
    }
}
