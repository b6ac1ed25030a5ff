//! Forwarding client and error types.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use thiserror::Error;

use crate::http::{build_http_client, PayloadExt, ReplyExt};
use crate::options::ClientOptions;

/// Errors that can occur while forwarding a call to the AutoCompChem server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),

    #[error("Failed to connect to AutoCompChem server at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("AutoCompChem API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid JSON in response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create working directory: {0}")]
    Workspace(#[from] std::io::Error),
}

/// The HTTP seam between the tool server and the remote service.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Issue one request against `path` and return the decoded JSON body.
    ///
    /// `payload` is only sent for POST; a missing payload is sent as `{}`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ClientError>;

    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value, ClientError> {
        self.request(Method::POST, path, Some(payload)).await
    }
}

/// HTTP client for the AutoCompChem REST API.
#[derive(Debug, Clone)]
pub struct AutoCompChemClient {
    options: ClientOptions,
}

impl AutoCompChemClient {
    /// Create a new client.
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    /// Get reference to the client options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}

#[async_trait]
impl RemoteApi for AutoCompChemClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = self.options.url_for(path);
        let connection = |source| ClientError::Connection {
            url: url.clone(),
            source,
        };

        let http_client = build_http_client(&self.options).map_err(connection)?;

        let req = if method == Method::GET {
            http_client.get(&url)
        } else if method == Method::POST {
            let empty = json!({});
            http_client.post(&url).payload_logged(payload.unwrap_or(&empty))
        } else {
            return Err(ClientError::UnsupportedMethod(method));
        };

        tracing::debug!("{} {}", method, url);

        let response = req.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            connection(e)
        })?;
        let (status, body) = response.status_and_body().await.map_err(connection)?;

        if !status.is_success() {
            tracing::error!("HTTP error {}: {}", status.as_u16(), body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_method_rejected_before_sending() {
        // Nothing listens on port 9; the method check must fire first.
        let client = AutoCompChemClient::new(ClientOptions::new().with_base_url("http://127.0.0.1:9"));
        let err = client
            .request(Method::DELETE, "/api/v1/autocompchem/tasks", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::UnsupportedMethod(Method::DELETE)));
        assert_eq!(err.to_string(), "Unsupported HTTP method: DELETE");
    }

    #[test]
    fn test_options_accessor() {
        let client = AutoCompChemClient::new(ClientOptions::new().with_base_url("http://acc:8080/"));
        assert_eq!(client.options().base_url, "http://acc:8080");
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 400,
            body: "Unsupported software: foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "AutoCompChem API error 400: Unsupported software: foo"
        );
    }
}
