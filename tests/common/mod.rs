#![allow(dead_code)]

use async_trait::async_trait;
use autocompchem_mcp::client::{ClientError, RemoteApi};
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Canned reply for one path.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16, String),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub payload: Option<Value>,
    /// Whether the `WORKDIR` in the payload existed while the call was in flight.
    pub workdir_existed: Option<bool>,
}

impl RecordedRequest {
    pub fn workdir(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|p| p.get("WORKDIR"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[derive(Clone, Default)]
pub struct MockApi {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, path: impl Into<String>, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(path.into(), reply);
        self
    }

    pub fn json(self, path: impl Into<String>, value: Value) -> Self {
        self.reply(path, Reply::Json(value))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteApi for MockApi {
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let workdir_existed = payload
            .and_then(|p| p.get("WORKDIR"))
            .and_then(Value::as_str)
            .map(|dir| Path::new(dir).is_dir());

        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            payload: payload.cloned(),
            workdir_existed,
        });

        match self.replies.lock().unwrap().get(path).cloned() {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status, body)) => Err(ClientError::Api { status, body }),
            None => Err(ClientError::Api {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
