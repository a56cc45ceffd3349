//! Request/response envelope and the transport seam.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RequestError;

pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Message sent to a downstream service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub uri: String,
    pub method: RequestMethod,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Reply from a downstream service. `data` is the JSON body, `Null` when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Response {
    pub fn json(status_code: u16, data: serde_json::Value) -> Self {
        Self { status_code, data_type: CONTENT_TYPE_JSON.to_string(), data }
    }
}

/// Delivers a request to a downstream queue and waits for its reply.
#[async_trait]
pub trait Sock: Send + Sync {
    async fn request_publish(
        &self,
        queue: &str,
        req: &Request,
        timeout: Duration,
    ) -> Result<Response, RequestError>;
}
