//! HTTP transport: each downstream queue maps to a base URL.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use configs::RequestHandlerConfig;
use tracing::warn;

use crate::errors::RequestError;
use crate::outline::QueueName;
use crate::sock::{Request, RequestMethod, Response, Sock, CONTENT_TYPE_JSON};

pub const PUBLISHER_HEADER: &str = "x-publisher";

#[derive(Debug, Clone)]
pub struct HttpSock {
    client: reqwest::Client,
    endpoints: HashMap<String, String>,
}

impl HttpSock {
    pub fn new(client: reqwest::Client, endpoints: HashMap<String, String>) -> Self {
        let endpoints = endpoints.into_iter()
            .map(|(k, v)| (k, v.trim_end_matches('/').to_string()))
            .collect();
        Self { client, endpoints }
    }

    pub fn from_config(cfg: &RequestHandlerConfig) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(
                |e| RequestError::Transport {
                    queue: "-".into(),
                    method: "-".into(),
                    uri: "-".into(),
                    reason: e.to_string(),
                },
            )?;
        Ok(Self::new(client, cfg.endpoints.clone()))
    }

    fn endpoint(&self, queue: &str) -> Result<&str, RequestError> {
        let service = QueueName::service_of(queue).unwrap_or(queue);
        self.endpoints
            .get(service)
            .map(String::as_str)
            .ok_or_else(|| RequestError::NoEndpoint(queue.to_string()))
    }
}

fn to_http_method(m: RequestMethod) -> reqwest::Method {
    match m {
        RequestMethod::Get => reqwest::Method::GET,
        RequestMethod::Post => reqwest::Method::POST,
        RequestMethod::Put => reqwest::Method::PUT,
        RequestMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Sock for HttpSock {
    async fn request_publish(
        &self,
        queue: &str,
        req: &Request,
        timeout: Duration,
    ) -> Result<Response, RequestError> {
        let url = format!("{}{}", self.endpoint(queue)?, req.uri);
        let transport_err = |reason: String| RequestError::Transport {
            queue: queue.to_string(),
            method: req.method.to_string(),
            uri: req.uri.clone(),
            reason,
        };

        let mut builder = self.client
            .request(to_http_method(req.method), &url)
            .timeout(timeout)
            .header(PUBLISHER_HEADER, &req.publisher);
        if let Some(data) = &req.data {
            builder = builder.json(data);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RequestError::Timeout { queue: queue.to_string(), uri: req.uri.clone() }
            } else {
                transport_err(e.to_string())
            }
        })?;

        let status_code = resp.status().as_u16();
        let data_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(CONTENT_TYPE_JSON)
            .to_string();
        let body = resp.bytes().await.map_err(|e| transport_err(e.to_string()))?;

        let data = if body.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_slice(&body) {
                Ok(v) => v,
                // error replies are often plain text; only the status matters then
                Err(_) if status_code > 299 => serde_json::Value::String(
                    String::from_utf8_lossy(&body).into_owned(),
                ),
                Err(e) => {
                    warn!(queue = %queue, uri = %req.uri, status_code, "unparsable_reply_body");
                    return Err(RequestError::Unmarshal(e));
                }
            }
        };

        Ok(Response { status_code, data_type, data })
    }
}
