//! Scripted in-memory transport for tests.
//!
//! Replies are keyed by (method, path) where path is the uri without its
//! query string. Each key holds a queue of replies; the last one repeats.
//! Unscripted requests get a 404.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::RequestError;
use crate::sock::{Request, RequestMethod, Response, Sock};

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub queue: String,
    pub request: Request,
}

impl SentRequest {
    pub fn path(&self) -> &str { path_of(&self.request.uri) }
}

#[derive(Default)]
pub struct MockSock {
    replies: Mutex<HashMap<(RequestMethod, String), VecDeque<Response>>>,
    sent: Mutex<Vec<SentRequest>>,
}

fn path_of(uri: &str) -> &str { uri.split('?').next().unwrap_or(uri) }

impl MockSock {
    pub fn new() -> Self { Self::default() }

    /// Script a 200 reply with `data`.
    pub fn on(&self, method: RequestMethod, path: &str, data: Value) -> &Self {
        self.reply(method, path, Response::json(200, data))
    }

    /// Script an arbitrary reply.
    pub fn reply(&self, method: RequestMethod, path: &str, res: Response) -> &Self {
        let mut map = self.replies.lock().unwrap();
        map.entry((method, path.to_string())).or_default().push_back(res);
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<SentRequest> { self.sent.lock().unwrap().clone() }

    /// Requests other than GET.
    pub fn mutations(&self) -> Vec<SentRequest> {
        self.requests().into_iter().filter(|r| r.request.method != RequestMethod::Get).collect()
    }

    pub fn find(&self, method: RequestMethod, path: &str) -> Option<SentRequest> {
        self.requests().into_iter().find(|r| r.request.method == method && r.path() == path)
    }
}

#[async_trait]
impl Sock for MockSock {
    async fn request_publish(
        &self,
        queue: &str,
        req: &Request,
        _timeout: Duration,
    ) -> Result<Response, RequestError> {
        self.sent.lock()
            .unwrap()
            .push(SentRequest { queue: queue.to_string(), request: req.clone() });

        let mut map = self.replies.lock().unwrap();
        let key = (req.method, path_of(&req.uri).to_string());
        let res = match map.get_mut(&key) {
            Some(q) if q.len() > 1 => q.pop_front(),
            Some(q) => q.front().cloned(),
            None => None,
        };
        Ok(res.unwrap_or_else(|| Response::json(404, Value::Null)))
    }
}
