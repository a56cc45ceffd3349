use thiserror::Error;

/// Failures talking to a downstream service.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("no endpoint configured for queue {0}")]
    NoEndpoint(String),
    #[error(
        "could not send the request. queue: {queue}, method: {method}, uri: {uri}, err: {reason}"
    )]
    Transport { queue: String, method: String, uri: String, reason: String },
    #[error("request timed out. queue: {queue}, uri: {uri}")]
    Timeout { queue: String, uri: String },
    #[error("response code: {0}")]
    Status(u16),
    #[error("could not marshal the request: {0}")]
    Marshal(#[source] serde_json::Error),
    #[error("could not unmarshal the response: {0}")]
    Unmarshal(#[source] serde_json::Error),
}

impl RequestError {
    /// Downstream answered with 404.
    pub fn is_not_found(&self) -> bool { matches!(self, RequestError::Status(404)) }
}
