//! Downstream RPC client.
//! - `Sock` is the transport seam; `http::HttpSock` talks to real services,
//!   `mock::MockSock` replays scripted replies in tests.
//! - One trait per downstream service (`AgentRequest`, `CallRequest`, ...);
//!   `RequestHandler` bundles them all and is what the service layer holds.
//! - Every RPC is named `<service>_v<version>_<resource>_<action>`.

use std::collections::BTreeMap;
use std::time::Duration;

use configs::RequestHandlerConfig;

pub mod errors;
pub mod http;
pub mod metrics;
pub mod mock;
pub mod outline;
pub mod send_request;
pub mod sock;

pub mod agent;
pub mod billing;
pub mod call;
pub mod campaign;
pub mod chat;
pub mod chatbot;
pub mod conference;
pub mod contact;
pub mod conversation;
pub mod customer;
pub mod flow;
pub mod message;
pub mod number;
pub mod outdial;
pub mod queue;
pub mod registrar;
pub mod route;
pub mod storage;
pub mod tag;
pub mod talk;
pub mod transcribe;
pub mod transfer;

pub use errors::RequestError;
pub use sock::{Request, RequestMethod, Response, Sock};

pub use agent::AgentRequest;
pub use billing::BillingRequest;
pub use call::CallRequest;
pub use campaign::CampaignRequest;
pub use chat::ChatRequest;
pub use chatbot::ChatbotRequest;
pub use conference::ConferenceRequest;
pub use contact::ContactRequest;
pub use conversation::ConversationRequest;
pub use customer::CustomerRequest;
pub use flow::FlowRequest;
pub use message::MessageRequest;
pub use number::NumberRequest;
pub use outdial::OutdialRequest;
pub use queue::QueueRequest;
pub use registrar::RegistrarRequest;
pub use route::RouteRequest;
pub use storage::StorageRequest;
pub use tag::TagRequest;
pub use talk::TalkRequest;
pub use transcribe::TranscribeRequest;
pub use transfer::TransferRequest;

/// List filters, sent as the JSON body of list requests.
pub type Filters = BTreeMap<String, serde_json::Value>;

pub const DEFAULT_PUBLISHER: &str = "api-manager";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Every downstream RPC the gateway can issue.
pub trait RequestHandler:
    AgentRequest
    + BillingRequest
    + CallRequest
    + CampaignRequest
    + ChatRequest
    + ChatbotRequest
    + ConferenceRequest
    + ContactRequest
    + ConversationRequest
    + CustomerRequest
    + FlowRequest
    + MessageRequest
    + NumberRequest
    + OutdialRequest
    + QueueRequest
    + RegistrarRequest
    + RouteRequest
    + StorageRequest
    + TagRequest
    + TalkRequest
    + TranscribeRequest
    + TransferRequest
{
}

impl<T> RequestHandler for T where
    T: AgentRequest
        + BillingRequest
        + CallRequest
        + CampaignRequest
        + ChatRequest
        + ChatbotRequest
        + ConferenceRequest
        + ContactRequest
        + ConversationRequest
        + CustomerRequest
        + FlowRequest
        + MessageRequest
        + NumberRequest
        + OutdialRequest
        + QueueRequest
        + RegistrarRequest
        + RouteRequest
        + StorageRequest
        + TagRequest
        + TalkRequest
        + TranscribeRequest
        + TransferRequest
{
}

/// Implements every RPC trait on top of a [`Sock`].
///
/// ```
/// use requesthandler::{mock::MockSock, RequestHandlerClient, TagRequest, RequestMethod};
/// use serde_json::json;
///
/// let sock = MockSock::new();
/// sock.on(RequestMethod::Get, "/v1/tags/2ad6a5a6-4ff7-11ee-8c3b-9b4a1e4e1d0b", json!({"name": "vip"}));
/// let rh = RequestHandlerClient::new(sock, "api-manager");
/// let id = uuid::Uuid::parse_str("2ad6a5a6-4ff7-11ee-8c3b-9b4a1e4e1d0b").unwrap();
/// let tag = tokio_test::block_on(rh.tag_v1_tag_get(id)).unwrap();
/// assert_eq!(tag.name, "vip");
/// assert_eq!(rh.sock().requests()[0].queue, "bin-manager.tag-manager.request");
/// ```
pub struct RequestHandlerClient<S: Sock> {
    sock: S,
    publisher: String,
    timeout: Duration,
}

impl<S: Sock> RequestHandlerClient<S> {
    pub fn new(sock: S, publisher: &str) -> Self {
        Self { sock, publisher: publisher.to_string(), timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sock(&self) -> &S { &self.sock }

    pub fn publisher(&self) -> &str { &self.publisher }
}

impl RequestHandlerClient<http::HttpSock> {
    /// HTTP-backed client built from the `[request_handler]` section.
    pub fn from_config(cfg: &RequestHandlerConfig) -> Result<Self, RequestError> {
        let sock = http::HttpSock::from_config(cfg)?;
        Ok(Self::new(sock, &cfg.publisher).with_timeout(Duration::from_millis(cfg.timeout_ms)))
    }
}
