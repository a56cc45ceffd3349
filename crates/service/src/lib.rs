//! Service-handler layer of the API gateway.
//! - `servicehandler::ServiceHandler` authorizes the calling agent, forwards
//!   each operation to the owning downstream service and returns the
//!   customer-facing webhook message.
//! - `errors` maps downstream failures onto the gateway's error kinds.
//! - `dbhandler` backs the readiness check.
//!
//! ```
//! use std::sync::Arc;
//! use models::agent::{Agent, Permission};
//! use requesthandler::mock::MockSock;
//! use requesthandler::{RequestHandlerClient, RequestMethod};
//! use service::dbhandler::mock::MockDbHandler;
//! use service::ServiceHandler;
//!
//! let client = Arc::new(RequestHandlerClient::new(MockSock::default(), "api-manager"));
//! let h = ServiceHandler::new(client.clone(), Arc::new(MockDbHandler::default()));
//! let a = Agent { customer_id: uuid::Uuid::new_v4(), permission: Permission::CUSTOMER_ADMIN, ..Default::default() };
//! client.sock().on(RequestMethod::Get, "/v1/tags", serde_json::json!([{"name": "sales"}]));
//!
//! let tags = tokio_test::block_on(h.tag_list(&a, 10, "")).unwrap();
//! assert_eq!(tags[0].name, "sales");
//! ```

pub mod dbhandler;
pub mod errors;
pub mod servicehandler;
#[cfg(test)]
mod test_support;

pub use dbhandler::{DbHandler, SeaOrmDbHandler};
pub use errors::ServiceError;
pub use servicehandler::ServiceHandler;
