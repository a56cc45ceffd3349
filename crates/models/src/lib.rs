//! Downstream data transfer objects and their public webhook shapes.
//! - One module per downstream service, one submodule per resource.
//! - Every resource exposes `convert_webhook_message()`; the webhook type drops
//!   internal bookkeeping (channel ids, secrets, provider references).
//! - `resource::Resource` is what the ownership check reads.

pub mod errors;
pub mod db;
pub mod resource;
pub mod address;

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
