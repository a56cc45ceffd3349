//! conversation-manager resources.

pub mod account;
pub mod conversation;
pub mod message;
