//! talk-manager resources: agent-to-agent chats.
//!
//! A `talk` chat is public to every agent of the customer. `group` and
//! `direct` chats are visible to their participants only.

pub mod chat;
pub mod message;
pub mod participant;

/// Owner type the gateway uses for agents in talk chats.
pub const OWNER_TYPE_AGENT: &str = "agent";
