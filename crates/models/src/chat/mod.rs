//! chat-manager resources.
//!
//! A chat is shared by its participants; each participant sees it through
//! their own chatroom. Messages exist once per chat and are fanned out as
//! one chatroom message per room.

pub mod chat;
pub mod chatroom;
pub mod messagechat;
pub mod messagechatroom;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    #[default]
    #[serde(rename = "")]
    None,
    Normal,
    Group,
}
