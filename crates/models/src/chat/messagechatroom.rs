use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Messagechatroom {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_id: Uuid,
    pub chatroom_id: Uuid,
    pub messagechat_id: Uuid,
    pub source: Address,
    pub message_type: String,
    pub text: String,
    pub medias: Vec<serde_json::Value>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Messagechatroom);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_id: Uuid,
    pub chatroom_id: Uuid,
    pub messagechat_id: Uuid,
    pub source: Address,
    pub message_type: String,
    pub text: String,
    pub medias: Vec<serde_json::Value>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Messagechatroom {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_id: self.owner_id,
            chatroom_id: self.chatroom_id,
            messagechat_id: self.messagechat_id,
            source: self.source.clone(),
            message_type: self.message_type.clone(),
            text: self.text.clone(),
            medias: self.medias.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
