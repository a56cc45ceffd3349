use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChatType;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chat {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub room_owner_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Chat);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub room_owner_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Chat {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            chat_type: self.chat_type,
            room_owner_id: self.room_owner_id,
            participant_ids: self.participant_ids.clone(),
            name: self.name.clone(),
            detail: self.detail.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
