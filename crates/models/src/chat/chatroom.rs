use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChatType;

/// One participant's view of a chat.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chatroom {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_id: Uuid,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub chat_id: Uuid,
    pub room_owner_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Chatroom);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_id: Uuid,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub chat_id: Uuid,
    pub room_owner_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Chatroom {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_id: self.owner_id,
            chat_type: self.chat_type,
            chat_id: self.chat_id,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_keeps_participants() {
        let room = Chatroom {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            chat_type: ChatType::Group,
            chat_id: Uuid::new_v4(),
            participant_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            name: "team".into(),
            ..Default::default()
        };
        let res = room.convert_webhook_message();
        assert_eq!(res.owner_id, room.owner_id);
        assert_eq!(res.chat_id, room.chat_id);
        assert_eq!(res.chat_type, ChatType::Group);
        assert_eq!(res.participant_ids, room.participant_ids);
        assert_eq!(serde_json::to_value(&res).unwrap()["type"], "group");
    }
}
