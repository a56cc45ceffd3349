use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Normal,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reaction {
    pub emoji: String,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub tm_create: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub chat_id: Uuid,
    pub parent_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub text: String,
    pub medias: Vec<serde_json::Value>,
    pub reactions: Vec<Reaction>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Message);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub chat_id: Uuid,
    pub parent_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub text: String,
    pub medias: Vec<serde_json::Value>,
    pub reactions: Vec<Reaction>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Message {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_type: self.owner_type.clone(),
            owner_id: self.owner_id,
            chat_id: self.chat_id,
            parent_id: self.parent_id,
            message_type: self.message_type,
            text: self.text.clone(),
            medias: self.medias.clone(),
            reactions: self.reactions.clone(),
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
    fn decodes_reply_with_reactions() {
        let raw = r#"{"id":"72179880-ec5f-11ec-920e-c77279756b6d","customer_id":"550e8400-e29b-41d4-a716-446655440000","owner_type":"agent","owner_id":"660e8400-e29b-41d4-a716-446655440000","chat_id":"770e8400-e29b-41d4-a716-446655440000","parent_id":"880e8400-e29b-41d4-a716-446655440000","type":"normal","text":"Reply","reactions":[{"emoji":"+1","owner_type":"agent","owner_id":"660e8400-e29b-41d4-a716-446655440000"}]}"#;
        let m: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(m.message_type, MessageType::Normal);
        assert!(m.parent_id.is_some());

        let res = m.convert_webhook_message();
        assert_eq!(res.chat_id, m.chat_id);
        assert_eq!(res.parent_id, m.parent_id);
        assert_eq!(res.reactions[0].emoji, "+1");
        assert_eq!(res.text, "Reply");
    }
}
