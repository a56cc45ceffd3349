use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chatbot attached to a live call or conversation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chatbotcall {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub chatbot_id: Uuid,
    pub chatbot_engine_type: String,
    pub activeflow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub confbridge_id: Uuid,
    pub transcribe_id: Uuid,
    pub status: String,
    pub gender: String,
    pub language: String,
    pub messages: Vec<serde_json::Value>,
    pub tm_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Chatbotcall);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub chatbot_id: Uuid,
    pub chatbot_engine_type: String,
    pub activeflow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub gender: String,
    pub language: String,
    pub messages: Vec<serde_json::Value>,
    pub tm_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Chatbotcall {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            chatbot_id: self.chatbot_id,
            chatbot_engine_type: self.chatbot_engine_type.clone(),
            activeflow_id: self.activeflow_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            status: self.status.clone(),
            gender: self.gender.clone(),
            language: self.language.clone(),
            messages: self.messages.clone(),
            tm_end: self.tm_end.clone(),
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
    fn conversion_hides_bridge_and_transcribe() {
        let c = Chatbotcall {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            chatbot_id: Uuid::new_v4(),
            chatbot_engine_type: "chatGPT".into(),
            reference_type: "call".into(),
            reference_id: Uuid::new_v4(),
            confbridge_id: Uuid::new_v4(),
            transcribe_id: Uuid::new_v4(),
            status: "progressing".into(),
            messages: vec![serde_json::json!({"role": "user", "content": "hi"})],
            ..Default::default()
        };
        let mut src = serde_json::to_value(&c).unwrap();
        let dst = serde_json::to_value(c.convert_webhook_message()).unwrap();

        for internal in ["confbridge_id", "transcribe_id"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
    }
}
