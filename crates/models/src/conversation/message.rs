use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub conversation_id: Uuid,
    pub direction: String,
    pub status: String,
    pub reference_type: String,
    pub reference_id: String,
    pub transaction_id: String,
    pub text: String,
    pub medias: Vec<serde_json::Value>,
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
    pub conversation_id: Uuid,
    pub direction: String,
    pub status: String,
    pub reference_type: String,
    pub reference_id: String,
    pub text: String,
    pub medias: Vec<serde_json::Value>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Message {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            conversation_id: self.conversation_id,
            direction: self.direction.clone(),
            status: self.status.clone(),
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id.clone(),
            text: self.text.clone(),
            medias: self.medias.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
