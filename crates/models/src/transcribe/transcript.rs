use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transcript {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub transcribe_id: Uuid,
    pub direction: String,
    pub message: String,
    pub tm_transcript: Option<String>,
    pub tm_create: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Transcript);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub transcribe_id: Uuid,
    pub direction: String,
    pub message: String,
    pub tm_transcript: Option<String>,
    pub tm_create: Option<String>,
    pub tm_delete: Option<String>,
}

impl Transcript {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            transcribe_id: self.transcribe_id,
            direction: self.direction.clone(),
            message: self.message.clone(),
            tm_transcript: self.tm_transcript.clone(),
            tm_create: self.tm_create.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
