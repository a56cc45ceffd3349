use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A participant leg in a conference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conferencecall {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub activeflow_id: Uuid,
    pub conference_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Conferencecall);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub activeflow_id: Uuid,
    pub conference_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Conferencecall {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            activeflow_id: self.activeflow_id,
            conference_id: self.conference_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            status: self.status.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
