use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::Action;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub flow_type: String,
    pub name: String,
    pub detail: String,
    pub persist: bool,
    pub actions: Vec<Action>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Flow);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub flow_type: String,
    pub name: String,
    pub detail: String,
    pub actions: Vec<Action>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Flow {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            flow_type: self.flow_type.clone(),
            name: self.name.clone(),
            detail: self.detail.clone(),
            actions: self.actions.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
