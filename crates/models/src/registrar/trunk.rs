use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trunk {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub domain_name: String,
    pub auth_types: Vec<String>,
    pub username: String,
    pub password: String,
    pub allowed_ips: Vec<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Trunk);

/// Fields accepted by trunk create and basic-info update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrunkInfo {
    pub name: String,
    pub detail: String,
    pub auth_types: Vec<String>,
    pub username: String,
    pub password: String,
    pub allowed_ips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub domain_name: String,
    pub auth_types: Vec<String>,
    pub username: String,
    pub password: String,
    pub allowed_ips: Vec<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Trunk {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            domain_name: self.domain_name.clone(),
            auth_types: self.auth_types.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            allowed_ips: self.allowed_ips.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
