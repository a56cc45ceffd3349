//! customer-manager resource. A customer is the tenant every other resource
//! belongs to, so its own id doubles as its owning customer id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub detail: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub webhook_method: String,
    pub webhook_uri: String,
    pub billing_account_id: Uuid,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Resource for Customer {
    fn customer_id(&self) -> Uuid { self.id }
    fn tm_delete(&self) -> Option<&str> { self.tm_delete.as_deref() }
}

/// Fields accepted by customer create and update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInfo {
    pub name: String,
    pub detail: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub webhook_method: String,
    pub webhook_uri: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub name: String,
    pub detail: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub webhook_method: String,
    pub webhook_uri: String,
    pub billing_account_id: Uuid,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Customer {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
            webhook_method: self.webhook_method.clone(),
            webhook_uri: self.webhook_uri.clone(),
            billing_account_id: self.billing_account_id,
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
    fn owner_is_itself() {
        let c = Customer { id: Uuid::new_v4(), ..Default::default() };
        assert_eq!(c.customer_id(), c.id);
    }

    #[test]
    fn conversion_keeps_public_fields() {
        let c = Customer {
            id: Uuid::new_v4(),
            name: "acme".into(),
            email: "ops@acme.example".into(),
            webhook_method: "POST".into(),
            webhook_uri: "https://acme.example/hook".into(),
            billing_account_id: Uuid::new_v4(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            serde_json::to_value(c.convert_webhook_message()).unwrap()
        );
    }
}
