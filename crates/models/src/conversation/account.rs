use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credentials for a messaging provider (LINE, SMS, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub account_type: String,
    pub name: String,
    pub detail: String,
    pub secret: String,
    pub token: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Account);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub account_type: String,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Account {
    /// Public view; provider secret and token are never returned.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            account_type: self.account_type.clone(),
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
    fn credentials_do_not_leak() {
        let a = Account {
            id: Uuid::new_v4(),
            name: "line".into(),
            secret: "s3cr3t".into(),
            token: "t0k3n".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(a.convert_webhook_message()).unwrap();
        assert!(v.get("secret").is_none());
        assert!(v.get("token").is_none());
        assert_eq!(v["name"], "line");
    }
}
