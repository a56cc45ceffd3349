use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchased phone number and the flows it triggers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Number {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub number: String,
    pub call_flow_id: Uuid,
    pub message_flow_id: Uuid,
    pub name: String,
    pub detail: String,
    pub provider_name: String,
    pub provider_reference_id: String,
    pub status: String,
    pub t38_enabled: bool,
    pub emergency_enabled: bool,
    pub tm_purchase: Option<String>,
    pub tm_renew: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Number);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub number: String,
    pub call_flow_id: Uuid,
    pub message_flow_id: Uuid,
    pub name: String,
    pub detail: String,
    pub status: String,
    pub t38_enabled: bool,
    pub emergency_enabled: bool,
    pub tm_purchase: Option<String>,
    pub tm_renew: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Number {
    /// Public view; the carrier name and its reference id stay internal.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            number: self.number.clone(),
            call_flow_id: self.call_flow_id,
            message_flow_id: self.message_flow_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            status: self.status.clone(),
            t38_enabled: self.t38_enabled,
            emergency_enabled: self.emergency_enabled,
            tm_purchase: self.tm_purchase.clone(),
            tm_renew: self.tm_renew.clone(),
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
    fn conversion_hides_provider() {
        let n = Number {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            number: "+821100000001".into(),
            call_flow_id: Uuid::new_v4(),
            message_flow_id: Uuid::new_v4(),
            provider_name: "telnyx".into(),
            provider_reference_id: "1748688147379652251".into(),
            status: "active".into(),
            emergency_enabled: true,
            tm_renew: Some("2024-02-01 00:00:00.000000".into()),
            ..Default::default()
        };
        let res = n.convert_webhook_message();
        assert_eq!(res.number, n.number);
        assert_eq!(res.call_flow_id, n.call_flow_id);
        assert_eq!(res.message_flow_id, n.message_flow_id);
        assert!(res.emergency_enabled);
        assert_eq!(res.tm_renew, n.tm_renew);

        let v = serde_json::to_value(&res).unwrap();
        assert!(v.get("provider_name").is_none());
        assert!(v.get("provider_reference_id").is_none());
    }
}
