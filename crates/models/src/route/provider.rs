use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::Resource;

/// An outbound SIP carrier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub hostname: String,
    pub tech_prefix: String,
    pub tech_postfix: String,
    pub tech_headers: HashMap<String, String>,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Resource for Provider {
    fn customer_id(&self) -> Uuid { Uuid::nil() }
    fn tm_delete(&self) -> Option<&str> { self.tm_delete.as_deref() }
}

/// Fields accepted by provider create and update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderInfo {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub hostname: String,
    pub tech_prefix: String,
    pub tech_postfix: String,
    pub tech_headers: HashMap<String, String>,
    pub name: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub hostname: String,
    pub tech_prefix: String,
    pub tech_postfix: String,
    pub tech_headers: HashMap<String, String>,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Provider {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            provider_type: self.provider_type.clone(),
            hostname: self.hostname.clone(),
            tech_prefix: self.tech_prefix.clone(),
            tech_postfix: self.tech_postfix.clone(),
            tech_headers: self.tech_headers.clone(),
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
    fn conversion_copies_every_field() {
        let p = Provider {
            id: Uuid::new_v4(),
            provider_type: "sip".into(),
            hostname: "sip.telnyx.com".into(),
            tech_prefix: "0001".into(),
            tech_headers: HashMap::from([("X-Account".to_string(), "acme".to_string())]),
            name: "telnyx".into(),
            ..Default::default()
        };
        let res = p.convert_webhook_message();
        assert_eq!(res.hostname, p.hostname);
        assert_eq!(res.tech_headers, p.tech_headers);
        assert_eq!(serde_json::to_value(&p).unwrap(), serde_json::to_value(res).unwrap());
    }

    #[test]
    fn providers_have_no_owner() {
        assert!(Provider { id: Uuid::new_v4(), ..Default::default() }.customer_id().is_nil());
    }
}
