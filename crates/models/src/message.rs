//! message-manager resource (SMS/MMS).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// Delivery state for one destination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub destination: Address,
    pub status: String,
    pub parts: i32,
    pub tm_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub message_type: String,
    pub source: Address,
    pub targets: Vec<Target>,
    pub provider_name: String,
    pub provider_reference_id: String,
    pub text: String,
    pub medias: Vec<String>,
    pub direction: String,
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
    #[serde(rename = "type")]
    pub message_type: String,
    pub source: Address,
    pub targets: Vec<Target>,
    pub text: String,
    pub medias: Vec<String>,
    pub direction: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Message {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            message_type: self.message_type.clone(),
            source: self.source.clone(),
            targets: self.targets.clone(),
            text: self.text.clone(),
            medias: self.medias.clone(),
            direction: self.direction.clone(),
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
        let m = Message {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            message_type: "sms".into(),
            source: Address::tel("+821100000001"),
            targets: vec![
                Target {
                    destination: Address::tel("+821100000002"),
                    status: "sent".into(),
                    parts: 1,
                    ..Default::default()
                }
            ],
            provider_name: "telnyx".into(),
            provider_reference_id: "40385f64-5717-4562-b3fc-2c963f66afa6".into(),
            text: "hello".into(),
            direction: "outbound".into(),
            ..Default::default()
        };
        let mut src = serde_json::to_value(&m).unwrap();
        let dst = serde_json::to_value(m.convert_webhook_message()).unwrap();

        for internal in ["provider_name", "provider_reference_id"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
    }
}
