use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// A thread with an external peer over SMS or a messaging provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub detail: String,
    #[serde(rename = "type")]
    pub conversation_type: String,
    pub dialog_id: String,
    #[serde(rename = "self")]
    pub self_address: Address,
    pub peer: Address,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Conversation);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub detail: String,
    #[serde(rename = "type")]
    pub conversation_type: String,
    #[serde(rename = "self")]
    pub self_address: Address,
    pub peer: Address,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Conversation {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_type: self.owner_type.clone(),
            owner_id: self.owner_id,
            account_id: self.account_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            conversation_type: self.conversation_type.clone(),
            self_address: self.self_address.clone(),
            peer: self.peer.clone(),
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
    fn conversion_hides_dialog_id() {
        let c = Conversation {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            name: "support".into(),
            conversation_type: "line".into(),
            dialog_id: "U1234567890".into(),
            self_address: Address::tel("+821100000001"),
            peer: Address::tel("+821100000002"),
            ..Default::default()
        };
        let mut src = serde_json::to_value(&c).unwrap();
        let dst = serde_json::to_value(c.convert_webhook_message()).unwrap();

        assert!(dst.get("dialog_id").is_none());
        src.as_object_mut().unwrap().remove("dialog_id");
        assert_eq!(src, dst);
    }
}
