//! transfer-manager resource.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    #[default]
    #[serde(rename = "")]
    None,
    Attended,
    Blind,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    pub transferer_call_id: Uuid,
    pub transferee_addresses: Vec<Address>,
    pub transferee_call_id: Uuid,
    pub groupcall_id: Uuid,
    pub confbridge_id: Uuid,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Transfer);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    pub transferer_call_id: Uuid,
    pub transferee_addresses: Vec<Address>,
    pub transferee_call_id: Uuid,
    pub groupcall_id: Uuid,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Transfer {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            transfer_type: self.transfer_type,
            transferer_call_id: self.transferer_call_id,
            transferee_addresses: self.transferee_addresses.clone(),
            transferee_call_id: self.transferee_call_id,
            groupcall_id: self.groupcall_id,
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
    fn conversion_hides_confbridge() {
        let t = Transfer {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            transfer_type: TransferType::Attended,
            transferer_call_id: Uuid::new_v4(),
            transferee_addresses: vec![Address::tel("+821100000002")],
            transferee_call_id: Uuid::new_v4(),
            groupcall_id: Uuid::new_v4(),
            confbridge_id: Uuid::new_v4(),
            ..Default::default()
        };
        let res = t.convert_webhook_message();
        assert_eq!(res.transfer_type, TransferType::Attended);
        assert_eq!(res.transferer_call_id, t.transferer_call_id);
        assert_eq!(res.transferee_addresses, t.transferee_addresses);
        assert_eq!(res.groupcall_id, t.groupcall_id);

        let v = serde_json::to_value(&res).unwrap();
        assert!(v.get("confbridge_id").is_none());
        assert_eq!(v["type"], "attended");
    }
}
