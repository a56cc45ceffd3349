use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// One entry of a dialing list, with up to five destinations.
///
/// Targets carry no customer id; ownership is decided through the parent
/// outdial.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutdialTarget {
    pub id: Uuid,
    pub outdial_id: Uuid,
    pub name: String,
    pub detail: String,
    pub data: String,
    pub status: String,
    pub destination_0: Option<Address>,
    pub destination_1: Option<Address>,
    pub destination_2: Option<Address>,
    pub destination_3: Option<Address>,
    pub destination_4: Option<Address>,
    pub try_count_0: i32,
    pub try_count_1: i32,
    pub try_count_2: i32,
    pub try_count_3: i32,
    pub try_count_4: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl OutdialTarget {
    pub fn is_deleted(&self) -> bool { common::utils::time::is_deleted(self.tm_delete.as_deref()) }
}

/// Payload of a target create.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetInfo {
    pub name: String,
    pub detail: String,
    pub data: String,
    pub destination_0: Option<Address>,
    pub destination_1: Option<Address>,
    pub destination_2: Option<Address>,
    pub destination_3: Option<Address>,
    pub destination_4: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub outdial_id: Uuid,
    pub name: String,
    pub detail: String,
    pub data: String,
    pub status: String,
    pub destination_0: Option<Address>,
    pub destination_1: Option<Address>,
    pub destination_2: Option<Address>,
    pub destination_3: Option<Address>,
    pub destination_4: Option<Address>,
    pub try_count_0: i32,
    pub try_count_1: i32,
    pub try_count_2: i32,
    pub try_count_3: i32,
    pub try_count_4: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl OutdialTarget {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            outdial_id: self.outdial_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            data: self.data.clone(),
            status: self.status.clone(),
            destination_0: self.destination_0.clone(),
            destination_1: self.destination_1.clone(),
            destination_2: self.destination_2.clone(),
            destination_3: self.destination_3.clone(),
            destination_4: self.destination_4.clone(),
            try_count_0: self.try_count_0,
            try_count_1: self.try_count_1,
            try_count_2: self.try_count_2,
            try_count_3: self.try_count_3,
            try_count_4: self.try_count_4,
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
    fn conversion_keeps_destinations_and_counts() {
        let t = OutdialTarget {
            id: Uuid::new_v4(),
            outdial_id: Uuid::new_v4(),
            name: "lead 1".into(),
            status: "idle".into(),
            destination_0: Some(Address::tel("+821100000001")),
            destination_2: Some(Address::tel("+821100000003")),
            try_count_0: 2,
            try_count_2: 1,
            ..Default::default()
        };
        let res = t.convert_webhook_message();
        assert_eq!(res.outdial_id, t.outdial_id);
        assert_eq!(res.destination_0, t.destination_0);
        assert_eq!(res.destination_1, None);
        assert_eq!(res.destination_2, t.destination_2);
        assert_eq!((res.try_count_0, res.try_count_2), (2, 1));
        assert_eq!(serde_json::to_value(&t).unwrap(), serde_json::to_value(res).unwrap());
    }
}
