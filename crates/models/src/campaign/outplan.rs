use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// Dialing plan: source address, timeouts and retry budget per destination slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Outplan {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub source: Address,
    pub dial_timeout: i32,
    pub try_interval: i32,
    pub max_try_count_0: i32,
    pub max_try_count_1: i32,
    pub max_try_count_2: i32,
    pub max_try_count_3: i32,
    pub max_try_count_4: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Outplan);

/// Parameters of a dial-info update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialInfo {
    pub source: Address,
    pub dial_timeout: i32,
    pub try_interval: i32,
    pub max_try_count_0: i32,
    pub max_try_count_1: i32,
    pub max_try_count_2: i32,
    pub max_try_count_3: i32,
    pub max_try_count_4: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub source: Address,
    pub dial_timeout: i32,
    pub try_interval: i32,
    pub max_try_count_0: i32,
    pub max_try_count_1: i32,
    pub max_try_count_2: i32,
    pub max_try_count_3: i32,
    pub max_try_count_4: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Outplan {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            source: self.source.clone(),
            dial_timeout: self.dial_timeout,
            try_interval: self.try_interval,
            max_try_count_0: self.max_try_count_0,
            max_try_count_1: self.max_try_count_1,
            max_try_count_2: self.max_try_count_2,
            max_try_count_3: self.max_try_count_3,
            max_try_count_4: self.max_try_count_4,
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
