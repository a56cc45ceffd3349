use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token allowance of a billing account for one billing cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowance {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub account_id: Uuid,
    pub cycle_start: Option<String>,
    pub cycle_end: Option<String>,
    pub tokens_total: i64,
    pub tokens_used: i64,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Allowance);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub account_id: Uuid,
    pub cycle_start: Option<String>,
    pub cycle_end: Option<String>,
    pub tokens_total: i64,
    pub tokens_used: i64,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Allowance {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            account_id: self.account_id,
            cycle_start: self.cycle_start.clone(),
            cycle_end: self.cycle_end.clone(),
            tokens_total: self.tokens_total,
            tokens_used: self.tokens_used,
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
