use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One billed usage record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Billing {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub account_id: Uuid,
    pub status: String,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub cost_per_unit: f32,
    pub cost_total: f32,
    pub billing_unit_count: f32,
    pub tm_billing_start: Option<String>,
    pub tm_billing_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Billing);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub account_id: Uuid,
    pub status: String,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub cost_per_unit: f32,
    pub cost_total: f32,
    pub billing_unit_count: f32,
    pub tm_billing_start: Option<String>,
    pub tm_billing_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Billing {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            account_id: self.account_id,
            status: self.status.clone(),
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            cost_per_unit: self.cost_per_unit,
            cost_total: self.cost_total,
            billing_unit_count: self.billing_unit_count,
            tm_billing_start: self.tm_billing_start.clone(),
            tm_billing_end: self.tm_billing_end.clone(),
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
        let b = Billing {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            status: "end".into(),
            reference_type: "call".into(),
            reference_id: Uuid::new_v4(),
            cost_per_unit: 0.02,
            cost_total: 1.2,
            billing_unit_count: 60.0,
            tm_billing_start: Some("2024-01-01 00:00:00.000000".into()),
            tm_billing_end: Some("2024-01-01 00:01:00.000000".into()),
            ..Default::default()
        };
        let res = b.convert_webhook_message();
        assert_eq!(res.account_id, b.account_id);
        assert_eq!(res.reference_id, b.reference_id);
        assert_eq!(res.cost_total, 1.2);
        assert_eq!(res.tm_billing_end, b.tm_billing_end);
        assert_eq!(serde_json::to_value(&b).unwrap(), serde_json::to_value(res).unwrap());
    }
}
