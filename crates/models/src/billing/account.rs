use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    #[serde(rename = "")]
    None,
    Prepaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "credit card")]
    CreditCard,
}

/// Billing account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    pub balance: f32,
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
    pub name: String,
    pub detail: String,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    pub balance: f32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Account {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            payment_type: self.payment_type,
            payment_method: self.payment_method,
            balance: self.balance,
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
    fn conversion_keeps_public_fields() {
        let a = Account {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            name: "main".into(),
            detail: "main account".into(),
            payment_type: PaymentType::Prepaid,
            payment_method: PaymentMethod::CreditCard,
            balance: 12.5,
            tm_create: Some("2023-06-07 03:22:17.995000".into()),
            tm_update: None,
            tm_delete: Some(common::utils::time::DEFAULT_TIMESTAMP.into()),
        };
        let src = serde_json::to_value(&a).unwrap();
        let dst = serde_json::to_value(a.convert_webhook_message()).unwrap();
        assert_eq!(src, dst);
        assert_eq!(dst["payment_method"], "credit card");
    }
}
