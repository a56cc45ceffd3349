//! tag-manager resource.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Tag);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Tag {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
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
        let t = Tag {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            name: "sales".into(),
            detail: "sales team".into(),
            tm_create: Some("2024-01-01 00:00:00.000000".into()),
            ..Default::default()
        };
        let res = t.convert_webhook_message();
        assert_eq!((res.id, res.customer_id), (t.id, t.customer_id));
        assert_eq!(res.name, "sales");
        assert_eq!(res.detail, "sales team");
        assert_eq!(res.tm_create, t.tm_create);
    }
}
