use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Stop,
    Stopping,
    Run,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub campaign_type: String,
    pub execute: String,
    pub name: String,
    pub detail: String,
    pub status: Status,
    pub service_level: i32,
    pub end_handle: String,
    pub flow_id: Uuid,
    pub actions: Vec<Action>,
    pub outplan_id: Uuid,
    pub outdial_id: Uuid,
    pub queue_id: Uuid,
    pub next_campaign_id: Uuid,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Campaign);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub campaign_type: String,
    pub name: String,
    pub detail: String,
    pub status: Status,
    pub service_level: i32,
    pub end_handle: String,
    pub actions: Vec<Action>,
    pub outplan_id: Uuid,
    pub outdial_id: Uuid,
    pub queue_id: Uuid,
    pub next_campaign_id: Uuid,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Campaign {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            campaign_type: self.campaign_type.clone(),
            name: self.name.clone(),
            detail: self.detail.clone(),
            status: self.status,
            service_level: self.service_level,
            end_handle: self.end_handle.clone(),
            actions: self.actions.clone(),
            outplan_id: self.outplan_id,
            outdial_id: self.outdial_id,
            queue_id: self.queue_id,
            next_campaign_id: self.next_campaign_id,
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
    fn conversion_hides_execution_state() {
        let c = Campaign {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            campaign_type: "call".into(),
            execute: "run".into(),
            name: "spring sale".into(),
            status: Status::Run,
            service_level: 100,
            end_handle: "stop".into(),
            flow_id: Uuid::new_v4(),
            actions: vec![Action::new("talk", serde_json::json!({"text": "hi"}))],
            outplan_id: Uuid::new_v4(),
            ..Default::default()
        };
        let mut src = serde_json::to_value(&c).unwrap();
        let dst = serde_json::to_value(c.convert_webhook_message()).unwrap();

        for internal in ["execute", "flow_id"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
        assert_eq!(dst["status"], "run");
    }
}
