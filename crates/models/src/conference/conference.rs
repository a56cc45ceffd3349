use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::action::Action;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conference {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub confbridge_id: Uuid,
    #[serde(rename = "type")]
    pub conference_type: String,
    pub status: String,
    pub name: String,
    pub detail: String,
    pub data: HashMap<String, serde_json::Value>,
    pub timeout: i32,
    pub pre_flow_id: Uuid,
    pub post_flow_id: Uuid,
    pub pre_actions: Vec<Action>,
    pub post_actions: Vec<Action>,
    pub conferencecall_ids: Vec<Uuid>,
    pub recording_id: Uuid,
    pub recording_ids: Vec<Uuid>,
    pub transcribe_id: Uuid,
    pub transcribe_ids: Vec<Uuid>,
    pub tm_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Conference);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub conference_type: String,
    pub status: String,
    pub name: String,
    pub detail: String,
    pub data: HashMap<String, serde_json::Value>,
    pub timeout: i32,
    pub pre_actions: Vec<Action>,
    pub post_actions: Vec<Action>,
    pub conferencecall_ids: Vec<Uuid>,
    pub recording_id: Uuid,
    pub recording_ids: Vec<Uuid>,
    pub transcribe_id: Uuid,
    pub transcribe_ids: Vec<Uuid>,
    pub tm_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Conference {
    /// Public view; the bridge and the generated pre/post flows stay internal.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            conference_type: self.conference_type.clone(),
            status: self.status.clone(),
            name: self.name.clone(),
            detail: self.detail.clone(),
            data: self.data.clone(),
            timeout: self.timeout,
            pre_actions: self.pre_actions.clone(),
            post_actions: self.post_actions.clone(),
            conferencecall_ids: self.conferencecall_ids.clone(),
            recording_id: self.recording_id,
            recording_ids: self.recording_ids.clone(),
            transcribe_id: self.transcribe_id,
            transcribe_ids: self.transcribe_ids.clone(),
            tm_end: self.tm_end.clone(),
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
    fn conversion_hides_bridge_and_hook_flows() {
        let c = Conference {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            confbridge_id: Uuid::new_v4(),
            conference_type: "conference".into(),
            status: "progressing".into(),
            name: "weekly".into(),
            data: HashMap::from([("topic".to_string(), serde_json::json!("sync"))]),
            timeout: 3600,
            pre_flow_id: Uuid::new_v4(),
            post_flow_id: Uuid::new_v4(),
            pre_actions: vec![Action::new("answer", serde_json::json!({}))],
            conferencecall_ids: vec![Uuid::new_v4()],
            ..Default::default()
        };
        let res = c.convert_webhook_message();
        assert_eq!(res.timeout, 3600);
        assert_eq!(res.data["topic"], "sync");
        assert_eq!(res.pre_actions, c.pre_actions);
        assert_eq!(res.conferencecall_ids, c.conferencecall_ids);

        let v = serde_json::to_value(&res).unwrap();
        for internal in ["confbridge_id", "pre_flow_id", "post_flow_id"] {
            assert!(v.get(internal).is_none(), "{internal} leaked");
        }
    }
}
