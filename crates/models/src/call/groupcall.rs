use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// Parallel or linear ringing of several destinations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Groupcall {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub status: String,
    pub flow_id: Uuid,
    pub source: Address,
    pub destinations: Vec<Address>,
    pub master_call_id: Uuid,
    pub master_groupcall_id: Uuid,
    pub ring_method: String,
    pub answer_method: String,
    pub answer_call_id: Uuid,
    pub call_ids: Vec<Uuid>,
    pub answer_groupcall_id: Uuid,
    pub groupcall_ids: Vec<Uuid>,
    pub call_count: i32,
    pub groupcall_count: i32,
    pub dial_index: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Groupcall);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub status: String,
    pub flow_id: Uuid,
    pub source: Address,
    pub destinations: Vec<Address>,
    pub master_call_id: Uuid,
    pub master_groupcall_id: Uuid,
    pub ring_method: String,
    pub answer_method: String,
    pub answer_call_id: Uuid,
    pub call_ids: Vec<Uuid>,
    pub answer_groupcall_id: Uuid,
    pub groupcall_ids: Vec<Uuid>,
    pub call_count: i32,
    pub groupcall_count: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Groupcall {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_type: self.owner_type.clone(),
            owner_id: self.owner_id,
            status: self.status.clone(),
            flow_id: self.flow_id,
            source: self.source.clone(),
            destinations: self.destinations.clone(),
            master_call_id: self.master_call_id,
            master_groupcall_id: self.master_groupcall_id,
            ring_method: self.ring_method.clone(),
            answer_method: self.answer_method.clone(),
            answer_call_id: self.answer_call_id,
            call_ids: self.call_ids.clone(),
            answer_groupcall_id: self.answer_groupcall_id,
            groupcall_ids: self.groupcall_ids.clone(),
            call_count: self.call_count,
            groupcall_count: self.groupcall_count,
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
    fn conversion_hides_dial_index() {
        let g = Groupcall {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            source: Address::tel("+821100000001"),
            destinations: vec![Address::tel("+821100000002"), Address::tel("+821100000003")],
            ring_method: "linear".into(),
            answer_method: "hangup_others".into(),
            call_ids: vec![Uuid::new_v4()],
            call_count: 2,
            dial_index: 1,
            ..Default::default()
        };
        let mut src = serde_json::to_value(&g).unwrap();
        let dst = serde_json::to_value(g.convert_webhook_message()).unwrap();

        assert!(dst.get("dial_index").is_none());
        src.as_object_mut().unwrap().remove("dial_index");
        assert_eq!(src, dst);
    }
}
