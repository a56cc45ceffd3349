use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

use super::queue::RoutingMethod;

/// A call waiting in, or being serviced by, a queue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Queuecall {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub queue_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub reference_activeflow_id: Uuid,
    pub forward_action_id: Uuid,
    pub exit_action_id: Uuid,
    pub confbridge_id: Uuid,
    pub source: Address,
    pub routing_method: RoutingMethod,
    pub tag_ids: Vec<Uuid>,
    pub status: String,
    pub service_agent_id: Uuid,
    pub timeout_wait: i32,
    pub timeout_service: i32,
    pub duration_waiting: i32,
    pub duration_service: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Queuecall);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub queue_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub reference_activeflow_id: Uuid,
    pub source: Address,
    pub routing_method: RoutingMethod,
    pub tag_ids: Vec<Uuid>,
    pub status: String,
    pub service_agent_id: Uuid,
    pub timeout_wait: i32,
    pub timeout_service: i32,
    pub duration_waiting: i32,
    pub duration_service: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Queuecall {
    /// Public view; flow jump targets and the bridge id stay internal.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            queue_id: self.queue_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            reference_activeflow_id: self.reference_activeflow_id,
            source: self.source.clone(),
            routing_method: self.routing_method,
            tag_ids: self.tag_ids.clone(),
            status: self.status.clone(),
            service_agent_id: self.service_agent_id,
            timeout_wait: self.timeout_wait,
            timeout_service: self.timeout_service,
            duration_waiting: self.duration_waiting,
            duration_service: self.duration_service,
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
    fn conversion_hides_flow_plumbing() {
        let qc = Queuecall {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            queue_id: Uuid::new_v4(),
            reference_type: "call".into(),
            reference_id: Uuid::new_v4(),
            forward_action_id: Uuid::new_v4(),
            exit_action_id: Uuid::new_v4(),
            confbridge_id: Uuid::new_v4(),
            source: Address::tel("+821100000001"),
            routing_method: RoutingMethod::Random,
            tag_ids: vec![Uuid::new_v4()],
            status: "waiting".into(),
            service_agent_id: Uuid::new_v4(),
            duration_waiting: 12,
            ..Default::default()
        };
        let mut src = serde_json::to_value(&qc).unwrap();
        let dst = serde_json::to_value(qc.convert_webhook_message()).unwrap();

        for internal in ["forward_action_id", "exit_action_id", "confbridge_id"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
    }
}
