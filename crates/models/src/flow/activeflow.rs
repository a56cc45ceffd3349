use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::Action;

/// A running instance of a flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Activeflow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub flow_id: Uuid,
    pub status: String,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub reference_activeflow_id: Uuid,

    pub current_stack_id: Uuid,
    pub current_action: Action,
    pub forward_stack_id: Uuid,
    pub forward_action_id: Uuid,
    pub execute_count: u64,
    pub executed_actions: Vec<Action>,

    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Activeflow);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub flow_id: Uuid,
    pub status: String,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub reference_activeflow_id: Uuid,
    pub current_action: Action,
    pub executed_actions: Vec<Action>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Activeflow {
    /// Public view; the stack bookkeeping stays internal.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            flow_id: self.flow_id,
            status: self.status.clone(),
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            reference_activeflow_id: self.reference_activeflow_id,
            current_action: self.current_action.clone(),
            executed_actions: self.executed_actions.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
