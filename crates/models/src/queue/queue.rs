use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMethod {
    #[default]
    #[serde(rename = "")]
    None,
    Random,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Queue {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub routing_method: RoutingMethod,
    pub tag_ids: Vec<Uuid>,
    pub execute: String,
    pub wait_actions: Vec<Action>,
    pub wait_timeout: i32,
    pub service_timeout: i32,
    pub wait_queuecall_ids: Vec<Uuid>,
    pub service_queuecall_ids: Vec<Uuid>,
    pub total_incoming_count: i64,
    pub total_serviced_count: i64,
    pub total_abandoned_count: i64,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Queue);

/// Fields accepted by queue create and the full update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueInfo {
    pub name: String,
    pub detail: String,
    pub routing_method: RoutingMethod,
    pub tag_ids: Vec<Uuid>,
    pub wait_actions: Vec<Action>,
    pub wait_timeout: i32,
    pub service_timeout: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub detail: String,
    pub routing_method: RoutingMethod,
    pub tag_ids: Vec<Uuid>,
    pub wait_actions: Vec<Action>,
    pub wait_timeout: i32,
    pub service_timeout: i32,
    pub wait_queuecall_ids: Vec<Uuid>,
    pub service_queuecall_ids: Vec<Uuid>,
    pub total_incoming_count: i64,
    pub total_serviced_count: i64,
    pub total_abandoned_count: i64,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Queue {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            routing_method: self.routing_method,
            tag_ids: self.tag_ids.clone(),
            wait_actions: self.wait_actions.clone(),
            wait_timeout: self.wait_timeout,
            service_timeout: self.service_timeout,
            wait_queuecall_ids: self.wait_queuecall_ids.clone(),
            service_queuecall_ids: self.service_queuecall_ids.clone(),
            total_incoming_count: self.total_incoming_count,
            total_serviced_count: self.total_serviced_count,
            total_abandoned_count: self.total_abandoned_count,
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
