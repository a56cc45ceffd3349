use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// One dial attempt made by a campaign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaigncall {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub campaign_id: Uuid,
    pub outplan_id: Uuid,
    pub outdial_id: Uuid,
    pub outdial_target_id: Uuid,
    pub queue_id: Uuid,
    pub activeflow_id: Uuid,
    pub flow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub result: String,
    pub source: Address,
    pub destination: Address,
    pub destination_index: i32,
    pub try_count: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Campaigncall);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub campaign_id: Uuid,
    pub outplan_id: Uuid,
    pub outdial_id: Uuid,
    pub outdial_target_id: Uuid,
    pub queue_id: Uuid,
    pub activeflow_id: Uuid,
    pub flow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub result: String,
    pub source: Address,
    pub destination: Address,
    pub destination_index: i32,
    pub try_count: i32,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Campaigncall {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            campaign_id: self.campaign_id,
            outplan_id: self.outplan_id,
            outdial_id: self.outdial_id,
            outdial_target_id: self.outdial_target_id,
            queue_id: self.queue_id,
            activeflow_id: self.activeflow_id,
            flow_id: self.flow_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            status: self.status.clone(),
            result: self.result.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            destination_index: self.destination_index,
            try_count: self.try_count,
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
