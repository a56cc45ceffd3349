use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::participant::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalkType {
    #[default]
    #[serde(rename = "")]
    None,
    Talk,
    Group,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chat {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub talk_type: TalkType,
    pub name: String,
    pub detail: String,
    pub participants: Vec<Participant>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Chat);

impl Chat {
    pub fn has_agent(&self, agent_id: Uuid) -> bool {
        self.participants.iter().any(|p| p.is_agent(agent_id))
    }

    /// Whether the agent may read the chat's messages: public talks are
    /// open to the whole customer, the rest to participants only.
    pub fn is_readable_by(&self, agent_id: Uuid, customer_id: Uuid) -> bool {
        (self.talk_type == TalkType::Talk && self.customer_id == customer_id) || self
            .has_agent(agent_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub talk_type: TalkType,
    pub name: String,
    pub detail: String,
    pub participants: Vec<Participant>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Chat {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            talk_type: self.talk_type,
            name: self.name.clone(),
            detail: self.detail.clone(),
            participants: self.participants.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
