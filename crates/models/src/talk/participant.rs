use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership of one owner (usually an agent) in a talk chat.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub chat_id: Uuid,
    pub tm_joined: Option<String>,
}

impl Participant {
    pub fn is_agent(&self, agent_id: Uuid) -> bool {
        self.owner_type == super::OWNER_TYPE_AGENT && self.owner_id == agent_id
    }

    pub fn convert_webhook_message(&self) -> WebhookMessage { self.clone() }
}

/// Participants carry nothing internal.
pub type WebhookMessage = Participant;

/// Participant to add when a chat is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantInput {
    pub owner_type: String,
    pub owner_id: Uuid,
}
