use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;
use crate::flow::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuteDirection {
    #[default]
    #[serde(rename = "")]
    None,
    Both,
    #[serde(rename = "in")]
    Incoming,
    #[serde(rename = "out")]
    Outgoing,
}

/// A single call leg as call-manager tracks it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Call {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,

    pub channel_id: String,
    pub bridge_id: String,

    pub flow_id: Uuid,
    pub activeflow_id: Uuid,
    pub confbridge_id: Uuid,
    #[serde(rename = "type")]
    pub call_type: String,

    pub master_call_id: Uuid,
    pub chained_call_ids: Vec<Uuid>,
    pub recording_id: Uuid,
    pub recording_ids: Vec<Uuid>,
    pub groupcall_id: Uuid,

    pub source: Address,
    pub destination: Address,

    pub status: String,
    pub action: Action,
    pub action_next_hold: bool,
    pub direction: String,
    pub mute_direction: MuteDirection,

    pub hangup_by: String,
    pub hangup_reason: String,

    pub dialroute_id: Uuid,

    pub tm_ringing: Option<String>,
    pub tm_progressing: Option<String>,
    pub tm_hangup: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Call);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,

    pub flow_id: Uuid,
    pub activeflow_id: Uuid,
    pub confbridge_id: Uuid,
    #[serde(rename = "type")]
    pub call_type: String,

    pub master_call_id: Uuid,
    pub chained_call_ids: Vec<Uuid>,
    pub recording_id: Uuid,
    pub recording_ids: Vec<Uuid>,
    pub groupcall_id: Uuid,

    pub source: Address,
    pub destination: Address,

    pub status: String,
    pub action: Action,
    pub direction: String,
    pub mute_direction: MuteDirection,

    pub hangup_by: String,
    pub hangup_reason: String,

    pub tm_ringing: Option<String>,
    pub tm_progressing: Option<String>,
    pub tm_hangup: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Call {
    /// Public view; drops the asterisk channel/bridge ids, the action hold
    /// flag and the dial route in use.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_type: self.owner_type.clone(),
            owner_id: self.owner_id,
            flow_id: self.flow_id,
            activeflow_id: self.activeflow_id,
            confbridge_id: self.confbridge_id,
            call_type: self.call_type.clone(),
            master_call_id: self.master_call_id,
            chained_call_ids: self.chained_call_ids.clone(),
            recording_id: self.recording_id,
            recording_ids: self.recording_ids.clone(),
            groupcall_id: self.groupcall_id,
            source: self.source.clone(),
            destination: self.destination.clone(),
            status: self.status.clone(),
            action: self.action.clone(),
            direction: self.direction.clone(),
            mute_direction: self.mute_direction,
            hangup_by: self.hangup_by.clone(),
            hangup_reason: self.hangup_reason.clone(),
            tm_ringing: self.tm_ringing.clone(),
            tm_progressing: self.tm_progressing.clone(),
            tm_hangup: self.tm_hangup.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Call {
        Call {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            owner_type: "agent".into(),
            owner_id: Uuid::new_v4(),
            channel_id: "1687349592.1234".into(),
            bridge_id: "bridge-1".into(),
            flow_id: Uuid::new_v4(),
            activeflow_id: Uuid::new_v4(),
            call_type: "flow".into(),
            chained_call_ids: vec![Uuid::new_v4()],
            source: Address::tel("+821100000001"),
            destination: Address::tel("+821100000002"),
            status: "progressing".into(),
            action_next_hold: true,
            direction: "outgoing".into(),
            mute_direction: MuteDirection::Both,
            dialroute_id: Uuid::new_v4(),
            tm_create: Some("2023-06-07 03:22:17.995000".into()),
            ..Default::default()
        }
    }

    #[test]
    fn conversion_drops_internal_fields_only() {
        let c = sample();
        let mut src = serde_json::to_value(&c).unwrap();
        let dst = serde_json::to_value(c.convert_webhook_message()).unwrap();

        for internal in ["channel_id", "bridge_id", "action_next_hold", "dialroute_id"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
    }
}
