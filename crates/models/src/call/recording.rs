use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recording {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub activeflow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub format: String,
    pub recording_name: String,
    pub filenames: Vec<String>,
    pub asterisk_id: String,
    pub channel_ids: Vec<String>,
    pub on_end_flow_id: Uuid,
    pub tm_start: Option<String>,
    pub tm_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Recording);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub activeflow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub format: String,
    pub on_end_flow_id: Uuid,
    pub tm_start: Option<String>,
    pub tm_end: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Recording {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_type: self.owner_type.clone(),
            owner_id: self.owner_id,
            activeflow_id: self.activeflow_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            status: self.status.clone(),
            format: self.format.clone(),
            on_end_flow_id: self.on_end_flow_id,
            tm_start: self.tm_start.clone(),
            tm_end: self.tm_end.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}

/// Parameters of a call recording start.
///
/// The recording stops on whichever comes first: `end_of_silence` seconds of
/// silence, the `end_of_key` DTMF key, or `duration` seconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingStartOptions {
    pub format: String,
    pub end_of_silence: i32,
    pub end_of_key: String,
    pub duration: i32,
    pub on_end_flow_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_drops_media_server_details() {
        let r = Recording {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            reference_type: "call".into(),
            reference_id: Uuid::new_v4(),
            status: "ended".into(),
            format: "wav".into(),
            recording_name: "call_1_2024".into(),
            filenames: vec!["call_1_2024_in.wav".into()],
            asterisk_id: "42:01:0a:a4:00:05".into(),
            channel_ids: vec!["1687349592.1234".into()],
            ..Default::default()
        };
        let res = r.convert_webhook_message();
        assert_eq!(res.id, r.id);
        assert_eq!(res.reference_id, r.reference_id);
        assert_eq!(res.format, "wav");

        let v = serde_json::to_value(&res).unwrap();
        for internal in ["recording_name", "filenames", "asterisk_id", "channel_ids"] {
            assert!(v.get(internal).is_none(), "{internal} leaked");
        }
    }
}
