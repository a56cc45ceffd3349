use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transcribe {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub activeflow_id: Uuid,
    pub on_end_flow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub language: String,
    pub direction: String,
    pub host_id: Uuid,
    pub streaming_ids: Vec<Uuid>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Transcribe);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub activeflow_id: Uuid,
    pub on_end_flow_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub status: String,
    pub language: String,
    pub direction: String,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Transcribe {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            activeflow_id: self.activeflow_id,
            on_end_flow_id: self.on_end_flow_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            status: self.status.clone(),
            language: self.language.clone(),
            direction: self.direction.clone(),
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
    fn conversion_hides_streaming_hosts() {
        let t = Transcribe {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            activeflow_id: Uuid::new_v4(),
            on_end_flow_id: Uuid::new_v4(),
            reference_type: "call".into(),
            reference_id: Uuid::new_v4(),
            status: "progressing".into(),
            language: "en-US".into(),
            direction: "both".into(),
            host_id: Uuid::new_v4(),
            streaming_ids: vec![Uuid::new_v4()],
            ..Default::default()
        };
        let mut src = serde_json::to_value(&t).unwrap();
        let dst = serde_json::to_value(t.convert_webhook_message()).unwrap();

        for internal in ["host_id", "streaming_ids"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
    }
}
