use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_id: Uuid,
    pub account_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub name: String,
    pub detail: String,
    pub filename: String,
    pub filesize: i64,
    pub uri_bucket: String,
    pub uri_download: String,
    pub tm_download_expire: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(File);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub owner_id: Uuid,
    pub reference_type: String,
    pub reference_id: Uuid,
    pub name: String,
    pub detail: String,
    pub filename: String,
    pub filesize: i64,
    pub uri_download: String,
    pub tm_download_expire: Option<String>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl File {
    /// Public view; the bucket path and storage account stay internal.
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            owner_id: self.owner_id,
            reference_type: self.reference_type.clone(),
            reference_id: self.reference_id,
            name: self.name.clone(),
            detail: self.detail.clone(),
            filename: self.filename.clone(),
            filesize: self.filesize,
            uri_download: self.uri_download.clone(),
            tm_download_expire: self.tm_download_expire.clone(),
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
    fn conversion_hides_bucket_location() {
        let f = File {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            reference_type: "recording".into(),
            reference_id: Uuid::new_v4(),
            filename: "call.wav".into(),
            filesize: 4096,
            uri_bucket: "gs://bucket/call.wav".into(),
            uri_download: "https://download.example/call.wav".into(),
            tm_download_expire: Some("2024-01-02 00:00:00.000000".into()),
            ..Default::default()
        };
        let mut src = serde_json::to_value(&f).unwrap();
        let dst = serde_json::to_value(f.convert_webhook_message()).unwrap();

        for internal in ["account_id", "uri_bucket"] {
            assert!(dst.get(internal).is_none(), "{internal} leaked");
            src.as_object_mut().unwrap().remove(internal);
        }
        assert_eq!(src, dst);
    }
}
