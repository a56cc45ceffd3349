use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signed download link for a stored object, e.g. a call recording.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketFile {
    pub reference_type: String,
    pub reference_id: Uuid,
    pub bucket_uri: String,
    pub download_uri: String,
    pub tm_download_expire: Option<String>,
}
