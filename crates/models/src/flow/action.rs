use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One step of a flow. `option` is action-specific and passed through as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub id: Uuid,
    pub next_id: Uuid,
    #[serde(rename = "type")]
    pub action_type: String,
    pub option: serde_json::Value,
    pub tm_execute: Option<String>,
}

impl Action {
    pub fn new(action_type: &str, option: serde_json::Value) -> Self {
        Self { action_type: action_type.to_string(), option, ..Default::default() }
    }
}
