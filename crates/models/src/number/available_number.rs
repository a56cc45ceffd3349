use serde::{Deserialize, Serialize};

/// A number offered for purchase by a carrier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableNumber {
    pub number: String,
    pub provider_name: String,
    pub country: String,
    pub region: String,
    pub postal_code: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub number: String,
    pub country: String,
    pub region: String,
    pub postal_code: String,
    pub features: Vec<String>,
}

impl AvailableNumber {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            number: self.number.clone(),
            country: self.country.clone(),
            region: self.region.clone(),
            postal_code: self.postal_code.clone(),
            features: self.features.clone(),
        }
    }
}
