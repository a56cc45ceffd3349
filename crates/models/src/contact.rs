//! contact-manager resource: a customer's address book entry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneNumber {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub contact_id: Uuid,
    pub number: String,
    pub number_e164: String,
    #[serde(rename = "type")]
    pub phone_type: String,
    pub is_primary: bool,
    pub tm_create: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub contact_id: Uuid,
    pub address: String,
    #[serde(rename = "type")]
    pub email_type: String,
    pub is_primary: bool,
    pub tm_create: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub company: String,
    pub job_title: String,
    pub source: String,
    pub external_id: String,
    pub notes: String,
    pub phone_numbers: Vec<PhoneNumber>,
    pub emails: Vec<Email>,
    pub tag_ids: Vec<Uuid>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

crate::impl_resource!(Contact);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub company: String,
    pub job_title: String,
    pub source: String,
    pub external_id: String,
    pub notes: String,
    pub phone_numbers: Vec<PhoneNumber>,
    pub emails: Vec<Email>,
    pub tag_ids: Vec<Uuid>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Contact {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            display_name: self.display_name.clone(),
            company: self.company.clone(),
            job_title: self.job_title.clone(),
            source: self.source.clone(),
            external_id: self.external_id.clone(),
            notes: self.notes.clone(),
            phone_numbers: self.phone_numbers.clone(),
            emails: self.emails.clone(),
            tag_ids: self.tag_ids.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}
