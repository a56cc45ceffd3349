use async_trait::async_trait;
use models::contact::Contact;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::to_data;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneNumberCreate {
    pub number: String,
    pub number_e164: String,
    #[serde(rename = "type")]
    pub phone_type: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailCreate {
    pub address: String,
    #[serde(rename = "type")]
    pub email_type: String,
    pub is_primary: bool,
}

/// Contact creation payload. Numbers, emails and tags are attached in the same call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactCreate {
    pub customer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub company: String,
    pub job_title: String,
    pub source: String,
    pub external_id: String,
    pub notes: String,
    pub phone_numbers: Vec<PhoneNumberCreate>,
    pub emails: Vec<EmailCreate>,
    pub tag_ids: Vec<Uuid>,
}

/// Partial contact update; `None` leaves the field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// contact-manager RPCs.
#[async_trait]
pub trait ContactRequest: Send + Sync {
    async fn contact_v1_contact_create(&self, req: &ContactCreate) -> Result<Contact, RequestError>;
    async fn contact_v1_contact_get(&self, contact_id: Uuid) -> Result<Contact, RequestError>;
    async fn contact_v1_contact_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Contact>, RequestError>;
    async fn contact_v1_contact_update(
        &self,
        contact_id: Uuid,
        req: &ContactUpdate,
    ) -> Result<Contact, RequestError>;
    async fn contact_v1_contact_delete(&self, contact_id: Uuid) -> Result<Contact, RequestError>;
    async fn contact_v1_contact_lookup(
        &self,
        customer_id: Uuid,
        phone_e164: &str,
        email: &str,
    ) -> Result<Contact, RequestError>;

    async fn contact_v1_phone_number_create(
        &self,
        contact_id: Uuid,
        req: &PhoneNumberCreate,
    ) -> Result<Contact, RequestError>;
    async fn contact_v1_phone_number_update(
        &self,
        contact_id: Uuid,
        phone_number_id: Uuid,
        fields: &Value,
    ) -> Result<Contact, RequestError>;
    async fn contact_v1_phone_number_delete(
        &self,
        contact_id: Uuid,
        phone_number_id: Uuid,
    ) -> Result<Contact, RequestError>;

    async fn contact_v1_email_create(
        &self,
        contact_id: Uuid,
        req: &EmailCreate,
    ) -> Result<Contact, RequestError>;
    async fn contact_v1_email_update(
        &self,
        contact_id: Uuid,
        email_id: Uuid,
        fields: &Value,
    ) -> Result<Contact, RequestError>;
    async fn contact_v1_email_delete(
        &self,
        contact_id: Uuid,
        email_id: Uuid,
    ) -> Result<Contact, RequestError>;

    async fn contact_v1_tag_add(
        &self,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<Contact, RequestError>;
    async fn contact_v1_tag_remove(
        &self,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<Contact, RequestError>;
}

const RESOURCE: &str = "contact/contacts";

/// `lookup` matches on the E.164 number first, then on the email.
fn lookup_uri(customer_id: Uuid, phone_e164: &str, email: &str) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("customer_id", &customer_id.to_string());
    if !phone_e164.is_empty() {
        query.append_pair("phone_e164", phone_e164);
    } else {
        query.append_pair("email", email);
    }
    format!("/v1/contacts/lookup?{}", query.finish())
}

#[async_trait]
impl<S: Sock> ContactRequest for RequestHandlerClient<S> {
    async fn contact_v1_contact_create(
        &self,
        req: &ContactCreate,
    ) -> Result<Contact, RequestError> {
        self.request(
            QueueName::Contact,
            "/v1/contacts",
            RequestMethod::Post,
            RESOURCE,
            to_data(req)?,
        ).await
    }

    async fn contact_v1_contact_get(&self, contact_id: Uuid) -> Result<Contact, RequestError> {
        self.request(
            QueueName::Contact,
            &format!("/v1/contacts/{contact_id}"),
            RequestMethod::Get,
            RESOURCE,
            None,
        ).await
    }

    async fn contact_v1_contact_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Contact>, RequestError> {
        self.request_list(QueueName::Contact, "/v1/contacts", token, size, filters, RESOURCE).await
    }

    async fn contact_v1_contact_update(
        &self,
        contact_id: Uuid,
        req: &ContactUpdate,
    ) -> Result<Contact, RequestError> {
        self.request(
            QueueName::Contact,
            &format!("/v1/contacts/{contact_id}"),
            RequestMethod::Put,
            RESOURCE,
            to_data(req)?,
        ).await
    }

    async fn contact_v1_contact_delete(&self, contact_id: Uuid) -> Result<Contact, RequestError> {
        self.request(
            QueueName::Contact,
            &format!("/v1/contacts/{contact_id}"),
            RequestMethod::Delete,
            RESOURCE,
            None,
        ).await
    }

    async fn contact_v1_contact_lookup(
        &self,
        customer_id: Uuid,
        phone_e164: &str,
        email: &str,
    ) -> Result<Contact, RequestError> {
        let uri = lookup_uri(customer_id, phone_e164, email);
        self.request(QueueName::Contact, &uri, RequestMethod::Get, RESOURCE, None).await
    }

    async fn contact_v1_phone_number_create(
        &self,
        contact_id: Uuid,
        req: &PhoneNumberCreate,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/phone-numbers");
        self.request(QueueName::Contact, &uri, RequestMethod::Post, RESOURCE, to_data(req)?).await
    }

    async fn contact_v1_phone_number_update(
        &self,
        contact_id: Uuid,
        phone_number_id: Uuid,
        fields: &Value,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/phone-numbers/{phone_number_id}");
        self.request(QueueName::Contact, &uri, RequestMethod::Put, RESOURCE, Some(fields.clone()))
            .await
    }

    async fn contact_v1_phone_number_delete(
        &self,
        contact_id: Uuid,
        phone_number_id: Uuid,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/phone-numbers/{phone_number_id}");
        self.request(QueueName::Contact, &uri, RequestMethod::Delete, RESOURCE, None).await
    }

    async fn contact_v1_email_create(
        &self,
        contact_id: Uuid,
        req: &EmailCreate,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/emails");
        self.request(QueueName::Contact, &uri, RequestMethod::Post, RESOURCE, to_data(req)?).await
    }

    async fn contact_v1_email_update(
        &self,
        contact_id: Uuid,
        email_id: Uuid,
        fields: &Value,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/emails/{email_id}");
        self.request(QueueName::Contact, &uri, RequestMethod::Put, RESOURCE, Some(fields.clone()))
            .await
    }

    async fn contact_v1_email_delete(
        &self,
        contact_id: Uuid,
        email_id: Uuid,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/emails/{email_id}");
        self.request(QueueName::Contact, &uri, RequestMethod::Delete, RESOURCE, None).await
    }

    async fn contact_v1_tag_add(
        &self,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<Contact, RequestError> {
        let data = json!({"tag_id": tag_id});
        self.request(
            QueueName::Contact,
            &format!("/v1/contacts/{contact_id}/tags"),
            RequestMethod::Post,
            RESOURCE,
            Some(data),
        ).await
    }

    async fn contact_v1_tag_remove(
        &self,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<Contact, RequestError> {
        let uri = format!("/v1/contacts/{contact_id}/tags/{tag_id}");
        self.request(QueueName::Contact, &uri, RequestMethod::Delete, RESOURCE, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[test]
    fn lookup_prefers_phone_number() {
        let customer_id = Uuid::parse_str("92883d56-7fe3-11ec-8931-37d08180a2b9").unwrap();
        assert_eq!(
            lookup_uri(customer_id, "+15551234567", "john@example.com"),
            "/v1/contacts/lookup?customer_id=92883d56-7fe3-11ec-8931-37d08180a2b9&phone_e164=%2B15551234567"
        );
        assert_eq!(
            lookup_uri(customer_id, "", "john@example.com"),
            "/v1/contacts/lookup?customer_id=92883d56-7fe3-11ec-8931-37d08180a2b9&email=john%40example.com"
        );
    }

    #[tokio::test]
    async fn update_sends_only_given_fields() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Put,
            &format!("/v1/contacts/{id}"),
            json!({"id": id, "first_name": "Updated"}),
        );

        let req = ContactUpdate {
            first_name: Some("Updated".into()),
            notes: Some(String::new()),
            ..Default::default()
        };
        let res = rh.contact_v1_contact_update(id, &req).await.unwrap();
        assert_eq!(res.first_name, "Updated");

        let sent = &rh.sock().requests()[0];
        assert_eq!(sent.queue, "bin-manager.contact-manager.request");
        assert_eq!(sent.request.data, Some(json!({"first_name": "Updated", "notes": ""})));
    }

    #[tokio::test]
    async fn create_carries_numbers_and_emails() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        rh.sock().on(RequestMethod::Post, "/v1/contacts", json!({"id": Uuid::new_v4()}));

        let req = ContactCreate {
            customer_id: Uuid::new_v4(),
            first_name: "John".into(),
            phone_numbers: vec![
                PhoneNumberCreate {
                    number_e164: "+15551234567".into(),
                    phone_type: "mobile".into(),
                    is_primary: true,
                    ..Default::default()
                }
            ],
            emails: vec![
                EmailCreate {
                    address: "john@example.com".into(),
                    email_type: "work".into(),
                    ..Default::default()
                }
            ],
            ..Default::default()
        };
        rh.contact_v1_contact_create(&req).await.unwrap();

        let data = rh.sock()
            .find(RequestMethod::Post, "/v1/contacts")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(data["phone_numbers"][0]["type"], "mobile");
        assert_eq!(data["emails"][0]["address"], "john@example.com");
    }
}
