use models::agent::Agent;
use models::contact;
use requesthandler::contact::{ContactCreate, ContactUpdate, EmailCreate, PhoneNumberCreate};
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use super::{ServiceHandler, PERM_CUSTOMER_ALL};
use crate::errors::ServiceError;

impl ServiceHandler {
    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_contact_create(
        &self,
        a: &Agent,
        req: &ContactCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_create_as(a, PERM_CUSTOMER_ALL, req).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_get(
        &self,
        a: &Agent,
        contact_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_as(a, PERM_CUSTOMER_ALL, contact_id).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_contact_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<contact::WebhookMessage>, ServiceError> {
        self.contact_list_as(a, PERM_CUSTOMER_ALL, size, token).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_update(
        &self,
        a: &Agent,
        contact_id: Uuid,
        req: &ContactUpdate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_update_as(a, PERM_CUSTOMER_ALL, contact_id, req).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_delete(
        &self,
        a: &Agent,
        contact_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_delete_as(a, PERM_CUSTOMER_ALL, contact_id).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_contact_lookup(
        &self,
        a: &Agent,
        phone_e164: &str,
        email: &str,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_lookup_as(a, PERM_CUSTOMER_ALL, phone_e164, email).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_phone_number_create(
        &self,
        a: &Agent,
        contact_id: Uuid,
        req: &PhoneNumberCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_phone_number_create_as(a, PERM_CUSTOMER_ALL, contact_id, req).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_phone_number_update(
        &self,
        a: &Agent,
        contact_id: Uuid,
        phone_number_id: Uuid,
        fields: &Value,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_phone_number_update_as(
            a,
            PERM_CUSTOMER_ALL,
            contact_id,
            phone_number_id,
            fields,
        ).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_phone_number_delete(
        &self,
        a: &Agent,
        contact_id: Uuid,
        phone_number_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_phone_number_delete_as(a, PERM_CUSTOMER_ALL, contact_id, phone_number_id).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_email_create(
        &self,
        a: &Agent,
        contact_id: Uuid,
        req: &EmailCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_email_create_as(a, PERM_CUSTOMER_ALL, contact_id, req).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_email_update(
        &self,
        a: &Agent,
        contact_id: Uuid,
        email_id: Uuid,
        fields: &Value,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_email_update_as(a, PERM_CUSTOMER_ALL, contact_id, email_id, fields).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_email_delete(
        &self,
        a: &Agent,
        contact_id: Uuid,
        email_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_email_delete_as(a, PERM_CUSTOMER_ALL, contact_id, email_id).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_tag_add(
        &self,
        a: &Agent,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_tag_add_as(a, PERM_CUSTOMER_ALL, contact_id, tag_id).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, contact_id = %contact_id)
    )]
    pub async fn service_agent_contact_tag_remove(
        &self,
        a: &Agent,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_tag_remove_as(a, PERM_CUSTOMER_ALL, contact_id, tag_id).await
    }
}
