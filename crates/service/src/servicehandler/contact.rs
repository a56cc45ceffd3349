//! Contact book. Admins and managers use the `contact_*` operations;
//! `service_agent_contact_*` opens the same resource to every customer agent.

use models::agent::{Agent, Permission};
use models::contact::{self, Contact};
use requesthandler::contact::{ContactCreate, ContactUpdate, EmailCreate, PhoneNumberCreate};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    pub(crate) async fn contact_get_authorized(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
    ) -> Result<Contact, ServiceError> {
        Self::get_authorized(a, perm, self.req_handler.contact_v1_contact_get(contact_id)).await
    }

    pub(crate) async fn contact_create_as(
        &self,
        a: &Agent,
        perm: Permission,
        req: &ContactCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, perm)
            .log_err("no permission to create a contact")?;
        let req = ContactCreate { customer_id: a.customer_id, ..req.clone() };
        let res = self.req_handler
            .contact_v1_contact_create(&req)
            .await
            .log_err("could not create a contact")?;
        info!(contact_id = %res.id, "contact_created");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_list_as(
        &self,
        a: &Agent,
        perm: Permission,
        size: u64,
        token: &str,
    ) -> Result<Vec<contact::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, perm).log_err("no permission to list contacts")?;
        let (token, size) = page(size, token);
        let res = self
            .req_handler
            .contact_v1_contact_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list contacts")?;
        Ok(res.iter().map(Contact::convert_webhook_message).collect())
    }

    pub(crate) async fn contact_get_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        let res = self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_update_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        req: &ContactUpdate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_contact_update(contact_id, req)
            .await
            .log_err("could not update the contact")?;
        info!(contact_id = %res.id, "contact_updated");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_delete_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self.req_handler
            .contact_v1_contact_delete(contact_id)
            .await
            .log_err("could not delete the contact")?;
        info!(contact_id = %res.id, "contact_deleted");
        Ok(res.convert_webhook_message())
    }

    /// Find a contact by E.164 number or, when no number is given, by email.
    pub(crate) async fn contact_lookup_as(
        &self,
        a: &Agent,
        perm: Permission,
        phone_e164: &str,
        email: &str,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, perm)
            .log_err("no permission to look up contacts")?;
        if phone_e164.is_empty() && email.is_empty() {
            return Err(ServiceError::Validation("either phone_e164 or email is required".into()))
                .log_err("could not look up the contact");
        }
        let res = self
            .req_handler
            .contact_v1_contact_lookup(a.customer_id, phone_e164, email)
            .await
            .log_err("could not look up the contact")?;
        Self::check_permission(a, res.customer_id, perm).log_err(
            "looked up contact belongs to another customer",
        )?;
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_phone_number_create_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        req: &PhoneNumberCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_phone_number_create(contact_id, req)
            .await
            .log_err("could not add the phone number")?;
        info!(contact_id = %res.id, "contact_phone_number_added");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_phone_number_delete_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        phone_number_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_phone_number_delete(contact_id, phone_number_id)
            .await
            .log_err("could not remove the phone number")?;
        info!(contact_id = %res.id, %phone_number_id, "contact_phone_number_removed");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_email_create_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        req: &EmailCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_email_create(contact_id, req)
            .await
            .log_err("could not add the email")?;
        info!(contact_id = %res.id, "contact_email_added");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_email_delete_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        email_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_email_delete(contact_id, email_id)
            .await
            .log_err("could not remove the email")?;
        info!(contact_id = %res.id, %email_id, "contact_email_removed");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_tag_add_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self.req_handler
            .contact_v1_tag_add(contact_id, tag_id)
            .await
            .log_err("could not add the tag")?;
        info!(contact_id = %res.id, %tag_id, "contact_tag_added");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_tag_remove_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_tag_remove(contact_id, tag_id)
            .await
            .log_err("could not remove the tag")?;
        info!(contact_id = %res.id, %tag_id, "contact_tag_removed");
        Ok(res.convert_webhook_message())
    }

    /// Partial update of one phone number; `fields` carries only what changes.
    pub(crate) async fn contact_phone_number_update_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        phone_number_id: Uuid,
        fields: &Value,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_phone_number_update(contact_id, phone_number_id, fields)
            .await
            .log_err("could not update the phone number")?;
        info!(contact_id = %res.id, %phone_number_id, "contact_phone_number_updated");
        Ok(res.convert_webhook_message())
    }

    pub(crate) async fn contact_email_update_as(
        &self,
        a: &Agent,
        perm: Permission,
        contact_id: Uuid,
        email_id: Uuid,
        fields: &Value,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_authorized(a, perm, contact_id)
            .await
            .log_err("could not get the contact")?;
        let res = self
            .req_handler
            .contact_v1_email_update(contact_id, email_id, fields)
            .await
            .log_err("could not update the email")?;
        info!(contact_id = %res.id, %email_id, "contact_email_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn contact_create(
        &self,
        a: &Agent,
        req: &ContactCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_create_as(a, PERM_ADMIN_MANAGER, req).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_get(
        &self,
        a: &Agent,
        contact_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_get_as(a, PERM_ADMIN_MANAGER, contact_id).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn contact_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<contact::WebhookMessage>, ServiceError> {
        self.contact_list_as(a, PERM_ADMIN_MANAGER, size, token).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_update(
        &self,
        a: &Agent,
        contact_id: Uuid,
        req: &ContactUpdate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_update_as(a, PERM_ADMIN_MANAGER, contact_id, req).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_delete(
        &self,
        a: &Agent,
        contact_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_delete_as(a, PERM_ADMIN_MANAGER, contact_id).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn contact_lookup(
        &self,
        a: &Agent,
        phone_e164: &str,
        email: &str,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_lookup_as(a, PERM_ADMIN_MANAGER, phone_e164, email).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_phone_number_create(
        &self,
        a: &Agent,
        contact_id: Uuid,
        req: &PhoneNumberCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_phone_number_create_as(a, PERM_ADMIN_MANAGER, contact_id, req).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_phone_number_delete(
        &self,
        a: &Agent,
        contact_id: Uuid,
        phone_number_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_phone_number_delete_as(a, PERM_ADMIN_MANAGER, contact_id, phone_number_id)
            .await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_email_create(
        &self,
        a: &Agent,
        contact_id: Uuid,
        req: &EmailCreate,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_email_create_as(a, PERM_ADMIN_MANAGER, contact_id, req).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_email_delete(
        &self,
        a: &Agent,
        contact_id: Uuid,
        email_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_email_delete_as(a, PERM_ADMIN_MANAGER, contact_id, email_id).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_tag_add(
        &self,
        a: &Agent,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_tag_add_as(a, PERM_ADMIN_MANAGER, contact_id, tag_id).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, contact_id = %contact_id))]
    pub async fn contact_tag_remove(
        &self,
        a: &Agent,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<contact::WebhookMessage, ServiceError> {
        self.contact_tag_remove_as(a, PERM_ADMIN_MANAGER, contact_id, tag_id).await
    }
}

#[cfg(test)]
mod tests {
    use requesthandler::{RequestError, RequestMethod};
    use serde_json::json;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn create_pins_caller_customer() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        rh.sock().on(
            RequestMethod::Post,
            "/v1/contacts",
            json!({"id": Uuid::new_v4(), "customer_id": a.customer_id, "first_name": "John"}),
        );

        let req = ContactCreate {
            customer_id: Uuid::new_v4(),
            first_name: "John".into(),
            ..Default::default()
        };
        let res = h.contact_create(&a, &req).await.unwrap();
        assert_eq!(res.first_name, "John");

        let data = rh.sock()
            .find(RequestMethod::Post, "/v1/contacts")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(data["customer_id"], json!(a.customer_id));
    }

    #[tokio::test]
    async fn agent_cannot_manage_contacts() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/contacts/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        assert!(matches!(
            h.contact_create(&a, &ContactCreate::default()).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(matches!(h.contact_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.contact_delete(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(
            h.contact_tag_add(&a, id, Uuid::new_v4()).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn contact_of_another_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/contacts/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        let req = PhoneNumberCreate { number_e164: "+15551234567".into(), ..Default::default() };
        assert!(matches!(h.contact_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(
            h.contact_phone_number_create(&a, id, &req).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(matches!(
            h.contact_email_delete(&a, id, Uuid::new_v4()).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn deleted_contact_reads_as_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/contacts/{id}"),
            json!({
                "id": id,
                "customer_id": a.customer_id,
                "tm_delete": "2024-01-01 00:00:00.000000"
            }),
        );

        assert!(matches!(
            h.contact_update(&a, id, &ContactUpdate::default()).await,
            Err(ServiceError::NotFound)
        ));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn missing_contact_passes_downstream_not_found() {
        let (h, _rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);

        let err = h.contact_get(&a, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Request(RequestError::Status(404))));
    }

    #[tokio::test]
    async fn tag_removal_on_own_contact() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        let tag_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/contacts/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Delete,
            &format!("/v1/contacts/{id}/tags/{tag_id}"),
            json!({"id": id, "customer_id": a.customer_id, "tag_ids": []}),
        );

        let res = h.contact_tag_remove(&a, id, tag_id).await.unwrap();
        assert!(res.tag_ids.is_empty());
        assert_eq!(rh.sock().mutations().len(), 1);
    }

    #[tokio::test]
    async fn lookup_needs_number_or_email() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);

        assert!(matches!(h.contact_lookup(&a, "", "").await, Err(ServiceError::Validation(_))));
        assert!(rh.sock().requests().is_empty());
    }

    #[tokio::test]
    async fn lookup_by_email() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            "/v1/contacts/lookup",
            json!({"id": id, "customer_id": a.customer_id}),
        );

        let res = h.contact_lookup(&a, "", "john@example.com").await.unwrap();
        assert_eq!(res.id, id);
        assert!(rh.sock().requests()[0].request.uri.contains("email=john%40example.com"));
    }
}
