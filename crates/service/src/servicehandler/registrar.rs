//! SIP registrar: domains, extensions and trunks.

use models::agent::Agent;
use models::registrar::domain::{self, Domain};
use models::registrar::extension::{self, Extension};
use models::registrar::trunk::{self, Trunk, TrunkInfo};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn domain_get_authorized(
        &self,
        a: &Agent,
        domain_id: Uuid,
    ) -> Result<Domain, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.registrar_v1_domain_get(domain_id),
        ).await
    }

    async fn extension_get_authorized(
        &self,
        a: &Agent,
        extension_id: Uuid,
    ) -> Result<Extension, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.registrar_v1_extension_get(extension_id),
        ).await
    }

    async fn trunk_get_authorized(&self, a: &Agent, trunk_id: Uuid) -> Result<Trunk, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.registrar_v1_trunk_get(trunk_id),
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, domain_name = %domain_name))]
    pub async fn domain_create(
        &self,
        a: &Agent,
        domain_name: &str,
        name: &str,
        detail: &str,
    ) -> Result<domain::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a domain")?;
        let res = self.req_handler
            .registrar_v1_domain_create(a.customer_id, domain_name, name, detail)
            .await
            .log_err("could not create a domain")?;
        info!(domain_id = %res.id, "domain_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, domain_id = %domain_id))]
    pub async fn domain_get(
        &self,
        a: &Agent,
        domain_id: Uuid,
    ) -> Result<domain::WebhookMessage, ServiceError> {
        let res = self.domain_get_authorized(a, domain_id)
            .await
            .log_err("could not get the domain")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn domain_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<domain::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list domains")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .registrar_v1_domain_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list domains")?;
        Ok(res.iter().map(Domain::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, domain_id = %domain_id))]
    pub async fn domain_delete(
        &self,
        a: &Agent,
        domain_id: Uuid,
    ) -> Result<domain::WebhookMessage, ServiceError> {
        self.domain_get_authorized(a, domain_id).await.log_err("could not get the domain")?;
        let res = self.req_handler
            .registrar_v1_domain_delete(domain_id)
            .await
            .log_err("could not delete the domain")?;
        info!(domain_id = %res.id, "domain_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, domain_id = %domain_id))]
    pub async fn domain_update(
        &self,
        a: &Agent,
        domain_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<domain::WebhookMessage, ServiceError> {
        self.domain_get_authorized(a, domain_id).await.log_err("could not get the domain")?;
        let res = self.req_handler
            .registrar_v1_domain_update(domain_id, name, detail)
            .await
            .log_err("could not update the domain")?;
        info!(domain_id = %res.id, "domain_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, extension = %ext))]
    pub async fn extension_create(
        &self,
        a: &Agent,
        ext: &str,
        password: &str,
        name: &str,
        detail: &str,
    ) -> Result<extension::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create an extension")?;
        let res = self.req_handler
            .registrar_v1_extension_create(a.customer_id, ext, password, name, detail)
            .await
            .log_err("could not create an extension")?;
        info!(extension_id = %res.id, "extension_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, extension_id = %extension_id))]
    pub async fn extension_get(
        &self,
        a: &Agent,
        extension_id: Uuid,
    ) -> Result<extension::WebhookMessage, ServiceError> {
        let res = self.extension_get_authorized(a, extension_id)
            .await
            .log_err("could not get the extension")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn extension_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<extension::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list extensions")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .registrar_v1_extension_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list extensions")?;
        Ok(res.iter().map(Extension::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, extension_id = %extension_id))]
    pub async fn extension_delete(
        &self,
        a: &Agent,
        extension_id: Uuid,
    ) -> Result<extension::WebhookMessage, ServiceError> {
        self.extension_get_authorized(a, extension_id)
            .await
            .log_err("could not get the extension")?;
        let res = self.req_handler
            .registrar_v1_extension_delete(extension_id)
            .await
            .log_err("could not delete the extension")?;
        info!(extension_id = %res.id, "extension_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, extension_id = %extension_id))]
    pub async fn extension_update(
        &self,
        a: &Agent,
        extension_id: Uuid,
        name: &str,
        detail: &str,
        password: &str,
    ) -> Result<extension::WebhookMessage, ServiceError> {
        self.extension_get_authorized(a, extension_id)
            .await
            .log_err("could not get the extension")?;
        let res = self.req_handler
            .registrar_v1_extension_update(extension_id, name, detail, password)
            .await
            .log_err("could not update the extension")?;
        info!(extension_id = %res.id, "extension_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, domain_name = %domain_name))]
    pub async fn trunk_create(
        &self,
        a: &Agent,
        domain_name: &str,
        info: &TrunkInfo,
    ) -> Result<trunk::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a trunk")?;
        let res = self.req_handler
            .registrar_v1_trunk_create(a.customer_id, domain_name, info)
            .await
            .log_err("could not create a trunk")?;
        info!(trunk_id = %res.id, "trunk_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, trunk_id = %trunk_id))]
    pub async fn trunk_get(
        &self,
        a: &Agent,
        trunk_id: Uuid,
    ) -> Result<trunk::WebhookMessage, ServiceError> {
        let res = self.trunk_get_authorized(a, trunk_id).await.log_err("could not get the trunk")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn trunk_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<trunk::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list trunks")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .registrar_v1_trunk_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list trunks")?;
        Ok(res.iter().map(Trunk::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, trunk_id = %trunk_id))]
    pub async fn trunk_delete(
        &self,
        a: &Agent,
        trunk_id: Uuid,
    ) -> Result<trunk::WebhookMessage, ServiceError> {
        self.trunk_get_authorized(a, trunk_id).await.log_err("could not get the trunk")?;
        let res = self.req_handler
            .registrar_v1_trunk_delete(trunk_id)
            .await
            .log_err("could not delete the trunk")?;
        info!(trunk_id = %res.id, "trunk_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, trunk_id = %trunk_id))]
    pub async fn trunk_update_basic_info(
        &self,
        a: &Agent,
        trunk_id: Uuid,
        info: &TrunkInfo,
    ) -> Result<trunk::WebhookMessage, ServiceError> {
        self.trunk_get_authorized(a, trunk_id).await.log_err("could not get the trunk")?;
        let res = self.req_handler
            .registrar_v1_trunk_update_basic_info(trunk_id, info)
            .await
            .log_err("could not update the trunk")?;
        info!(trunk_id = %res.id, "trunk_updated");
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::RequestMethod;
    use serde_json::json;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn extension_created_under_caller_customer() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        rh.sock().on(
            RequestMethod::Post,
            "/v1/extensions",
            json!({"id": Uuid::new_v4(), "customer_id": a.customer_id, "extension": "2000"}),
        );

        let res = h.extension_create(&a, "2000", "pass", "test", "").await.unwrap();
        assert_eq!(res.extension, "2000");
        let sent = rh.sock().find(RequestMethod::Post, "/v1/extensions").unwrap();
        assert_eq!(sent.request.data.unwrap()["customer_id"], json!(a.customer_id));
    }

    #[tokio::test]
    async fn deleted_trunk_is_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/trunks/{id}"),
            json!({
                "id": id,
                "customer_id": a.customer_id,
                "tm_delete": "2024-01-01 00:00:00.000000"
            }),
        );

        assert!(matches!(h.trunk_delete(&a, id).await, Err(ServiceError::NotFound)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn agent_cannot_list_domains() {
        let (h, _rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        assert!(matches!(h.domain_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
    }
}
