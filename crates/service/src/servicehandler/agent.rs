use models::address::Address;
use models::agent::{self, Agent, Permission, RingMethod, Status};
use models::resource::Resource;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER, PERM_PROJECT};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    /// Fetch an agent. With `allow_self` an agent may always reach its own record.
    async fn agent_get_authorized(
        &self,
        a: &Agent,
        agent_id: Uuid,
        allow_self: bool,
    ) -> Result<Agent, ServiceError> {
        let res = self.req_handler.agent_v1_agent_get(agent_id).await?;
        if res.is_deleted() {
            return Err(ServiceError::NotFound);
        }
        if allow_self && a.id == agent_id {
            return Ok(res);
        }
        Self::check_permission(a, res.customer_id, PERM_ADMIN_MANAGER)?;
        Ok(res)
    }

    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(customer_id = %a.customer_id, username = %username))]
    pub async fn agent_create(
        &self,
        a: &Agent,
        username: &str,
        password: &str,
        name: &str,
        detail: &str,
        ring_method: RingMethod,
        permission: Permission,
        tag_ids: &[Uuid],
        addresses: &[Address],
    ) -> Result<agent::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create an agent")?;
        if permission.intersects(Permission::PROJECT_ALL) {
            Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
                .log_err("no permission to grant project bits")?;
        }
        let res = self.req_handler
            .agent_v1_agent_create(
                a.customer_id,
                username,
                password,
                name,
                detail,
                ring_method,
                permission,
                tag_ids,
                addresses,
            )
            .await
            .log_err("could not create an agent")?;
        info!(agent_id = %res.id, "agent_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_get(
        &self,
        a: &Agent,
        agent_id: Uuid,
    ) -> Result<agent::WebhookMessage, ServiceError> {
        let res = self.agent_get_authorized(a, agent_id, true)
            .await
            .log_err("could not get the agent")?;
        Ok(res.convert_webhook_message())
    }

    /// List the customer's agents, optionally narrowed by tags and status.
    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn agent_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
        tag_ids: &[Uuid],
        status: Status,
    ) -> Result<Vec<agent::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list agents")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        if !tag_ids.is_empty() {
            filters.insert("tag_ids".into(), json!(tag_ids));
        }
        if status != Status::None {
            filters.insert("status".into(), json!(status));
        }
        let res = self.req_handler
            .agent_v1_agent_list(&token, size, &filters)
            .await
            .log_err("could not list agents")?;
        Ok(res.iter().map(Agent::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_delete(
        &self,
        a: &Agent,
        agent_id: Uuid,
    ) -> Result<agent::WebhookMessage, ServiceError> {
        self.agent_get_authorized(a, agent_id, false).await.log_err("could not get the agent")?;
        let res = self.req_handler
            .agent_v1_agent_delete(agent_id)
            .await
            .log_err("could not delete the agent")?;
        info!(agent_id = %res.id, "agent_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_update(
        &self,
        a: &Agent,
        agent_id: Uuid,
        name: &str,
        detail: &str,
        ring_method: RingMethod,
    ) -> Result<agent::WebhookMessage, ServiceError> {
        self.agent_get_authorized(a, agent_id, true).await.log_err("could not get the agent")?;
        let res = self.req_handler
            .agent_v1_agent_update(agent_id, name, detail, ring_method)
            .await
            .log_err("could not update the agent")?;
        info!(agent_id = %res.id, "agent_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_update_addresses(
        &self,
        a: &Agent,
        agent_id: Uuid,
        addresses: &[Address],
    ) -> Result<agent::WebhookMessage, ServiceError> {
        self.agent_get_authorized(a, agent_id, false).await.log_err("could not get the agent")?;
        let res = self.req_handler
            .agent_v1_agent_update_addresses(agent_id, addresses)
            .await
            .log_err("could not update the agent addresses")?;
        info!(agent_id = %res.id, "agent_addresses_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_update_password(
        &self,
        a: &Agent,
        agent_id: Uuid,
        password: &str,
    ) -> Result<agent::WebhookMessage, ServiceError> {
        self.agent_get_authorized(a, agent_id, false).await.log_err("could not get the agent")?;
        let res = self.req_handler
            .agent_v1_agent_update_password(agent_id, password)
            .await
            .log_err("could not update the agent password")?;
        info!(agent_id = %res.id, "agent_password_updated");
        Ok(res.convert_webhook_message())
    }

    /// Change an agent's permission. Granting project bits takes a project admin.
    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %agent_id, permission = permission.bits())
    )]
    pub async fn agent_update_permission(
        &self,
        a: &Agent,
        agent_id: Uuid,
        permission: Permission,
    ) -> Result<agent::WebhookMessage, ServiceError> {
        let target = self.req_handler
            .agent_v1_agent_get(agent_id)
            .await
            .log_err("could not get the agent")?;
        if target.is_deleted() {
            return Err(ServiceError::NotFound).log_err("could not get the agent");
        }
        let required = if permission.intersects(Permission::PROJECT_ALL) { (
            Uuid::nil(),
            PERM_PROJECT,
        ) } else { (
            target.customer_id,
            PERM_ADMIN_MANAGER,
        ) };
        Self::check_permission(a, required.0, required.1).log_err(
            "no permission to update the agent permission",
        )?;

        let res = self.req_handler
            .agent_v1_agent_update_permission(agent_id, permission)
            .await
            .log_err("could not update the agent permission")?;
        info!(agent_id = %res.id, "agent_permission_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_update_status(
        &self,
        a: &Agent,
        agent_id: Uuid,
        status: Status,
    ) -> Result<agent::WebhookMessage, ServiceError> {
        self.agent_get_authorized(a, agent_id, true).await.log_err("could not get the agent")?;
        let res = self.req_handler
            .agent_v1_agent_update_status(agent_id, status)
            .await
            .log_err("could not update the agent status")?;
        info!(agent_id = %res.id, "agent_status_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %agent_id))]
    pub async fn agent_update_tag_ids(
        &self,
        a: &Agent,
        agent_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<agent::WebhookMessage, ServiceError> {
        self.agent_get_authorized(a, agent_id, false).await.log_err("could not get the agent")?;
        let res = self.req_handler
            .agent_v1_agent_update_tag_ids(agent_id, tag_ids)
            .await
            .log_err("could not update the agent tags")?;
        info!(agent_id = %res.id, "agent_tag_ids_updated");
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use requesthandler::RequestMethod;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn agent_reads_and_updates_itself() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let path = format!("/v1/agents/{}", a.id);
        rh.sock().on(RequestMethod::Get, &path, json!({"id": a.id, "customer_id": a.customer_id}));
        rh.sock().on(
            RequestMethod::Put,
            &format!("{path}/status"),
            json!({"id": a.id, "customer_id": a.customer_id, "status": "available"}),
        );

        assert_eq!(h.agent_get(&a, a.id).await.unwrap().id, a.id);
        let res = h.agent_update_status(&a, a.id, Status::Available).await.unwrap();
        assert_eq!(res.status, Status::Available);
    }

    #[tokio::test]
    async fn plain_agent_cannot_touch_a_colleague() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let other = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/agents/{other}"),
            json!({"id": other, "customer_id": a.customer_id}),
        );

        assert!(matches!(h.agent_get(&a, other).await, Err(ServiceError::NoPermission)));
        assert!(matches!(
            h.agent_update_password(&a, other, "pw").await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn project_bits_need_project_admin() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let target = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/agents/{target}"),
            json!({"id": target, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Put,
            &format!("/v1/agents/{target}/permission"),
            json!({"id": target, "customer_id": a.customer_id, "permission": 0x40}),
        );

        assert!(matches!(
            h.agent_update_permission(&a, target, Permission::PROJECT_SUPER_ADMIN).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());

        let res = h.agent_update_permission(&a, target, Permission::CUSTOMER_MANAGER)
            .await
            .unwrap();
        assert_eq!(res.permission, Permission::CUSTOMER_MANAGER);
    }

    #[tokio::test]
    async fn agent_list_adds_status_filter() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        rh.sock().on(RequestMethod::Get, "/v1/agents", json!([]));

        let res = h.agent_list(&a, 0, "", &[], Status::Available).await.unwrap();
        assert!(res.is_empty());

        let sent = rh.sock().find(RequestMethod::Get, "/v1/agents").unwrap();
        assert!(sent.request.uri.contains("page_size=100"));
        let filters = sent.request.data.unwrap();
        assert_eq!(filters["status"], "available");
        assert!(filters.get("tag_ids").is_none());
    }
}
