use models::agent::Agent;
use models::flow::action::Action;
use models::flow::activeflow::{self, Activeflow};
use models::flow::flow::{self, Flow};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

/// Flow type for flows owned by the customer.
pub const FLOW_TYPE_FLOW: &str = "flow";

impl ServiceHandler {
    pub(crate) async fn flow_get_authorized(
        &self,
        a: &Agent,
        flow_id: Uuid,
    ) -> Result<Flow, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.flow_v1_flow_get(flow_id))
            .await
    }

    /// Non-persistent flow backing a one-shot outbound call or activeflow.
    pub(crate) async fn flow_create_temp(
        &self,
        a: &Agent,
        actions: &[Action],
    ) -> Result<Flow, ServiceError> {
        let f = self.req_handler
            .flow_v1_flow_create(
                a.customer_id,
                FLOW_TYPE_FLOW,
                "tmp",
                "tmp outbound flow",
                actions,
                false,
            )
            .await
            .log_err("could not create a temp flow")?;
        info!(flow_id = %f.id, "temp_flow_created");
        Ok(f)
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn flow_create(
        &self,
        a: &Agent,
        name: &str,
        detail: &str,
        actions: &[Action],
        persist: bool,
    ) -> Result<flow::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a flow")?;
        let f = self.req_handler
            .flow_v1_flow_create(a.customer_id, FLOW_TYPE_FLOW, name, detail, actions, persist)
            .await
            .log_err("could not create a flow")?;
        info!(flow_id = %f.id, "flow_created");
        Ok(f.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, flow_id = %flow_id))]
    pub async fn flow_get(
        &self,
        a: &Agent,
        flow_id: Uuid,
    ) -> Result<flow::WebhookMessage, ServiceError> {
        let f = self.flow_get_authorized(a, flow_id).await.log_err("could not get the flow")?;
        Ok(f.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn flow_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<flow::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list flows")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("type".into(), serde_json::json!(FLOW_TYPE_FLOW));
        let res = self.req_handler
            .flow_v1_flow_list(&token, size, &filters)
            .await
            .log_err("could not list flows")?;
        Ok(res.iter().map(Flow::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, flow_id = %flow_id))]
    pub async fn flow_delete(
        &self,
        a: &Agent,
        flow_id: Uuid,
    ) -> Result<flow::WebhookMessage, ServiceError> {
        self.flow_get_authorized(a, flow_id).await.log_err("could not get the flow")?;
        let f = self.req_handler
            .flow_v1_flow_delete(flow_id)
            .await
            .log_err("could not delete the flow")?;
        info!(flow_id = %f.id, "flow_deleted");
        Ok(f.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, flow_id = %flow_id))]
    pub async fn flow_update(
        &self,
        a: &Agent,
        flow_id: Uuid,
        name: &str,
        detail: &str,
        actions: &[Action],
    ) -> Result<flow::WebhookMessage, ServiceError> {
        self.flow_get_authorized(a, flow_id).await.log_err("could not get the flow")?;
        let f = self.req_handler
            .flow_v1_flow_update(flow_id, name, detail, actions)
            .await
            .log_err("could not update the flow")?;
        info!(flow_id = %f.id, "flow_updated");
        Ok(f.convert_webhook_message())
    }

    async fn activeflow_get_authorized(
        &self,
        a: &Agent,
        activeflow_id: Uuid,
    ) -> Result<Activeflow, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.flow_v1_activeflow_get(activeflow_id),
        ).await
    }

    /// Start a flow outside of any call.
    ///
    /// A nil `activeflow_id` gets a fresh id. A nil `flow_id` runs `actions`
    /// through a temporary flow; otherwise the flow must belong to the caller.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, flow_id = %flow_id))]
    pub async fn activeflow_create(
        &self,
        a: &Agent,
        activeflow_id: Uuid,
        flow_id: Uuid,
        actions: &[Action],
    ) -> Result<activeflow::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create an activeflow")?;

        let activeflow_id = if activeflow_id.is_nil() { Uuid::new_v4() } else { activeflow_id };
        let flow_id = if flow_id.is_nil() {
            self.flow_create_temp(a, actions).await?.id
        } else {
            self.flow_get_authorized(a, flow_id).await.log_err("could not get the flow")?.id
        };

        let af = self.req_handler
            .flow_v1_activeflow_create(activeflow_id, a.customer_id, flow_id, "", Uuid::nil())
            .await
            .log_err("could not create an activeflow")?;
        info!(activeflow_id = %af.id, "activeflow_created");
        Ok(af.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, activeflow_id = %activeflow_id))]
    pub async fn activeflow_get(
        &self,
        a: &Agent,
        activeflow_id: Uuid,
    ) -> Result<activeflow::WebhookMessage, ServiceError> {
        let af = self.activeflow_get_authorized(a, activeflow_id)
            .await
            .log_err("could not get the activeflow")?;
        Ok(af.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn activeflow_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<activeflow::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list activeflows")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .flow_v1_activeflow_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list activeflows")?;
        Ok(res.iter().map(Activeflow::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, activeflow_id = %activeflow_id))]
    pub async fn activeflow_delete(
        &self,
        a: &Agent,
        activeflow_id: Uuid,
    ) -> Result<activeflow::WebhookMessage, ServiceError> {
        self.activeflow_get_authorized(a, activeflow_id)
            .await
            .log_err("could not get the activeflow")?;
        let af = self.req_handler
            .flow_v1_activeflow_delete(activeflow_id)
            .await
            .log_err("could not delete the activeflow")?;
        info!(activeflow_id = %af.id, "activeflow_deleted");
        Ok(af.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, activeflow_id = %activeflow_id))]
    pub async fn activeflow_stop(
        &self,
        a: &Agent,
        activeflow_id: Uuid,
    ) -> Result<activeflow::WebhookMessage, ServiceError> {
        self.activeflow_get_authorized(a, activeflow_id)
            .await
            .log_err("could not get the activeflow")?;
        let af = self.req_handler
            .flow_v1_activeflow_stop(activeflow_id)
            .await
            .log_err("could not stop the activeflow")?;
        info!(activeflow_id = %af.id, "activeflow_stopped");
        Ok(af.convert_webhook_message())
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
    async fn activeflow_list_fills_empty_token() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        rh.sock().on(
            RequestMethod::Get,
            "/v1/activeflows",
            json!([{"id": Uuid::new_v4(), "customer_id": a.customer_id}]),
        );

        let res = h.activeflow_list(&a, 10, "").await.unwrap();
        assert_eq!(res.len(), 1);

        let sent = rh.sock().find(RequestMethod::Get, "/v1/activeflows").unwrap();
        let token = sent.request.uri
            .split("page_token=")
            .nth(1)
            .unwrap()
            .split('&')
            .next()
            .unwrap();
        assert!(token.starts_with("20"));
        assert!(sent.request.uri.contains("page_size=10"));
        let filters = sent.request.data.unwrap();
        assert_eq!(filters["customer_id"], json!(a.customer_id));
        assert_eq!(filters["deleted"], json!(false));
    }

    #[tokio::test]
    async fn activeflow_get_of_other_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/activeflows/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(h.activeflow_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.activeflow_stop(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn deleted_activeflow_is_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/activeflows/{id}"),
            json!({
                "id": id,
                "customer_id": a.customer_id,
                "tm_delete": "2024-01-01 00:00:00.000000"
            }),
        );

        assert!(matches!(h.activeflow_get(&a, id).await, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn activeflow_create_without_flow_uses_temp_flow() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let flow_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/flows",
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/activeflows",
            json!({"id": Uuid::new_v4(), "customer_id": a.customer_id, "flow_id": flow_id}),
        );

        let actions = vec![Action::new("answer", json!({}))];
        let res = h.activeflow_create(&a, Uuid::nil(), Uuid::nil(), &actions).await.unwrap();
        assert_eq!(res.flow_id, flow_id);

        let flow_req = rh.sock()
            .find(RequestMethod::Post, "/v1/flows")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(flow_req["name"], "tmp");
        assert_eq!(flow_req["persist"], json!(false));

        let af_req = rh.sock()
            .find(RequestMethod::Post, "/v1/activeflows")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(af_req["flow_id"], json!(flow_id));
        assert_ne!(af_req["id"], json!(Uuid::nil()));
    }

    #[tokio::test]
    async fn flow_update_by_agent_bit_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/flows/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        assert!(matches!(
            h.flow_update(&a, id, "n", "d", &[]).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());
    }
}
