use models::agent::Agent;
use models::flow::action::Action;
use models::queue::queue::{self, Queue, QueueInfo, RoutingMethod};
use models::queue::queuecall::{self, Queuecall};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    pub(crate) async fn queue_get_authorized(
        &self,
        a: &Agent,
        queue_id: Uuid,
    ) -> Result<Queue, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.queue_v1_queue_get(queue_id))
            .await
    }

    async fn queuecall_get_authorized(
        &self,
        a: &Agent,
        queuecall_id: Uuid,
    ) -> Result<Queuecall, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.queue_v1_queuecall_get(queuecall_id),
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queue_id = %queue_id))]
    pub async fn queue_get(
        &self,
        a: &Agent,
        queue_id: Uuid,
    ) -> Result<queue::WebhookMessage, ServiceError> {
        let res = self.queue_get_authorized(a, queue_id).await.log_err("could not get the queue")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn queue_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<queue::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list queues")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .queue_v1_queue_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list queues")?;
        Ok(res.iter().map(Queue::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn queue_create(
        &self,
        a: &Agent,
        info: &QueueInfo,
    ) -> Result<queue::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a queue")?;
        let res = self.req_handler
            .queue_v1_queue_create(a.customer_id, info)
            .await
            .log_err("could not create a queue")?;
        info!(queue_id = %res.id, "queue_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queue_id = %queue_id))]
    pub async fn queue_delete(
        &self,
        a: &Agent,
        queue_id: Uuid,
    ) -> Result<queue::WebhookMessage, ServiceError> {
        self.queue_get_authorized(a, queue_id).await.log_err("could not get the queue")?;
        let res = self.req_handler
            .queue_v1_queue_delete(queue_id)
            .await
            .log_err("could not delete the queue")?;
        info!(queue_id = %res.id, "queue_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queue_id = %queue_id))]
    pub async fn queue_update(
        &self,
        a: &Agent,
        queue_id: Uuid,
        info: &QueueInfo,
    ) -> Result<queue::WebhookMessage, ServiceError> {
        self.queue_get_authorized(a, queue_id).await.log_err("could not get the queue")?;
        let res = self.req_handler
            .queue_v1_queue_update(queue_id, info)
            .await
            .log_err("could not update the queue")?;
        info!(queue_id = %res.id, "queue_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queue_id = %queue_id))]
    pub async fn queue_update_tag_ids(
        &self,
        a: &Agent,
        queue_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<queue::WebhookMessage, ServiceError> {
        self.queue_get_authorized(a, queue_id).await.log_err("could not get the queue")?;
        let res = self.req_handler
            .queue_v1_queue_update_tag_ids(queue_id, tag_ids)
            .await
            .log_err("could not update the queue tags")?;
        info!(queue_id = %res.id, "queue_tag_ids_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queue_id = %queue_id))]
    pub async fn queue_update_routing_method(
        &self,
        a: &Agent,
        queue_id: Uuid,
        routing_method: RoutingMethod,
    ) -> Result<queue::WebhookMessage, ServiceError> {
        self.queue_get_authorized(a, queue_id).await.log_err("could not get the queue")?;
        let res = self.req_handler
            .queue_v1_queue_update_routing_method(queue_id, routing_method)
            .await
            .log_err("could not update the queue routing method")?;
        info!(queue_id = %res.id, "queue_routing_method_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queue_id = %queue_id))]
    pub async fn queue_update_actions(
        &self,
        a: &Agent,
        queue_id: Uuid,
        wait_actions: &[Action],
        wait_timeout: i32,
        service_timeout: i32,
    ) -> Result<queue::WebhookMessage, ServiceError> {
        self.queue_get_authorized(a, queue_id).await.log_err("could not get the queue")?;
        let res = self.req_handler
            .queue_v1_queue_update_actions(queue_id, wait_actions, wait_timeout, service_timeout)
            .await
            .log_err("could not update the queue actions")?;
        info!(queue_id = %res.id, "queue_actions_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queuecall_id = %queuecall_id))]
    pub async fn queuecall_get(
        &self,
        a: &Agent,
        queuecall_id: Uuid,
    ) -> Result<queuecall::WebhookMessage, ServiceError> {
        let res = self.queuecall_get_authorized(a, queuecall_id)
            .await
            .log_err("could not get the queuecall")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn queuecall_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<queuecall::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list queuecalls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .queue_v1_queuecall_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list queuecalls")?;
        Ok(res.iter().map(Queuecall::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, queuecall_id = %queuecall_id))]
    pub async fn queuecall_delete(
        &self,
        a: &Agent,
        queuecall_id: Uuid,
    ) -> Result<queuecall::WebhookMessage, ServiceError> {
        self.queuecall_get_authorized(a, queuecall_id)
            .await
            .log_err("could not get the queuecall")?;
        let res = self.req_handler
            .queue_v1_queuecall_delete(queuecall_id)
            .await
            .log_err("could not delete the queuecall")?;
        info!(queuecall_id = %res.id, "queuecall_deleted");
        Ok(res.convert_webhook_message())
    }

    /// Pull the queuecall out of its queue; the call itself keeps going.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, queuecall_id = %queuecall_id))]
    pub async fn queuecall_kick(
        &self,
        a: &Agent,
        queuecall_id: Uuid,
    ) -> Result<queuecall::WebhookMessage, ServiceError> {
        self.queuecall_get_authorized(a, queuecall_id)
            .await
            .log_err("could not get the queuecall")?;
        let res = self.req_handler
            .queue_v1_queuecall_kick(queuecall_id)
            .await
            .log_err("could not kick the queuecall")?;
        info!(queuecall_id = %res.id, "queuecall_kicked");
        Ok(res.convert_webhook_message())
    }

    /// Same as `queuecall_kick`, addressed by the queued call's id.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, reference_id = %reference_id))]
    pub async fn queuecall_kick_by_reference_id(
        &self,
        a: &Agent,
        reference_id: Uuid,
    ) -> Result<queuecall::WebhookMessage, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.queue_v1_queuecall_get_by_reference_id(reference_id),
        ).await.log_err("could not get the queuecall")?;
        let res = self.req_handler
            .queue_v1_queuecall_kick_by_reference_id(reference_id)
            .await
            .log_err("could not kick the queuecall")?;
        info!(queuecall_id = %res.id, "queuecall_kicked");
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
    async fn kick_by_reference_authorizes_the_queuecall() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let reference_id = Uuid::new_v4();
        let queuecall_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/queuecalls/reference_id/{reference_id}"),
            json!({"id": queuecall_id, "customer_id": a.customer_id, "reference_id": reference_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/queuecalls/reference_id/{reference_id}/kick"),
            json!({"id": queuecall_id, "customer_id": a.customer_id, "reference_id": reference_id}),
        );

        let res = h.queuecall_kick_by_reference_id(&a, reference_id).await.unwrap();
        assert_eq!(res.id, queuecall_id);
    }

    #[tokio::test]
    async fn kick_by_reference_of_other_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let reference_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/queuecalls/reference_id/{reference_id}"),
            json!({"id": Uuid::new_v4(), "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(
            h.queuecall_kick_by_reference_id(&a, reference_id).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn routing_method_update_reaches_queue_manager() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/queues/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Put,
            &format!("/v1/queues/{id}/routing_method"),
            json!({"id": id, "customer_id": a.customer_id, "routing_method": "random"}),
        );

        let res = h.queue_update_routing_method(&a, id, RoutingMethod::Random).await.unwrap();
        assert_eq!(res.routing_method, RoutingMethod::Random);
    }
}
