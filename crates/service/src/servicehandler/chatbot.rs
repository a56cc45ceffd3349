use models::agent::Agent;
use models::chatbot::chatbot::{self, Chatbot};
use models::chatbot::chatbotcall::{self, Chatbotcall};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn chatbot_get_authorized(
        &self,
        a: &Agent,
        chatbot_id: Uuid,
    ) -> Result<Chatbot, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chatbot_v1_chatbot_get(chatbot_id),
        ).await
    }

    async fn chatbotcall_get_authorized(
        &self,
        a: &Agent,
        chatbotcall_id: Uuid,
    ) -> Result<Chatbotcall, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chatbot_v1_chatbotcall_get(chatbotcall_id),
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn chatbot_create(
        &self,
        a: &Agent,
        name: &str,
        detail: &str,
        engine_type: &str,
        init_prompt: &str,
    ) -> Result<chatbot::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a chatbot")?;
        let res = self.req_handler
            .chatbot_v1_chatbot_create(a.customer_id, name, detail, engine_type, init_prompt)
            .await
            .log_err("could not create a chatbot")?;
        info!(chatbot_id = %res.id, "chatbot_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn chatbot_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<chatbot::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list chatbots")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .chatbot_v1_chatbot_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list chatbots")?;
        Ok(res.iter().map(Chatbot::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatbot_id = %chatbot_id))]
    pub async fn chatbot_get(
        &self,
        a: &Agent,
        chatbot_id: Uuid,
    ) -> Result<chatbot::WebhookMessage, ServiceError> {
        let res = self.chatbot_get_authorized(a, chatbot_id)
            .await
            .log_err("could not get the chatbot")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatbot_id = %chatbot_id))]
    pub async fn chatbot_delete(
        &self,
        a: &Agent,
        chatbot_id: Uuid,
    ) -> Result<chatbot::WebhookMessage, ServiceError> {
        self.chatbot_get_authorized(a, chatbot_id).await.log_err("could not get the chatbot")?;
        let res = self.req_handler
            .chatbot_v1_chatbot_delete(chatbot_id)
            .await
            .log_err("could not delete the chatbot")?;
        info!(chatbot_id = %res.id, "chatbot_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatbot_id = %chatbot_id))]
    pub async fn chatbot_update(
        &self,
        a: &Agent,
        chatbot_id: Uuid,
        name: &str,
        detail: &str,
        engine_type: &str,
        init_prompt: &str,
    ) -> Result<chatbot::WebhookMessage, ServiceError> {
        self.chatbot_get_authorized(a, chatbot_id).await.log_err("could not get the chatbot")?;
        let res = self.req_handler
            .chatbot_v1_chatbot_update(chatbot_id, name, detail, engine_type, init_prompt)
            .await
            .log_err("could not update the chatbot")?;
        info!(chatbot_id = %res.id, "chatbot_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn chatbotcall_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<chatbotcall::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list chatbotcalls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .chatbot_v1_chatbotcall_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list chatbotcalls")?;
        Ok(res.iter().map(Chatbotcall::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatbotcall_id = %chatbotcall_id))]
    pub async fn chatbotcall_get(
        &self,
        a: &Agent,
        chatbotcall_id: Uuid,
    ) -> Result<chatbotcall::WebhookMessage, ServiceError> {
        let res = self.chatbotcall_get_authorized(a, chatbotcall_id)
            .await
            .log_err("could not get the chatbotcall")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatbotcall_id = %chatbotcall_id))]
    pub async fn chatbotcall_delete(
        &self,
        a: &Agent,
        chatbotcall_id: Uuid,
    ) -> Result<chatbotcall::WebhookMessage, ServiceError> {
        self.chatbotcall_get_authorized(a, chatbotcall_id)
            .await
            .log_err("could not get the chatbotcall")?;
        let res = self.req_handler
            .chatbot_v1_chatbotcall_delete(chatbotcall_id)
            .await
            .log_err("could not delete the chatbotcall")?;
        info!(chatbotcall_id = %res.id, "chatbotcall_deleted");
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::{RequestError, RequestMethod};
    use serde_json::json;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn chatbot_create_is_scoped_to_caller() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/chatbots",
            json!({"id": id, "customer_id": a.customer_id, "name": "helper"}),
        );

        let res = h.chatbot_create(&a, "helper", "", "chatGPT", "be brief").await.unwrap();
        assert_eq!(res.id, id);
        let data = rh.sock()
            .find(RequestMethod::Post, "/v1/chatbots")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(data["customer_id"], json!(a.customer_id));
    }

    #[tokio::test]
    async fn agent_cannot_manage_chatbots() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatbots/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        assert!(matches!(
            h.chatbot_create(&a, "n", "", "chatGPT", "").await,
            Err(ServiceError::NoPermission)
        ));
        assert!(matches!(h.chatbot_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.chatbot_delete(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.chatbot_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn chatbot_update_of_other_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatbots/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        let err = h.chatbot_update(&a, id, "n", "d", "chatGPT", "").await.unwrap_err();
        assert!(matches!(err, ServiceError::NoPermission));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn deleted_chatbot_reads_as_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatbots/{id}"),
            json!({
                "id": id,
                "customer_id": a.customer_id,
                "tm_delete": "2024-01-01 00:00:00.000000"
            }),
        );

        assert!(matches!(h.chatbot_get(&a, id).await, Err(ServiceError::NotFound)));
        assert!(matches!(h.chatbot_delete(&a, id).await, Err(ServiceError::NotFound)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn missing_chatbot_passes_downstream_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);

        let err = h.chatbot_get(&a, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Request(RequestError::Status(404))));
        assert_eq!(err.code(), 1003);
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn chatbotcall_delete_of_other_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatbotcalls/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(h.chatbotcall_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.chatbotcall_delete(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn deleted_chatbotcall_reads_as_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatbotcalls/{id}"),
            json!({
                "id": id,
                "customer_id": a.customer_id,
                "tm_delete": "2024-01-01 00:00:00.000000"
            }),
        );

        assert!(matches!(h.chatbotcall_get(&a, id).await, Err(ServiceError::NotFound)));
        assert!(matches!(h.chatbotcall_delete(&a, id).await, Err(ServiceError::NotFound)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn chatbotcall_delete_of_own_call() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        let reply = json!({"id": id, "customer_id": a.customer_id});
        rh.sock().on(RequestMethod::Get, &format!("/v1/chatbotcalls/{id}"), reply.clone());
        rh.sock().on(RequestMethod::Delete, &format!("/v1/chatbotcalls/{id}"), reply);

        assert_eq!(h.chatbotcall_delete(&a, id).await.unwrap().id, id);
        assert_eq!(rh.sock().mutations().len(), 1);
    }
}
