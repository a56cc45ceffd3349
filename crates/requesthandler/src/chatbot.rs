use async_trait::async_trait;
use models::chatbot::chatbot::Chatbot;
use models::chatbot::chatbotcall::Chatbotcall;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// chatbot-manager RPCs.
#[async_trait]
pub trait ChatbotRequest: Send + Sync {
    async fn chatbot_v1_chatbot_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        engine_type: &str,
        init_prompt: &str,
    ) -> Result<Chatbot, RequestError>;
    async fn chatbot_v1_chatbot_get(&self, chatbot_id: Uuid) -> Result<Chatbot, RequestError>;
    async fn chatbot_v1_chatbot_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chatbot>, RequestError>;
    async fn chatbot_v1_chatbot_delete(&self, chatbot_id: Uuid) -> Result<Chatbot, RequestError>;
    async fn chatbot_v1_chatbot_update(
        &self,
        chatbot_id: Uuid,
        name: &str,
        detail: &str,
        engine_type: &str,
        init_prompt: &str,
    ) -> Result<Chatbot, RequestError>;

    async fn chatbot_v1_chatbotcall_get(
        &self,
        chatbotcall_id: Uuid,
    ) -> Result<Chatbotcall, RequestError>;
    async fn chatbot_v1_chatbotcall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chatbotcall>, RequestError>;
    async fn chatbot_v1_chatbotcall_delete(
        &self,
        chatbotcall_id: Uuid,
    ) -> Result<Chatbotcall, RequestError>;
}

const RESOURCE_CHATBOT: &str = "chatbot/chatbots";
const RESOURCE_CHATBOTCALL: &str = "chatbot/chatbotcalls";

#[async_trait]
impl<S: Sock> ChatbotRequest for RequestHandlerClient<S> {
    async fn chatbot_v1_chatbot_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        engine_type: &str,
        init_prompt: &str,
    ) -> Result<Chatbot, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "name": name,
            "detail": detail,
            "engine_type": engine_type,
            "init_prompt": init_prompt
        });
        self.request(
            QueueName::Chatbot,
            "/v1/chatbots",
            RequestMethod::Post,
            RESOURCE_CHATBOT,
            Some(data),
        ).await
    }

    async fn chatbot_v1_chatbot_get(&self, chatbot_id: Uuid) -> Result<Chatbot, RequestError> {
        self.request(
            QueueName::Chatbot,
            &format!("/v1/chatbots/{chatbot_id}"),
            RequestMethod::Get,
            RESOURCE_CHATBOT,
            None,
        ).await
    }

    async fn chatbot_v1_chatbot_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chatbot>, RequestError> {
        self.request_list(
            QueueName::Chatbot,
            "/v1/chatbots",
            token,
            size,
            filters,
            RESOURCE_CHATBOT,
        ).await
    }

    async fn chatbot_v1_chatbot_delete(&self, chatbot_id: Uuid) -> Result<Chatbot, RequestError> {
        self.request(
            QueueName::Chatbot,
            &format!("/v1/chatbots/{chatbot_id}"),
            RequestMethod::Delete,
            RESOURCE_CHATBOT,
            None,
        ).await
    }

    async fn chatbot_v1_chatbot_update(
        &self,
        chatbot_id: Uuid,
        name: &str,
        detail: &str,
        engine_type: &str,
        init_prompt: &str,
    ) -> Result<Chatbot, RequestError> {
        let data = json!({
            "name": name,
            "detail": detail,
            "engine_type": engine_type,
            "init_prompt": init_prompt
        });
        self.request(
            QueueName::Chatbot,
            &format!("/v1/chatbots/{chatbot_id}"),
            RequestMethod::Put,
            RESOURCE_CHATBOT,
            Some(data),
        ).await
    }

    async fn chatbot_v1_chatbotcall_get(
        &self,
        chatbotcall_id: Uuid,
    ) -> Result<Chatbotcall, RequestError> {
        self.request(
            QueueName::Chatbot,
            &format!("/v1/chatbotcalls/{chatbotcall_id}"),
            RequestMethod::Get,
            RESOURCE_CHATBOTCALL,
            None,
        ).await
    }

    async fn chatbot_v1_chatbotcall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chatbotcall>, RequestError> {
        self.request_list(
            QueueName::Chatbot,
            "/v1/chatbotcalls",
            token,
            size,
            filters,
            RESOURCE_CHATBOTCALL,
        ).await
    }

    async fn chatbot_v1_chatbotcall_delete(
        &self,
        chatbotcall_id: Uuid,
    ) -> Result<Chatbotcall, RequestError> {
        self.request(
            QueueName::Chatbot,
            &format!("/v1/chatbotcalls/{chatbotcall_id}"),
            RequestMethod::Delete,
            RESOURCE_CHATBOTCALL,
            None,
        ).await
    }
}
