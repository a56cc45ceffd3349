use async_trait::async_trait;
use models::conversation::account::Account;
use models::conversation::conversation::Conversation;
use models::conversation::message::Message;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// conversation-manager RPCs.
#[async_trait]
pub trait ConversationRequest: Send + Sync {
    async fn conversation_v1_conversation_get(
        &self,
        conversation_id: Uuid,
    ) -> Result<Conversation, RequestError>;
    async fn conversation_v1_conversation_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Conversation>, RequestError>;
    async fn conversation_v1_conversation_update(
        &self,
        conversation_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Conversation, RequestError>;

    async fn conversation_v1_message_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Message>, RequestError>;
    async fn conversation_v1_message_send(
        &self,
        conversation_id: Uuid,
        text: &str,
        medias: &[serde_json::Value],
    ) -> Result<Message, RequestError>;

    async fn conversation_v1_account_create(
        &self,
        customer_id: Uuid,
        account_type: &str,
        name: &str,
        detail: &str,
        secret: &str,
        token: &str,
    ) -> Result<Account, RequestError>;
    async fn conversation_v1_account_get(&self, account_id: Uuid) -> Result<Account, RequestError>;
    async fn conversation_v1_account_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Account>, RequestError>;
    async fn conversation_v1_account_update(
        &self,
        account_id: Uuid,
        name: &str,
        detail: &str,
        secret: &str,
        token: &str,
    ) -> Result<Account, RequestError>;
    async fn conversation_v1_account_delete(
        &self,
        account_id: Uuid,
    ) -> Result<Account, RequestError>;
}

const RESOURCE_CONVERSATION: &str = "conversation/conversations";
const RESOURCE_MESSAGE: &str = "conversation/messages";
const RESOURCE_ACCOUNT: &str = "conversation/accounts";

#[async_trait]
impl<S: Sock> ConversationRequest for RequestHandlerClient<S> {
    async fn conversation_v1_conversation_get(
        &self,
        conversation_id: Uuid,
    ) -> Result<Conversation, RequestError> {
        self.request(
            QueueName::Conversation,
            &format!("/v1/conversations/{conversation_id}"),
            RequestMethod::Get,
            RESOURCE_CONVERSATION,
            None,
        ).await
    }

    async fn conversation_v1_conversation_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Conversation>, RequestError> {
        self.request_list(
            QueueName::Conversation,
            "/v1/conversations",
            token,
            size,
            filters,
            RESOURCE_CONVERSATION,
        ).await
    }

    async fn conversation_v1_conversation_update(
        &self,
        conversation_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Conversation, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Conversation,
            &format!("/v1/conversations/{conversation_id}"),
            RequestMethod::Put,
            RESOURCE_CONVERSATION,
            Some(data),
        ).await
    }

    async fn conversation_v1_message_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Message>, RequestError> {
        self.request_list(
            QueueName::Conversation,
            "/v1/messages",
            token,
            size,
            filters,
            RESOURCE_MESSAGE,
        ).await
    }

    async fn conversation_v1_message_send(
        &self,
        conversation_id: Uuid,
        text: &str,
        medias: &[serde_json::Value],
    ) -> Result<Message, RequestError> {
        let data = json!({"text": text, "medias": medias});
        self.request(
            QueueName::Conversation,
            &format!("/v1/conversations/{conversation_id}/messages"),
            RequestMethod::Post,
            RESOURCE_MESSAGE,
            Some(data),
        ).await
    }

    async fn conversation_v1_account_create(
        &self,
        customer_id: Uuid,
        account_type: &str,
        name: &str,
        detail: &str,
        secret: &str,
        token: &str,
    ) -> Result<Account, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "type": account_type,
            "name": name,
            "detail": detail,
            "secret": secret,
            "token": token
        });
        self.request(
            QueueName::Conversation,
            "/v1/accounts",
            RequestMethod::Post,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn conversation_v1_account_get(&self, account_id: Uuid) -> Result<Account, RequestError> {
        self.request(
            QueueName::Conversation,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Get,
            RESOURCE_ACCOUNT,
            None,
        ).await
    }

    async fn conversation_v1_account_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Account>, RequestError> {
        self.request_list(
            QueueName::Conversation,
            "/v1/accounts",
            token,
            size,
            filters,
            RESOURCE_ACCOUNT,
        ).await
    }

    async fn conversation_v1_account_update(
        &self,
        account_id: Uuid,
        name: &str,
        detail: &str,
        secret: &str,
        token: &str,
    ) -> Result<Account, RequestError> {
        let data = json!({"name": name, "detail": detail, "secret": secret, "token": token});
        self.request(
            QueueName::Conversation,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Put,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn conversation_v1_account_delete(
        &self,
        account_id: Uuid,
    ) -> Result<Account, RequestError> {
        self.request(
            QueueName::Conversation,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Delete,
            RESOURCE_ACCOUNT,
            None,
        ).await
    }
}
