use async_trait::async_trait;
use models::address::Address;
use models::message::Message;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// message-manager RPCs.
#[async_trait]
pub trait MessageRequest: Send + Sync {
    async fn message_v1_message_send(
        &self,
        message_id: Uuid,
        customer_id: Uuid,
        source: &Address,
        destinations: &[Address],
        text: &str,
    ) -> Result<Message, RequestError>;
    async fn message_v1_message_get(&self, message_id: Uuid) -> Result<Message, RequestError>;
    async fn message_v1_message_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Message>, RequestError>;
    async fn message_v1_message_delete(&self, message_id: Uuid) -> Result<Message, RequestError>;
}

const RESOURCE: &str = "message/messages";

#[async_trait]
impl<S: Sock> MessageRequest for RequestHandlerClient<S> {
    async fn message_v1_message_send(
        &self,
        message_id: Uuid,
        customer_id: Uuid,
        source: &Address,
        destinations: &[Address],
        text: &str,
    ) -> Result<Message, RequestError> {
        let data = json!({
            "id": message_id,
            "customer_id": customer_id,
            "source": source,
            "destinations": destinations,
            "text": text,
        });
        self.request(QueueName::Message, "/v1/messages", RequestMethod::Post, RESOURCE, Some(data))
            .await
    }

    async fn message_v1_message_get(&self, message_id: Uuid) -> Result<Message, RequestError> {
        self.request(
            QueueName::Message,
            &format!("/v1/messages/{message_id}"),
            RequestMethod::Get,
            RESOURCE,
            None,
        ).await
    }

    async fn message_v1_message_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Message>, RequestError> {
        self.request_list(QueueName::Message, "/v1/messages", token, size, filters, RESOURCE).await
    }

    async fn message_v1_message_delete(&self, message_id: Uuid) -> Result<Message, RequestError> {
        self.request(
            QueueName::Message,
            &format!("/v1/messages/{message_id}"),
            RequestMethod::Delete,
            RESOURCE,
            None,
        ).await
    }
}
