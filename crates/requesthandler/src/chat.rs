use async_trait::async_trait;
use models::address::Address;
use models::chat::chat::Chat;
use models::chat::chatroom::Chatroom;
use models::chat::messagechat::Messagechat;
use models::chat::messagechatroom::Messagechatroom;
use models::chat::ChatType;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// chat-manager RPCs.
#[async_trait]
pub trait ChatRequest: Send + Sync {
    async fn chat_v1_chat_create(
        &self,
        customer_id: Uuid,
        chat_type: ChatType,
        room_owner_id: Uuid,
        participant_ids: &[Uuid],
        name: &str,
        detail: &str,
    ) -> Result<Chat, RequestError>;
    async fn chat_v1_chat_get(&self, chat_id: Uuid) -> Result<Chat, RequestError>;
    async fn chat_v1_chat_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chat>, RequestError>;
    async fn chat_v1_chat_delete(&self, chat_id: Uuid) -> Result<Chat, RequestError>;
    async fn chat_v1_chat_update_basic_info(
        &self,
        chat_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Chat, RequestError>;
    async fn chat_v1_chat_update_room_owner_id(
        &self,
        chat_id: Uuid,
        room_owner_id: Uuid,
    ) -> Result<Chat, RequestError>;
    async fn chat_v1_chat_add_participant_id(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Chat, RequestError>;
    async fn chat_v1_chat_remove_participant_id(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Chat, RequestError>;

    async fn chat_v1_chatroom_get(&self, chatroom_id: Uuid) -> Result<Chatroom, RequestError>;
    async fn chat_v1_chatroom_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chatroom>, RequestError>;
    async fn chat_v1_chatroom_delete(&self, chatroom_id: Uuid) -> Result<Chatroom, RequestError>;
    async fn chat_v1_chatroom_update_basic_info(
        &self,
        chatroom_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Chatroom, RequestError>;

    async fn chat_v1_messagechat_create(
        &self,
        customer_id: Uuid,
        chat_id: Uuid,
        source: &Address,
        message_type: &str,
        text: &str,
        medias: &[serde_json::Value],
    ) -> Result<Messagechat, RequestError>;
    async fn chat_v1_messagechat_get(
        &self,
        messagechat_id: Uuid,
    ) -> Result<Messagechat, RequestError>;
    async fn chat_v1_messagechat_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Messagechat>, RequestError>;
    async fn chat_v1_messagechat_delete(
        &self,
        messagechat_id: Uuid,
    ) -> Result<Messagechat, RequestError>;

    async fn chat_v1_messagechatroom_get(
        &self,
        messagechatroom_id: Uuid,
    ) -> Result<Messagechatroom, RequestError>;
    async fn chat_v1_messagechatroom_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Messagechatroom>, RequestError>;
    async fn chat_v1_messagechatroom_delete(
        &self,
        messagechatroom_id: Uuid,
    ) -> Result<Messagechatroom, RequestError>;
}

const RESOURCE_CHAT: &str = "chat/chats";
const RESOURCE_CHATROOM: &str = "chat/chatrooms";
const RESOURCE_MESSAGECHAT: &str = "chat/messagechats";
const RESOURCE_MESSAGECHATROOM: &str = "chat/messagechatrooms";

#[async_trait]
impl<S: Sock> ChatRequest for RequestHandlerClient<S> {
    async fn chat_v1_chat_create(
        &self,
        customer_id: Uuid,
        chat_type: ChatType,
        room_owner_id: Uuid,
        participant_ids: &[Uuid],
        name: &str,
        detail: &str,
    ) -> Result<Chat, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "type": chat_type,
            "room_owner_id": room_owner_id,
            "participant_ids": participant_ids,
            "name": name,
            "detail": detail,
        });
        self.request(QueueName::Chat, "/v1/chats", RequestMethod::Post, RESOURCE_CHAT, Some(data))
            .await
    }

    async fn chat_v1_chat_get(&self, chat_id: Uuid) -> Result<Chat, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/chats/{chat_id}"),
            RequestMethod::Get,
            RESOURCE_CHAT,
            None,
        ).await
    }

    async fn chat_v1_chat_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chat>, RequestError> {
        self.request_list(QueueName::Chat, "/v1/chats", token, size, filters, RESOURCE_CHAT).await
    }

    async fn chat_v1_chat_delete(&self, chat_id: Uuid) -> Result<Chat, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/chats/{chat_id}"),
            RequestMethod::Delete,
            RESOURCE_CHAT,
            None,
        ).await
    }

    async fn chat_v1_chat_update_basic_info(
        &self,
        chat_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Chat, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Chat,
            &format!("/v1/chats/{chat_id}"),
            RequestMethod::Put,
            RESOURCE_CHAT,
            Some(data),
        ).await
    }

    async fn chat_v1_chat_update_room_owner_id(
        &self,
        chat_id: Uuid,
        room_owner_id: Uuid,
    ) -> Result<Chat, RequestError> {
        let data = json!({"room_owner_id": room_owner_id});
        self.request(
            QueueName::Chat,
            &format!("/v1/chats/{chat_id}/room_owner_id"),
            RequestMethod::Put,
            RESOURCE_CHAT,
            Some(data),
        ).await
    }

    async fn chat_v1_chat_add_participant_id(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Chat, RequestError> {
        let data = json!({"participant_id": participant_id});
        self.request(
            QueueName::Chat,
            &format!("/v1/chats/{chat_id}/participant_ids"),
            RequestMethod::Post,
            RESOURCE_CHAT,
            Some(data),
        ).await
    }

    async fn chat_v1_chat_remove_participant_id(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Chat, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/chats/{chat_id}/participant_ids/{participant_id}"),
            RequestMethod::Delete,
            RESOURCE_CHAT,
            None,
        ).await
    }

    async fn chat_v1_chatroom_get(&self, chatroom_id: Uuid) -> Result<Chatroom, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/chatrooms/{chatroom_id}"),
            RequestMethod::Get,
            RESOURCE_CHATROOM,
            None,
        ).await
    }

    async fn chat_v1_chatroom_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chatroom>, RequestError> {
        self.request_list(QueueName::Chat, "/v1/chatrooms", token, size, filters, RESOURCE_CHATROOM)
            .await
    }

    async fn chat_v1_chatroom_delete(&self, chatroom_id: Uuid) -> Result<Chatroom, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/chatrooms/{chatroom_id}"),
            RequestMethod::Delete,
            RESOURCE_CHATROOM,
            None,
        ).await
    }

    async fn chat_v1_chatroom_update_basic_info(
        &self,
        chatroom_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Chatroom, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Chat,
            &format!("/v1/chatrooms/{chatroom_id}"),
            RequestMethod::Put,
            RESOURCE_CHATROOM,
            Some(data),
        ).await
    }

    async fn chat_v1_messagechat_create(
        &self,
        customer_id: Uuid,
        chat_id: Uuid,
        source: &Address,
        message_type: &str,
        text: &str,
        medias: &[serde_json::Value],
    ) -> Result<Messagechat, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "chat_id": chat_id,
            "source": source,
            "message_type": message_type,
            "text": text,
            "medias": medias,
        });
        self.request(
            QueueName::Chat,
            "/v1/messagechats",
            RequestMethod::Post,
            RESOURCE_MESSAGECHAT,
            Some(data),
        ).await
    }

    async fn chat_v1_messagechat_get(
        &self,
        messagechat_id: Uuid,
    ) -> Result<Messagechat, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/messagechats/{messagechat_id}"),
            RequestMethod::Get,
            RESOURCE_MESSAGECHAT,
            None,
        ).await
    }

    async fn chat_v1_messagechat_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Messagechat>, RequestError> {
        self.request_list(
            QueueName::Chat,
            "/v1/messagechats",
            token,
            size,
            filters,
            RESOURCE_MESSAGECHAT,
        ).await
    }

    async fn chat_v1_messagechat_delete(
        &self,
        messagechat_id: Uuid,
    ) -> Result<Messagechat, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/messagechats/{messagechat_id}"),
            RequestMethod::Delete,
            RESOURCE_MESSAGECHAT,
            None,
        ).await
    }

    async fn chat_v1_messagechatroom_get(
        &self,
        messagechatroom_id: Uuid,
    ) -> Result<Messagechatroom, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/messagechatrooms/{messagechatroom_id}"),
            RequestMethod::Get,
            RESOURCE_MESSAGECHATROOM,
            None,
        ).await
    }

    async fn chat_v1_messagechatroom_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Messagechatroom>, RequestError> {
        self.request_list(
            QueueName::Chat,
            "/v1/messagechatrooms",
            token,
            size,
            filters,
            RESOURCE_MESSAGECHATROOM,
        ).await
    }

    async fn chat_v1_messagechatroom_delete(
        &self,
        messagechatroom_id: Uuid,
    ) -> Result<Messagechatroom, RequestError> {
        self.request(
            QueueName::Chat,
            &format!("/v1/messagechatrooms/{messagechatroom_id}"),
            RequestMethod::Delete,
            RESOURCE_MESSAGECHATROOM,
            None,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn remove_participant_puts_id_in_path() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let chat_id = Uuid::new_v4();
        let participant_id = Uuid::new_v4();
        let path = format!("/v1/chats/{chat_id}/participant_ids/{participant_id}");
        rh.sock().on(RequestMethod::Delete, &path, json!({"id": chat_id, "participant_ids": []}));

        let res = rh.chat_v1_chat_remove_participant_id(chat_id, participant_id).await.unwrap();
        assert!(res.participant_ids.is_empty());
        assert!(rh.sock().find(RequestMethod::Delete, &path).unwrap().request.data.is_none());
    }
}
