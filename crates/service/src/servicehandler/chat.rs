use models::address::{Address, AddressType};
use models::agent::Agent;
use models::chat::chat::{self, Chat};
use models::chat::chatroom::{self, Chatroom};
use models::chat::messagechat::{self, Messagechat};
use models::chat::messagechatroom::{self, Messagechatroom};
use models::chat::ChatType;
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

/// Message type of text sent through the API.
pub const MESSAGE_TYPE_NORMAL: &str = "normal";

/// Source address of a message written by `a`.
pub(crate) fn agent_address(a: &Agent) -> Address {
    Address {
        address_type: AddressType::Agent,
        target: a.id.to_string(),
        target_name: a.name.clone(),
        ..Default::default()
    }
}

impl ServiceHandler {
    async fn chat_get_authorized(&self, a: &Agent, chat_id: Uuid) -> Result<Chat, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.chat_v1_chat_get(chat_id))
            .await
    }

    pub(crate) async fn chatroom_get_authorized(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
    ) -> Result<Chatroom, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chat_v1_chatroom_get(chatroom_id),
        ).await
    }

    /// Create a chat and return the chatroom `owner_id` sees it through.
    pub(crate) async fn chat_create_with_room(
        &self,
        a: &Agent,
        chat_type: ChatType,
        owner_id: Uuid,
        participant_ids: &[Uuid],
        name: &str,
        detail: &str,
    ) -> Result<Chatroom, ServiceError> {
        let c = self.req_handler
            .chat_v1_chat_create(a.customer_id, chat_type, owner_id, participant_ids, name, detail)
            .await
            .log_err("could not create a chat")?;
        info!(chat_id = %c.id, "chat_created");

        let mut filters = customer_filters(a.customer_id);
        filters.insert("chat_id".into(), json!(c.id));
        filters.insert("owner_id".into(), json!(owner_id));
        let (token, _) = page(1, "");
        let rooms = self.req_handler
            .chat_v1_chatroom_list(&token, 1, &filters)
            .await
            .log_err("could not list chatrooms")?;
        rooms.into_iter()
            .next()
            .ok_or(ServiceError::NotFound)
            .log_err("created chat has no chatroom for its owner")
    }

    /// Post a message to a chatroom's chat and return the owner's copy of it.
    pub(crate) async fn chatroom_post_message(
        &self,
        a: &Agent,
        room: &Chatroom,
        text: &str,
        medias: &[Value],
    ) -> Result<Messagechatroom, ServiceError> {
        let m = self.req_handler
            .chat_v1_messagechat_create(
                a.customer_id,
                room.chat_id,
                &agent_address(a),
                MESSAGE_TYPE_NORMAL,
                text,
                medias,
            )
            .await
            .log_err("could not create a message")?;
        info!(messagechat_id = %m.id, chatroom_id = %room.id, "messagechat_created");

        let mut filters = customer_filters(a.customer_id);
        filters.insert("messagechat_id".into(), json!(m.id));
        filters.insert("owner_id".into(), json!(room.owner_id));
        let (token, _) = page(1, "");
        let msgs = self.req_handler
            .chat_v1_messagechatroom_list(&token, 1, &filters)
            .await
            .log_err("could not list chatroom messages")?;
        msgs.into_iter()
            .next()
            .ok_or(ServiceError::NotFound)
            .log_err("created message has no chatroom copy")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn chat_create(
        &self,
        a: &Agent,
        chat_type: ChatType,
        room_owner_id: Uuid,
        participant_ids: &[Uuid],
        name: &str,
        detail: &str,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a chat")?;
        let res = self.req_handler
            .chat_v1_chat_create(
                a.customer_id,
                chat_type,
                room_owner_id,
                participant_ids,
                name,
                detail,
            )
            .await
            .log_err("could not create a chat")?;
        info!(chat_id = %res.id, "chat_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn chat_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<chat::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list chats")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .chat_v1_chat_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list chats")?;
        Ok(res.iter().map(Chat::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chat_id = %chat_id))]
    pub async fn chat_get(
        &self,
        a: &Agent,
        chat_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        let res = self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chat_id = %chat_id))]
    pub async fn chat_delete(
        &self,
        a: &Agent,
        chat_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .chat_v1_chat_delete(chat_id)
            .await
            .log_err("could not delete the chat")?;
        info!(chat_id = %res.id, "chat_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chat_id = %chat_id))]
    pub async fn chat_update_basic_info(
        &self,
        a: &Agent,
        chat_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .chat_v1_chat_update_basic_info(chat_id, name, detail)
            .await
            .log_err("could not update the chat")?;
        info!(chat_id = %res.id, "chat_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chat_id = %chat_id))]
    pub async fn chat_update_room_owner_id(
        &self,
        a: &Agent,
        chat_id: Uuid,
        room_owner_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .chat_v1_chat_update_room_owner_id(chat_id, room_owner_id)
            .await
            .log_err("could not update the room owner")?;
        info!(chat_id = %res.id, room_owner_id = %res.room_owner_id, "chat_room_owner_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, chat_id = %chat_id, participant_id = %participant_id)
    )]
    pub async fn chat_add_participant_id(
        &self,
        a: &Agent,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .chat_v1_chat_add_participant_id(chat_id, participant_id)
            .await
            .log_err("could not add the participant")?;
        info!(chat_id = %res.id, "chat_participant_added");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, chat_id = %chat_id, participant_id = %participant_id)
    )]
    pub async fn chat_remove_participant_id(
        &self,
        a: &Agent,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .chat_v1_chat_remove_participant_id(chat_id, participant_id)
            .await
            .log_err("could not remove the participant")?;
        info!(chat_id = %res.id, "chat_participant_removed");
        Ok(res.convert_webhook_message())
    }

    /// Post to a chat as the calling agent.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, chat_id = %chat_id))]
    pub async fn chatmessage_create(
        &self,
        a: &Agent,
        chat_id: Uuid,
        message_type: &str,
        text: &str,
        medias: &[Value],
    ) -> Result<messagechat::WebhookMessage, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .chat_v1_messagechat_create(
                a.customer_id,
                chat_id,
                &agent_address(a),
                message_type,
                text,
                medias,
            )
            .await
            .log_err("could not create a message")?;
        info!(messagechat_id = %res.id, "chatmessage_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chat_id = %chat_id))]
    pub async fn chatmessage_list_by_chat_id(
        &self,
        a: &Agent,
        chat_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<messagechat::WebhookMessage>, ServiceError> {
        self.chat_get_authorized(a, chat_id).await.log_err("could not get the chat")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("chat_id".into(), json!(chat_id));
        let res = self.req_handler
            .chat_v1_messagechat_list(&token, size, &filters)
            .await
            .log_err("could not list chat messages")?;
        Ok(res.iter().map(Messagechat::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, messagechat_id = %messagechat_id))]
    pub async fn chatmessage_get(
        &self,
        a: &Agent,
        messagechat_id: Uuid,
    ) -> Result<messagechat::WebhookMessage, ServiceError> {
        let res = Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chat_v1_messagechat_get(messagechat_id),
        ).await.log_err("could not get the chat message")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, messagechat_id = %messagechat_id))]
    pub async fn chatmessage_delete(
        &self,
        a: &Agent,
        messagechat_id: Uuid,
    ) -> Result<messagechat::WebhookMessage, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chat_v1_messagechat_get(messagechat_id),
        ).await.log_err("could not get the chat message")?;
        let res = self.req_handler
            .chat_v1_messagechat_delete(messagechat_id)
            .await
            .log_err("could not delete the chat message")?;
        info!(messagechat_id = %res.id, "chatmessage_deleted");
        Ok(res.convert_webhook_message())
    }

    /// Open a chat owned by the caller and return the caller's room in it.
    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn chatroom_create(
        &self,
        a: &Agent,
        chat_type: ChatType,
        participant_ids: &[Uuid],
        name: &str,
        detail: &str,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a chatroom")?;
        let room = self.chat_create_with_room(a, chat_type, a.id, participant_ids, name, detail)
            .await?;
        Ok(room.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, owner_id = %owner_id))]
    pub async fn chatroom_list_by_owner_id(
        &self,
        a: &Agent,
        owner_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<chatroom::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list chatrooms")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("owner_id".into(), json!(owner_id));
        let res = self.req_handler
            .chat_v1_chatroom_list(&token, size, &filters)
            .await
            .log_err("could not list chatrooms")?;
        Ok(res.iter().map(Chatroom::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatroom_id = %chatroom_id))]
    pub async fn chatroom_get(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        let res = self.chatroom_get_authorized(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatroom_id = %chatroom_id))]
    pub async fn chatroom_delete(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        self.chatroom_get_authorized(a, chatroom_id).await.log_err("could not get the chatroom")?;
        let res = self.req_handler
            .chat_v1_chatroom_delete(chatroom_id)
            .await
            .log_err("could not delete the chatroom")?;
        info!(chatroom_id = %res.id, "chatroom_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatroom_id = %chatroom_id))]
    pub async fn chatroom_update_basic_info(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        self.chatroom_get_authorized(a, chatroom_id).await.log_err("could not get the chatroom")?;
        let res = self.req_handler
            .chat_v1_chatroom_update_basic_info(chatroom_id, name, detail)
            .await
            .log_err("could not update the chatroom")?;
        info!(chatroom_id = %res.id, "chatroom_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatroom_id = %chatroom_id))]
    pub async fn chatroommessage_create(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
        text: &str,
        medias: &[Value],
    ) -> Result<messagechatroom::WebhookMessage, ServiceError> {
        let room = self.chatroom_get_authorized(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        let res = self.chatroom_post_message(a, &room, text, medias).await?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, chatroom_id = %chatroom_id))]
    pub async fn chatroommessage_list(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<messagechatroom::WebhookMessage>, ServiceError> {
        self.chatroom_get_authorized(a, chatroom_id).await.log_err("could not get the chatroom")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("chatroom_id".into(), json!(chatroom_id));
        let res = self.req_handler
            .chat_v1_messagechatroom_list(&token, size, &filters)
            .await
            .log_err("could not list chatroom messages")?;
        Ok(res.iter().map(Messagechatroom::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, messagechatroom_id = %messagechatroom_id)
    )]
    pub async fn chatroommessage_get(
        &self,
        a: &Agent,
        messagechatroom_id: Uuid,
    ) -> Result<messagechatroom::WebhookMessage, ServiceError> {
        let res = Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chat_v1_messagechatroom_get(messagechatroom_id),
        ).await.log_err("could not get the chatroom message")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, messagechatroom_id = %messagechatroom_id)
    )]
    pub async fn chatroommessage_delete(
        &self,
        a: &Agent,
        messagechatroom_id: Uuid,
    ) -> Result<messagechatroom::WebhookMessage, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.chat_v1_messagechatroom_get(messagechatroom_id),
        ).await.log_err("could not get the chatroom message")?;
        let res = self.req_handler
            .chat_v1_messagechatroom_delete(messagechatroom_id)
            .await
            .log_err("could not delete the chatroom message")?;
        info!(messagechatroom_id = %res.id, "chatroommessage_deleted");
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::RequestMethod;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn chatroom_create_returns_owner_room() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let chat_id = Uuid::new_v4();
        let room_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/chats",
            json!({"id": chat_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            "/v1/chatrooms",
            json!([{
                "id": room_id,
                "customer_id": a.customer_id,
                "owner_id": a.id,
                "chat_id": chat_id
            }]),
        );

        let res = h.chatroom_create(&a, ChatType::Normal, &[a.id, Uuid::new_v4()], "room", "")
            .await
            .unwrap();
        assert_eq!(res.id, room_id);

        let chat = rh.sock().find(RequestMethod::Post, "/v1/chats").unwrap().request.data.unwrap();
        assert_eq!(chat["room_owner_id"], json!(a.id));
        let filters = rh.sock().find(RequestMethod::Get, "/v1/chatrooms").unwrap();
        assert!(filters.request.uri.contains("page_size=1"));
        let filters = filters.request.data.unwrap();
        assert_eq!(filters["chat_id"], json!(chat_id));
        assert_eq!(filters["owner_id"], json!(a.id));
    }

    #[tokio::test]
    async fn chatroommessage_create_posts_to_the_chat() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let room_id = Uuid::new_v4();
        let chat_id = Uuid::new_v4();
        let message_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatrooms/{room_id}"),
            json!({
                "id": room_id,
                "customer_id": a.customer_id,
                "owner_id": a.id,
                "chat_id": chat_id
            }),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/messagechats",
            json!({"id": message_id, "customer_id": a.customer_id, "chat_id": chat_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            "/v1/messagechatrooms",
            json!([{
                "id": Uuid::new_v4(),
                "customer_id": a.customer_id,
                "chatroom_id": room_id,
                "messagechat_id": message_id,
                "text": "hi"
            }]),
        );

        let res = h.chatroommessage_create(&a, room_id, "hi", &[]).await.unwrap();
        assert_eq!(res.messagechat_id, message_id);

        let sent = rh.sock()
            .find(RequestMethod::Post, "/v1/messagechats")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(sent["chat_id"], json!(chat_id));
        assert_eq!(sent["message_type"], MESSAGE_TYPE_NORMAL);
        assert_eq!(sent["source"]["type"], "agent");
        assert_eq!(sent["source"]["target"], a.id.to_string());
    }

    #[tokio::test]
    async fn chatroom_of_other_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let room_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chatrooms/{room_id}"),
            json!({"id": room_id, "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(
            h.chatroommessage_create(&a, room_id, "hi", &[]).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(matches!(h.chatroom_delete(&a, room_id).await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }
}
