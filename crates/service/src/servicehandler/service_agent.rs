//! Agent-facing endpoints. An agent here acts only on what it owns: calls
//! it is the owner of, its own chatrooms and the messages in them.

use models::agent::Agent;
use models::call::call::{self, Call};
use models::chat::chatroom::{self, Chatroom};
use models::chat::messagechatroom::{self, Messagechatroom};
use models::chat::ChatType;
use models::resource::Resource;
use requesthandler::{Filters, RequestError};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{page, ServiceHandler, PERM_CUSTOMER_ALL};
use crate::errors::{LogErr, ServiceError};

/// Customer-scoped filters narrowed down to the caller's own resources.
fn owner_filters(a: &Agent) -> Filters {
    let mut filters = Filters::new();
    filters.insert("customer_id".into(), json!(a.customer_id));
    filters.insert("owner_id".into(), json!(a.id));
    filters.insert("deleted".into(), json!(false));
    filters
}

impl ServiceHandler {
    /// Fetch a resource and require the caller to be its owner.
    async fn service_agent_get_owned<T, F>(
        a: &Agent,
        fetch: F,
        owner_of: fn(&T) -> Uuid,
    ) -> Result<T, ServiceError>
    where
        T: Resource,
        F: std::future::Future<Output = Result<T, RequestError>>,
    {
        let res = fetch.await?;
        if res.is_deleted() {
            return Err(ServiceError::NotFound);
        }
        if res.customer_id() != a.customer_id || owner_of(&res) != a.id {
            return Err(ServiceError::NoPermission);
        }
        Ok(res)
    }

    async fn service_agent_call_get_owned(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<Call, ServiceError> {
        Self::service_agent_get_owned(
            a,
            self.req_handler.call_v1_call_get(call_id),
            |c: &Call| c.owner_id,
        ).await
    }

    async fn service_agent_chatroom_get_owned(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
    ) -> Result<Chatroom, ServiceError> {
        Self::service_agent_get_owned(
            a,
            self.req_handler.chat_v1_chatroom_get(chatroom_id),
            |r: &Chatroom| r.owner_id,
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_call_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<call::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ALL)
            .log_err("no permission to list calls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .call_v1_call_list(&token, size, &owner_filters(a))
            .await
            .log_err("could not list calls")?;
        Ok(res.iter().map(Call::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, call_id = %call_id)
    )]
    pub async fn service_agent_call_get(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<call::WebhookMessage, ServiceError> {
        let res = self.service_agent_call_get_owned(a, call_id)
            .await
            .log_err("could not get the call")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, call_id = %call_id)
    )]
    pub async fn service_agent_call_delete(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<call::WebhookMessage, ServiceError> {
        self.service_agent_call_get_owned(a, call_id).await.log_err("could not get the call")?;
        let res = self.req_handler
            .call_v1_call_delete(call_id)
            .await
            .log_err("could not delete the call")?;
        info!(call_id = %res.id, "call_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_chatroom_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<chatroom::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ALL)
            .log_err("no permission to list chatrooms")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .chat_v1_chatroom_list(&token, size, &owner_filters(a))
            .await
            .log_err("could not list chatrooms")?;
        Ok(res.iter().map(Chatroom::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chatroom_id = %chatroom_id)
    )]
    pub async fn service_agent_chatroom_get(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        let res = self.service_agent_chatroom_get_owned(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chatroom_id = %chatroom_id)
    )]
    pub async fn service_agent_chatroom_delete(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        self.service_agent_chatroom_get_owned(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        let res = self.req_handler
            .chat_v1_chatroom_delete(chatroom_id)
            .await
            .log_err("could not delete the chatroom")?;
        info!(chatroom_id = %res.id, "chatroom_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_chatroom_create(
        &self,
        a: &Agent,
        chat_type: ChatType,
        participant_ids: &[Uuid],
        name: &str,
        detail: &str,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ALL)
            .log_err("no permission to create a chatroom")?;
        let room = self.chat_create_with_room(a, chat_type, a.id, participant_ids, name, detail)
            .await?;
        Ok(room.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chatroom_id = %chatroom_id)
    )]
    pub async fn service_agent_chatroom_update_basic_info(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<chatroom::WebhookMessage, ServiceError> {
        self.service_agent_chatroom_get_owned(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        let res = self.req_handler
            .chat_v1_chatroom_update_basic_info(chatroom_id, name, detail)
            .await
            .log_err("could not update the chatroom")?;
        info!(chatroom_id = %res.id, "chatroom_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            agent_id = %a.id,
            messagechatroom_id = %messagechatroom_id,
        )
    )]
    pub async fn service_agent_chatroommessage_get(
        &self,
        a: &Agent,
        messagechatroom_id: Uuid,
    ) -> Result<messagechatroom::WebhookMessage, ServiceError> {
        let res = Self::service_agent_get_owned(
            a,
            self.req_handler.chat_v1_messagechatroom_get(messagechatroom_id),
            |m: &Messagechatroom| m.owner_id,
        )
            .await
            .log_err("could not get the chatroom message")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chatroom_id = %chatroom_id)
    )]
    pub async fn service_agent_chatroommessage_list(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<messagechatroom::WebhookMessage>, ServiceError> {
        self.service_agent_chatroom_get_owned(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        let (token, size) = page(size, token);
        let mut filters = owner_filters(a);
        filters.insert("chatroom_id".into(), json!(chatroom_id));
        let res = self.req_handler
            .chat_v1_messagechatroom_list(&token, size, &filters)
            .await
            .log_err("could not list chatroom messages")?;
        Ok(res.iter().map(Messagechatroom::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chatroom_id = %chatroom_id)
    )]
    pub async fn service_agent_chatroommessage_create(
        &self,
        a: &Agent,
        chatroom_id: Uuid,
        text: &str,
        medias: &[Value],
    ) -> Result<messagechatroom::WebhookMessage, ServiceError> {
        let room = self.service_agent_chatroom_get_owned(a, chatroom_id)
            .await
            .log_err("could not get the chatroom")?;
        let res = self.chatroom_post_message(a, &room, text, medias).await?;
        Ok(res.convert_webhook_message())
    }
}
