//! Agent-to-agent talk. Access follows chat membership: participants act on
//! a chat, and public talks are readable by the whole customer.

use std::collections::HashSet;

use models::agent::Agent;
use models::resource::Resource;
use models::talk::chat::{self, Chat, TalkType};
use models::talk::message::{self, Message, MessageType};
use models::talk::participant::{self, Participant, ParticipantInput};
use models::talk::OWNER_TYPE_AGENT;
use requesthandler::Filters;
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{page, ServiceHandler, PERM_CUSTOMER_ALL};
use crate::errors::{LogErr, ServiceError};

/// Public talks of the customer first, then the caller's private chats.
/// Public talks are dropped from the private set; the result is newest
/// first and at most `size` long.
fn merge_chats(public: Vec<Chat>, private: Vec<Chat>, size: u64) -> Vec<Chat> {
    let mut seen = HashSet::new();
    let mut res: Vec<Chat> = public
        .into_iter()
        .chain(private.into_iter().filter(|c| c.talk_type != TalkType::Talk))
        .filter(|c| seen.insert(c.id))
        .collect();
    res.sort_by(|x, y| y.tm_create.cmp(&x.tm_create));
    res.truncate(size as usize);
    res
}

impl ServiceHandler {
    async fn talk_chat_get_live(&self, chat_id: Uuid) -> Result<Chat, ServiceError> {
        let res = self.req_handler.talk_v1_chat_get(chat_id).await?;
        if res.is_deleted() {
            return Err(ServiceError::NotFound);
        }
        Ok(res)
    }

    /// The chat, if the caller is one of its participants.
    async fn talk_chat_get_participating(
        &self,
        a: &Agent,
        chat_id: Uuid,
    ) -> Result<Chat, ServiceError> {
        let res = self.talk_chat_get_live(chat_id).await?;
        if res.customer_id != a.customer_id || !res.has_agent(a.id) {
            return Err(ServiceError::NoPermission);
        }
        Ok(res)
    }

    /// The chat, if the caller may read its messages.
    async fn talk_chat_get_readable(&self, a: &Agent, chat_id: Uuid) -> Result<Chat, ServiceError> {
        let res = self.talk_chat_get_live(chat_id).await?;
        if !res.is_readable_by(a.id, a.customer_id) {
            return Err(ServiceError::NoPermission);
        }
        Ok(res)
    }

    async fn talk_message_get_live(&self, message_id: Uuid) -> Result<Message, ServiceError> {
        let res = self.req_handler.talk_v1_message_get(message_id).await?;
        if res.is_deleted() {
            return Err(ServiceError::NotFound);
        }
        Ok(res)
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_talk_chat_create(
        &self,
        a: &Agent,
        talk_type: TalkType,
        name: &str,
        detail: &str,
        participants: &[ParticipantInput],
    ) -> Result<chat::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ALL)
            .log_err("no permission to create a chat")?;
        if talk_type == TalkType::None {
            return Err(ServiceError::Validation("chat type is required".into()))
                .log_err("could not create a chat");
        }
        let res = self
            .req_handler
            .talk_v1_chat_create(
                a.customer_id,
                talk_type,
                name,
                detail,
                OWNER_TYPE_AGENT,
                a.id,
                participants,
            )
            .await
            .log_err("could not create a chat")?;
        info!(chat_id = %res.id, "talk_chat_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_chat_get(
        &self,
        a: &Agent,
        chat_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        let res = self.talk_chat_get_participating(a, chat_id)
            .await
            .log_err("could not get the chat")?;
        Ok(res.convert_webhook_message())
    }

    /// Public talks of the caller's customer merged with the chats the
    /// caller takes part in.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, agent_id = %a.id))]
    pub async fn service_agent_talk_chat_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<chat::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ALL)
            .log_err("no permission to list chats")?;
        let (token, size) = page(size, token);

        let mut public = Filters::new();
        public.insert("customer_id".into(), json!(a.customer_id));
        public.insert("type".into(), json!(TalkType::Talk));
        public.insert("deleted".into(), json!(false));
        let public = self.req_handler
            .talk_v1_chat_list(&token, size, &public)
            .await
            .log_err("could not list talks")?;

        let mut private = Filters::new();
        private.insert("owner_type".into(), json!(OWNER_TYPE_AGENT));
        private.insert("owner_id".into(), json!(a.id));
        private.insert("deleted".into(), json!(false));
        let private = self.req_handler
            .talk_v1_chat_list(&token, size, &private)
            .await
            .log_err("could not list chats")?;

        Ok(merge_chats(public, private, size).iter().map(Chat::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_chat_update(
        &self,
        a: &Agent,
        chat_id: Uuid,
        name: Option<&str>,
        detail: Option<&str>,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.talk_chat_get_participating(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .talk_v1_chat_update(chat_id, name, detail)
            .await
            .log_err("could not update the chat")?;
        info!(chat_id = %res.id, "talk_chat_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_chat_delete(
        &self,
        a: &Agent,
        chat_id: Uuid,
    ) -> Result<chat::WebhookMessage, ServiceError> {
        self.talk_chat_get_participating(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .talk_v1_chat_delete(chat_id)
            .await
            .log_err("could not delete the chat")?;
        info!(chat_id = %res.id, "talk_chat_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_participant_list(
        &self,
        a: &Agent,
        chat_id: Uuid,
    ) -> Result<Vec<participant::WebhookMessage>, ServiceError> {
        self.talk_chat_get_participating(a, chat_id).await.log_err("could not get the chat")?;
        let res = self.req_handler
            .talk_v1_participant_list(chat_id)
            .await
            .log_err("could not list participants")?;
        Ok(res.iter().map(Participant::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_participant_create(
        &self,
        a: &Agent,
        chat_id: Uuid,
        owner_type: &str,
        owner_id: Uuid,
    ) -> Result<participant::WebhookMessage, ServiceError> {
        self.talk_chat_get_participating(a, chat_id).await.log_err("could not get the chat")?;
        let res = self
            .req_handler
            .talk_v1_participant_create(chat_id, owner_type, owner_id)
            .await
            .log_err("could not add the participant")?;
        info!(chat_id = %chat_id, participant_id = %res.id, "talk_participant_added");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_participant_delete(
        &self,
        a: &Agent,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<participant::WebhookMessage, ServiceError> {
        self.talk_chat_get_participating(a, chat_id).await.log_err("could not get the chat")?;
        let res = self
            .req_handler
            .talk_v1_participant_delete(chat_id, participant_id)
            .await
            .log_err("could not remove the participant")?;
        info!(chat_id = %chat_id, participant_id = %res.id, "talk_participant_removed");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, message_id = %message_id)
    )]
    pub async fn service_agent_talk_message_get(
        &self,
        a: &Agent,
        message_id: Uuid,
    ) -> Result<message::WebhookMessage, ServiceError> {
        let res = self.talk_message_get_live(message_id)
            .await
            .log_err("could not get the message")?;
        self.talk_chat_get_participating(a, res.chat_id).await.log_err("could not get the chat")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_message_list(
        &self,
        a: &Agent,
        chat_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<message::WebhookMessage>, ServiceError> {
        self.talk_chat_get_readable(a, chat_id).await.log_err("could not get the chat")?;
        let (token, size) = page(size, token);
        let mut filters = Filters::new();
        filters.insert("chat_id".into(), json!(chat_id));
        filters.insert("deleted".into(), json!(false));
        let res = self
            .req_handler
            .talk_v1_message_list(&token, size, &filters)
            .await
            .log_err("could not list messages")?;
        Ok(res.iter().map(Message::convert_webhook_message).collect())
    }

    /// Post into a chat; `parent_id` makes the message a threaded reply.
    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, chat_id = %chat_id)
    )]
    pub async fn service_agent_talk_message_create(
        &self,
        a: &Agent,
        chat_id: Uuid,
        parent_id: Option<Uuid>,
        message_type: MessageType,
        text: &str,
        medias: &[Value],
    ) -> Result<message::WebhookMessage, ServiceError> {
        self.talk_chat_get_participating(a, chat_id).await.log_err("could not get the chat")?;
        if text.is_empty() && medias.is_empty() {
            return Err(ServiceError::Validation("message has no text or media".into()))
                .log_err("could not create the message");
        }
        let res = self
            .req_handler
            .talk_v1_message_create(
                chat_id,
                parent_id,
                OWNER_TYPE_AGENT,
                a.id,
                message_type,
                text,
                medias,
            )
            .await
            .log_err("could not create the message")?;
        info!(message_id = %res.id, "talk_message_created");
        Ok(res.convert_webhook_message())
    }

    /// Only the author may delete a message.
    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, message_id = %message_id)
    )]
    pub async fn service_agent_talk_message_delete(
        &self,
        a: &Agent,
        message_id: Uuid,
    ) -> Result<message::WebhookMessage, ServiceError> {
        let msg = self.talk_message_get_live(message_id)
            .await
            .log_err("could not get the message")?;
        if msg
            .customer_id != a
            .customer_id || msg
            .owner_type != OWNER_TYPE_AGENT || msg
            .owner_id != a
            .id {
            return Err(ServiceError::NoPermission).log_err("message belongs to another agent");
        }
        let res = self.req_handler
            .talk_v1_message_delete(message_id)
            .await
            .log_err("could not delete the message")?;
        info!(message_id = %res.id, "talk_message_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, agent_id = %a.id, message_id = %message_id)
    )]
    pub async fn service_agent_talk_message_reaction_create(
        &self,
        a: &Agent,
        message_id: Uuid,
        emoji: &str,
    ) -> Result<message::WebhookMessage, ServiceError> {
        let msg = self.talk_message_get_live(message_id)
            .await
            .log_err("could not get the message")?;
        self.talk_chat_get_participating(a, msg.chat_id).await.log_err("could not get the chat")?;
        if emoji.is_empty() {
            return Err(ServiceError::Validation("emoji is required".into()))
                .log_err("could not add the reaction");
        }
        let res = self
            .req_handler
            .talk_v1_message_reaction_create(message_id, OWNER_TYPE_AGENT, a.id, emoji)
            .await
            .log_err("could not add the reaction")?;
        info!(message_id = %res.id, "talk_message_reaction_added");
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::RequestMethod;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    fn chat_json(id: Uuid, customer_id: Uuid, talk_type: &str, members: &[Uuid]) -> Value {
        let participants: Vec<Value> = members
            .iter()
            .map(|m| json!({"owner_type": "agent", "owner_id": m, "chat_id": id}))
            .collect();
        json!({
            "id": id,
            "customer_id": customer_id,
            "type": talk_type,
            "participants": participants
        })
    }

    fn dated(talk_type: TalkType, tm_create: &str) -> Chat {
        Chat {
            id: Uuid::new_v4(),
            talk_type,
            tm_create: Some(tm_create.into()),
            ..Default::default()
        }
    }

    #[test]
    fn merge_dedupes_sorts_and_truncates() {
        let shared = dated(TalkType::Talk, "2024-01-02 00:00:00.000000");
        let group = dated(TalkType::Group, "2024-01-03 00:00:00.000000");
        let direct = dated(TalkType::Direct, "2024-01-01 00:00:00.000000");
        let old_talk = dated(TalkType::Talk, "2023-12-01 00:00:00.000000");

        let res = merge_chats(
            vec![shared.clone(), old_talk.clone()],
            vec![shared.clone(), group.clone(), direct.clone()],
            3,
        );
        let ids: Vec<Uuid> = res.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![group.id, shared.id, direct.id]);
    }

    #[tokio::test]
    async fn non_participant_cannot_read_group_chat() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let chat_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chats/{chat_id}"),
            chat_json(chat_id, a.customer_id, "group", &[Uuid::new_v4()]),
        );

        assert!(matches!(
            h.service_agent_talk_chat_get(&a, chat_id).await,
            Err(ServiceError::NoPermission)
        ));
        let res = h.service_agent_talk_message_list(&a, chat_id, 10, "").await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
        assert!(matches!(
            h.service_agent_talk_chat_delete(&a, chat_id).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn public_talk_messages_are_readable_by_customer() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let chat_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chats/{chat_id}"),
            chat_json(chat_id, a.customer_id, "talk", &[]),
        );
        rh.sock().on(
            RequestMethod::Get,
            "/v1/messages",
            json!([{"id": Uuid::new_v4(), "chat_id": chat_id, "text": "hi"}]),
        );

        let res = h.service_agent_talk_message_list(&a, chat_id, 10, "").await.unwrap();
        assert_eq!(res[0].text, "hi");

        let filters = rh.sock()
            .find(RequestMethod::Get, "/v1/messages")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(filters["chat_id"], json!(chat_id));

        // reading is not posting
        let res = h.service_agent_talk_message_create(
            &a,
            chat_id,
            None,
            MessageType::Normal,
            "hello",
            &[],
        ).await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn public_talk_of_another_customer_is_closed() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let chat_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chats/{chat_id}"),
            chat_json(chat_id, Uuid::new_v4(), "talk", &[]),
        );

        let res = h.service_agent_talk_message_list(&a, chat_id, 10, "").await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
    }

    #[tokio::test]
    async fn participant_posts_as_itself() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let chat_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chats/{chat_id}"),
            chat_json(chat_id, a.customer_id, "group", &[a.id]),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/messages",
            json!({"id": Uuid::new_v4(), "chat_id": chat_id, "owner_id": a.id}),
        );

        h.service_agent_talk_message_create(&a, chat_id, None, MessageType::Normal, "hello", &[])
            .await
            .unwrap();

        let data = rh.sock()
            .find(RequestMethod::Post, "/v1/messages")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(data["owner_type"], "agent");
        assert_eq!(data["owner_id"], json!(a.id));
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let chat_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chats/{chat_id}"),
            chat_json(chat_id, a.customer_id, "direct", &[a.id]),
        );

        let res = h.service_agent_talk_message_create(
            &a,
            chat_id,
            None,
            MessageType::Normal,
            "",
            &[],
        ).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn only_author_deletes_message() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let msg = |id: Uuid, owner_id: Uuid| json!({
            "id": id,
            "customer_id": a.customer_id,
            "owner_type": "agent",
            "owner_id": owner_id
        });
        rh.sock().on(RequestMethod::Get, &format!("/v1/messages/{mine}"), msg(mine, a.id));
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/messages/{theirs}"),
            msg(theirs, Uuid::new_v4()),
        );
        rh.sock().on(RequestMethod::Delete, &format!("/v1/messages/{mine}"), msg(mine, a.id));

        assert!(matches!(
            h.service_agent_talk_message_delete(&a, theirs).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());

        h.service_agent_talk_message_delete(&a, mine).await.unwrap();
        assert_eq!(rh.sock().mutations().len(), 1);
    }

    #[tokio::test]
    async fn reaction_needs_membership_of_message_chat() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let chat_id = Uuid::new_v4();
        let message_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/messages/{message_id}"),
            json!({"id": message_id, "customer_id": a.customer_id, "chat_id": chat_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/chats/{chat_id}"),
            chat_json(chat_id, a.customer_id, "group", &[]),
        );

        let res = h.service_agent_talk_message_reaction_create(&a, message_id, "👍").await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn list_merges_public_and_private_chats() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let talk = Uuid::new_v4();
        let group = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            "/v1/chats",
            json!([{
                "id": talk,
                "customer_id": a.customer_id,
                "type": "talk",
                "tm_create": "2024-01-01 00:00:00.000000"
            }]),
        );
        rh.sock().on(
            RequestMethod::Get,
            "/v1/chats",
            json!([
                {
                    "id": talk,
                    "customer_id": a.customer_id,
                    "type": "talk",
                    "tm_create": "2024-01-01 00:00:00.000000",
                },
                {
                    "id": group,
                    "customer_id": a.customer_id,
                    "type": "group",
                    "tm_create": "2024-02-01 00:00:00.000000",
                }
            ]),
        );

        let res = h.service_agent_talk_chat_list(&a, 10, "").await.unwrap();
        let ids: Vec<Uuid> = res.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![group, talk]);

        let sent = rh.sock().requests();
        let public = sent[0].request.data.clone().unwrap();
        let private = sent[1].request.data.clone().unwrap();
        assert_eq!(public["type"], "talk");
        assert_eq!(private["owner_id"], json!(a.id));
    }

    #[tokio::test]
    async fn chat_create_needs_a_type() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);

        let res = h.service_agent_talk_chat_create(&a, TalkType::None, "team", "", &[]).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(rh.sock().requests().is_empty());
    }
}
