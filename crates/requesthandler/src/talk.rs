use async_trait::async_trait;
use models::talk::chat::{Chat, TalkType};
use models::talk::message::{Message, MessageType};
use models::talk::participant::{Participant, ParticipantInput};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::parse_list;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// talk-manager RPCs.
#[async_trait]
pub trait TalkRequest: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn talk_v1_chat_create(
        &self,
        customer_id: Uuid,
        talk_type: TalkType,
        name: &str,
        detail: &str,
        owner_type: &str,
        owner_id: Uuid,
        participants: &[ParticipantInput],
    ) -> Result<Chat, RequestError>;
    async fn talk_v1_chat_get(&self, chat_id: Uuid) -> Result<Chat, RequestError>;
    async fn talk_v1_chat_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chat>, RequestError>;
    async fn talk_v1_chat_update(
        &self,
        chat_id: Uuid,
        name: Option<&str>,
        detail: Option<&str>,
    ) -> Result<Chat, RequestError>;
    async fn talk_v1_chat_delete(&self, chat_id: Uuid) -> Result<Chat, RequestError>;

    async fn talk_v1_participant_list(
        &self,
        chat_id: Uuid,
    ) -> Result<Vec<Participant>, RequestError>;
    async fn talk_v1_participant_create(
        &self,
        chat_id: Uuid,
        owner_type: &str,
        owner_id: Uuid,
    ) -> Result<Participant, RequestError>;
    async fn talk_v1_participant_delete(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Participant, RequestError>;

    #[allow(clippy::too_many_arguments)]
    async fn talk_v1_message_create(
        &self,
        chat_id: Uuid,
        parent_id: Option<Uuid>,
        owner_type: &str,
        owner_id: Uuid,
        message_type: MessageType,
        text: &str,
        medias: &[Value],
    ) -> Result<Message, RequestError>;
    async fn talk_v1_message_get(&self, message_id: Uuid) -> Result<Message, RequestError>;
    async fn talk_v1_message_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Message>, RequestError>;
    async fn talk_v1_message_delete(&self, message_id: Uuid) -> Result<Message, RequestError>;
    async fn talk_v1_message_reaction_create(
        &self,
        message_id: Uuid,
        owner_type: &str,
        owner_id: Uuid,
        emoji: &str,
    ) -> Result<Message, RequestError>;
}

const RESOURCE_CHAT: &str = "talk/chats";
const RESOURCE_PARTICIPANT: &str = "talk/participants";
const RESOURCE_MESSAGE: &str = "talk/messages";

#[async_trait]
impl<S: Sock> TalkRequest for RequestHandlerClient<S> {
    async fn talk_v1_chat_create(
        &self,
        customer_id: Uuid,
        talk_type: TalkType,
        name: &str,
        detail: &str,
        owner_type: &str,
        owner_id: Uuid,
        participants: &[ParticipantInput],
    ) -> Result<Chat, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "type": talk_type,
            "name": name,
            "detail": detail,
            "owner_type": owner_type,
            "owner_id": owner_id,
            "participants": participants,
        });
        self.request(QueueName::Talk, "/v1/chats", RequestMethod::Post, RESOURCE_CHAT, Some(data))
            .await
    }

    async fn talk_v1_chat_get(&self, chat_id: Uuid) -> Result<Chat, RequestError> {
        self.request(
            QueueName::Talk,
            &format!("/v1/chats/{chat_id}"),
            RequestMethod::Get,
            RESOURCE_CHAT,
            None,
        ).await
    }

    async fn talk_v1_chat_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Chat>, RequestError> {
        self.request_list(QueueName::Talk, "/v1/chats", token, size, filters, RESOURCE_CHAT).await
    }

    async fn talk_v1_chat_update(
        &self,
        chat_id: Uuid,
        name: Option<&str>,
        detail: Option<&str>,
    ) -> Result<Chat, RequestError> {
        let mut data = json!({});
        if let Some(name) = name {
            data["name"] = json!(name);
        }
        if let Some(detail) = detail {
            data["detail"] = json!(detail);
        }
        self.request(
            QueueName::Talk,
            &format!("/v1/chats/{chat_id}"),
            RequestMethod::Put,
            RESOURCE_CHAT,
            Some(data),
        ).await
    }

    async fn talk_v1_chat_delete(&self, chat_id: Uuid) -> Result<Chat, RequestError> {
        self.request(
            QueueName::Talk,
            &format!("/v1/chats/{chat_id}"),
            RequestMethod::Delete,
            RESOURCE_CHAT,
            None,
        ).await
    }

    async fn talk_v1_participant_list(
        &self,
        chat_id: Uuid,
    ) -> Result<Vec<Participant>, RequestError> {
        let uri = format!("/v1/talks/{chat_id}/participants");
        let res = self.send_request(
            QueueName::Talk,
            &uri,
            RequestMethod::Get,
            RESOURCE_PARTICIPANT,
            None,
        ).await?;
        parse_list(res)
    }

    async fn talk_v1_participant_create(
        &self,
        chat_id: Uuid,
        owner_type: &str,
        owner_id: Uuid,
    ) -> Result<Participant, RequestError> {
        let data = json!({"owner_type": owner_type, "owner_id": owner_id});
        let uri = format!("/v1/talks/{chat_id}/participants");
        self.request(QueueName::Talk, &uri, RequestMethod::Post, RESOURCE_PARTICIPANT, Some(data))
            .await
    }

    async fn talk_v1_participant_delete(
        &self,
        chat_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Participant, RequestError> {
        let uri = format!("/v1/talks/{chat_id}/participants/{participant_id}");
        self.request(QueueName::Talk, &uri, RequestMethod::Delete, RESOURCE_PARTICIPANT, None).await
    }

    async fn talk_v1_message_create(
        &self,
        chat_id: Uuid,
        parent_id: Option<Uuid>,
        owner_type: &str,
        owner_id: Uuid,
        message_type: MessageType,
        text: &str,
        medias: &[Value],
    ) -> Result<Message, RequestError> {
        let data = json!({
            "chat_id": chat_id,
            "parent_id": parent_id,
            "owner_type": owner_type,
            "owner_id": owner_id,
            "type": message_type,
            "text": text,
            "medias": medias,
        });
        self.request(
            QueueName::Talk,
            "/v1/messages",
            RequestMethod::Post,
            RESOURCE_MESSAGE,
            Some(data),
        ).await
    }

    async fn talk_v1_message_get(&self, message_id: Uuid) -> Result<Message, RequestError> {
        self.request(
            QueueName::Talk,
            &format!("/v1/messages/{message_id}"),
            RequestMethod::Get,
            RESOURCE_MESSAGE,
            None,
        ).await
    }

    async fn talk_v1_message_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Message>, RequestError> {
        self.request_list(QueueName::Talk, "/v1/messages", token, size, filters, RESOURCE_MESSAGE)
            .await
    }

    async fn talk_v1_message_delete(&self, message_id: Uuid) -> Result<Message, RequestError> {
        self.request(
            QueueName::Talk,
            &format!("/v1/messages/{message_id}"),
            RequestMethod::Delete,
            RESOURCE_MESSAGE,
            None,
        ).await
    }

    async fn talk_v1_message_reaction_create(
        &self,
        message_id: Uuid,
        owner_type: &str,
        owner_id: Uuid,
        emoji: &str,
    ) -> Result<Message, RequestError> {
        let data = json!({"owner_type": owner_type, "owner_id": owner_id, "emoji": emoji});
        let uri = format!("/v1/messages/{message_id}/reactions");
        self.request(QueueName::Talk, &uri, RequestMethod::Post, RESOURCE_MESSAGE, Some(data)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn chat_update_sends_only_given_fields() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Put,
            &format!("/v1/chats/{id}"),
            json!({"id": id, "name": "renamed"}),
        );

        let res = rh.talk_v1_chat_update(id, Some("renamed"), None).await.unwrap();
        assert_eq!(res.name, "renamed");

        let sent = &rh.sock().requests()[0];
        assert_eq!(sent.queue, "bin-manager.talk-manager.request");
        assert_eq!(sent.request.data, Some(json!({"name": "renamed"})));
    }

    #[tokio::test]
    async fn participant_list_reads_array_reply() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let chat_id = Uuid::new_v4();
        let agent_id = Uuid::new_v4();
        let path = format!("/v1/talks/{chat_id}/participants");
        rh.sock().on(
            RequestMethod::Get,
            &path,
            json!([{"owner_type": "agent", "owner_id": agent_id, "chat_id": chat_id}]),
        );

        let res = rh.talk_v1_participant_list(chat_id).await.unwrap();
        assert!(res[0].is_agent(agent_id));
    }

    #[tokio::test]
    async fn message_create_marks_reply_parent() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let chat_id = Uuid::new_v4();
        let parent_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/messages",
            json!({"id": Uuid::new_v4(), "chat_id": chat_id, "parent_id": parent_id}),
        );

        let res = rh
            .talk_v1_message_create(
                chat_id,
                Some(parent_id),
                "agent",
                Uuid::new_v4(),
                MessageType::Normal,
                "Reply",
                &[],
            )
            .await
            .unwrap();
        assert_eq!(res.parent_id, Some(parent_id));

        let data = rh.sock()
            .find(RequestMethod::Post, "/v1/messages")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(data["parent_id"], json!(parent_id));
        assert_eq!(data["type"], "normal");
    }
}
