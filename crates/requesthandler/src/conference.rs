use std::collections::HashMap;

use async_trait::async_trait;
use models::conference::conference::Conference;
use models::conference::conferencecall::Conferencecall;
use models::flow::action::Action;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::to_data;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// Conference creation payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConferenceCreate {
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub conference_type: String,
    pub name: String,
    pub detail: String,
    pub timeout: i32,
    pub data: HashMap<String, serde_json::Value>,
    pub pre_actions: Vec<Action>,
    pub post_actions: Vec<Action>,
}

/// conference-manager RPCs.
#[async_trait]
pub trait ConferenceRequest: Send + Sync {
    async fn conference_v1_conference_create(
        &self,
        req: &ConferenceCreate,
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_get(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Conference>, RequestError>;
    async fn conference_v1_conference_delete(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_update(
        &self,
        conference_id: Uuid,
        name: &str,
        detail: &str,
        timeout: i32,
        pre_actions: &[Action],
        post_actions: &[Action],
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_recording_start(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_recording_stop(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_transcribe_start(
        &self,
        conference_id: Uuid,
        language: &str,
    ) -> Result<Conference, RequestError>;
    async fn conference_v1_conference_transcribe_stop(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError>;

    async fn conference_v1_conferencecall_get(
        &self,
        conferencecall_id: Uuid,
    ) -> Result<Conferencecall, RequestError>;
    async fn conference_v1_conferencecall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Conferencecall>, RequestError>;
    async fn conference_v1_conferencecall_kick(
        &self,
        conferencecall_id: Uuid,
    ) -> Result<Conferencecall, RequestError>;
}

const RESOURCE_CONFERENCE: &str = "conference/conferences";
const RESOURCE_CONFERENCECALL: &str = "conference/conferencecalls";

#[async_trait]
impl<S: Sock> ConferenceRequest for RequestHandlerClient<S> {
    async fn conference_v1_conference_create(
        &self,
        req: &ConferenceCreate,
    ) -> Result<Conference, RequestError> {
        self.request(
            QueueName::Conference,
            "/v1/conferences",
            RequestMethod::Post,
            RESOURCE_CONFERENCE,
            to_data(req)?,
        ).await
    }

    async fn conference_v1_conference_get(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}"),
            RequestMethod::Get,
            RESOURCE_CONFERENCE,
            None,
        ).await
    }

    async fn conference_v1_conference_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Conference>, RequestError> {
        self.request_list(
            QueueName::Conference,
            "/v1/conferences",
            token,
            size,
            filters,
            RESOURCE_CONFERENCE,
        ).await
    }

    async fn conference_v1_conference_delete(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}"),
            RequestMethod::Delete,
            RESOURCE_CONFERENCE,
            None,
        ).await
    }

    async fn conference_v1_conference_update(
        &self,
        conference_id: Uuid,
        name: &str,
        detail: &str,
        timeout: i32,
        pre_actions: &[Action],
        post_actions: &[Action],
    ) -> Result<Conference, RequestError> {
        let data = json!({
            "name": name,
            "detail": detail,
            "timeout": timeout,
            "pre_actions": pre_actions,
            "post_actions": post_actions
        });
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}"),
            RequestMethod::Put,
            RESOURCE_CONFERENCE,
            Some(data),
        ).await
    }

    async fn conference_v1_conference_recording_start(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}/recording_start"),
            RequestMethod::Post,
            RESOURCE_CONFERENCE,
            None,
        ).await
    }

    async fn conference_v1_conference_recording_stop(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}/recording_stop"),
            RequestMethod::Post,
            RESOURCE_CONFERENCE,
            None,
        ).await
    }

    async fn conference_v1_conference_transcribe_start(
        &self,
        conference_id: Uuid,
        language: &str,
    ) -> Result<Conference, RequestError> {
        let data = json!({"language": language});
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}/transcribe_start"),
            RequestMethod::Post,
            RESOURCE_CONFERENCE,
            Some(data),
        ).await
    }

    async fn conference_v1_conference_transcribe_stop(
        &self,
        conference_id: Uuid,
    ) -> Result<Conference, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferences/{conference_id}/transcribe_stop"),
            RequestMethod::Post,
            RESOURCE_CONFERENCE,
            None,
        ).await
    }

    async fn conference_v1_conferencecall_get(
        &self,
        conferencecall_id: Uuid,
    ) -> Result<Conferencecall, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferencecalls/{conferencecall_id}"),
            RequestMethod::Get,
            RESOURCE_CONFERENCECALL,
            None,
        ).await
    }

    async fn conference_v1_conferencecall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Conferencecall>, RequestError> {
        self.request_list(
            QueueName::Conference,
            "/v1/conferencecalls",
            token,
            size,
            filters,
            RESOURCE_CONFERENCECALL,
        ).await
    }

    async fn conference_v1_conferencecall_kick(
        &self,
        conferencecall_id: Uuid,
    ) -> Result<Conferencecall, RequestError> {
        self.request(
            QueueName::Conference,
            &format!("/v1/conferencecalls/{conferencecall_id}"),
            RequestMethod::Delete,
            RESOURCE_CONFERENCECALL,
            None,
        ).await
    }
}
