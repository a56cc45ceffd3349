use async_trait::async_trait;
use models::address::Address;
use models::call::call::{Call, MuteDirection};
use models::call::groupcall::Groupcall;
use models::call::recording::{Recording, RecordingStartOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::to_data;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// Outgoing call creation fans out into plain calls and, for
/// multi-destination targets (agents, extensions with several devices), groupcalls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallCreateResult {
    pub calls: Vec<Call>,
    pub groupcalls: Vec<Groupcall>,
}

/// call-manager RPCs.
#[async_trait]
pub trait CallRequest: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn call_v1_call_create(
        &self,
        customer_id: Uuid,
        flow_id: Uuid,
        master_call_id: Uuid,
        source: &Address,
        destinations: &[Address],
        early_execution: bool,
        connect: bool,
    ) -> Result<CallCreateResult, RequestError>;
    async fn call_v1_call_get(&self, call_id: Uuid) -> Result<Call, RequestError>;
    async fn call_v1_call_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Call>, RequestError>;
    async fn call_v1_call_delete(&self, call_id: Uuid) -> Result<Call, RequestError>;
    async fn call_v1_call_hangup(&self, call_id: Uuid) -> Result<Call, RequestError>;
    async fn call_v1_call_talk(
        &self,
        call_id: Uuid,
        text: &str,
        gender: &str,
        language: &str,
    ) -> Result<(), RequestError>;
    async fn call_v1_call_hold_on(&self, call_id: Uuid) -> Result<(), RequestError>;
    async fn call_v1_call_hold_off(&self, call_id: Uuid) -> Result<(), RequestError>;
    async fn call_v1_call_mute_on(
        &self,
        call_id: Uuid,
        direction: MuteDirection,
    ) -> Result<(), RequestError>;
    async fn call_v1_call_mute_off(
        &self,
        call_id: Uuid,
        direction: MuteDirection,
    ) -> Result<(), RequestError>;
    async fn call_v1_call_moh_on(&self, call_id: Uuid) -> Result<(), RequestError>;
    async fn call_v1_call_moh_off(&self, call_id: Uuid) -> Result<(), RequestError>;
    async fn call_v1_call_silence_on(&self, call_id: Uuid) -> Result<(), RequestError>;
    async fn call_v1_call_silence_off(&self, call_id: Uuid) -> Result<(), RequestError>;
    async fn call_v1_call_recording_start(
        &self,
        call_id: Uuid,
        opts: &RecordingStartOptions,
    ) -> Result<Call, RequestError>;
    async fn call_v1_call_recording_stop(&self, call_id: Uuid) -> Result<Call, RequestError>;

    #[allow(clippy::too_many_arguments)]
    async fn call_v1_groupcall_create(
        &self,
        customer_id: Uuid,
        flow_id: Uuid,
        source: &Address,
        destinations: &[Address],
        master_call_id: Uuid,
        master_groupcall_id: Uuid,
        ring_method: &str,
        answer_method: &str,
    ) -> Result<Groupcall, RequestError>;
    async fn call_v1_groupcall_get(&self, groupcall_id: Uuid) -> Result<Groupcall, RequestError>;
    async fn call_v1_groupcall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Groupcall>, RequestError>;
    async fn call_v1_groupcall_delete(&self, groupcall_id: Uuid) -> Result<Groupcall, RequestError>;
    async fn call_v1_groupcall_hangup(&self, groupcall_id: Uuid) -> Result<Groupcall, RequestError>;

    async fn call_v1_recording_get(&self, recording_id: Uuid) -> Result<Recording, RequestError>;
    async fn call_v1_recording_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Recording>, RequestError>;
    async fn call_v1_recording_delete(&self, recording_id: Uuid) -> Result<Recording, RequestError>;
}

const RESOURCE_CALL: &str = "call/calls";
const RESOURCE_GROUPCALL: &str = "call/groupcalls";
const RESOURCE_RECORDING: &str = "call/recordings";

impl<S: Sock> RequestHandlerClient<S> {
    async fn call_toggle(
        &self,
        call_id: Uuid,
        sub: &str,
        method: RequestMethod,
        data: Option<serde_json::Value>,
    ) -> Result<(), RequestError> {
        self.request_empty(
            QueueName::Call,
            &format!("/v1/calls/{call_id}/{sub}"),
            method,
            RESOURCE_CALL,
            data,
        ).await
    }
}

#[async_trait]
impl<S: Sock> CallRequest for RequestHandlerClient<S> {
    async fn call_v1_call_create(
        &self,
        customer_id: Uuid,
        flow_id: Uuid,
        master_call_id: Uuid,
        source: &Address,
        destinations: &[Address],
        early_execution: bool,
        connect: bool,
    ) -> Result<CallCreateResult, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "flow_id": flow_id,
            "master_call_id": master_call_id,
            "source": source,
            "destinations": destinations,
            "early_execution": early_execution,
            "connect": connect,
        });
        self.request(QueueName::Call, "/v1/calls", RequestMethod::Post, RESOURCE_CALL, Some(data))
            .await
    }

    async fn call_v1_call_get(&self, call_id: Uuid) -> Result<Call, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/calls/{call_id}"),
            RequestMethod::Get,
            RESOURCE_CALL,
            None,
        ).await
    }

    async fn call_v1_call_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Call>, RequestError> {
        self.request_list(QueueName::Call, "/v1/calls", token, size, filters, RESOURCE_CALL).await
    }

    async fn call_v1_call_delete(&self, call_id: Uuid) -> Result<Call, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/calls/{call_id}"),
            RequestMethod::Delete,
            RESOURCE_CALL,
            None,
        ).await
    }

    async fn call_v1_call_hangup(&self, call_id: Uuid) -> Result<Call, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/calls/{call_id}/hangup"),
            RequestMethod::Post,
            RESOURCE_CALL,
            None,
        ).await
    }

    async fn call_v1_call_talk(
        &self,
        call_id: Uuid,
        text: &str,
        gender: &str,
        language: &str,
    ) -> Result<(), RequestError> {
        self.call_toggle(
            call_id,
            "talk",
            RequestMethod::Post,
            Some(json!({"text": text, "gender": gender, "language": language})),
        ).await
    }

    async fn call_v1_call_hold_on(&self, call_id: Uuid) -> Result<(), RequestError> {
        self.call_toggle(call_id, "hold", RequestMethod::Post, None).await
    }

    async fn call_v1_call_hold_off(&self, call_id: Uuid) -> Result<(), RequestError> {
        self.call_toggle(call_id, "hold", RequestMethod::Delete, None).await
    }

    async fn call_v1_call_mute_on(
        &self,
        call_id: Uuid,
        direction: MuteDirection,
    ) -> Result<(), RequestError> {
        self.call_toggle(
            call_id,
            "mute",
            RequestMethod::Post,
            Some(json!({"direction": direction})),
        ).await
    }

    async fn call_v1_call_mute_off(
        &self,
        call_id: Uuid,
        direction: MuteDirection,
    ) -> Result<(), RequestError> {
        self.call_toggle(
            call_id,
            "mute",
            RequestMethod::Delete,
            Some(json!({"direction": direction})),
        ).await
    }

    async fn call_v1_call_moh_on(&self, call_id: Uuid) -> Result<(), RequestError> {
        self.call_toggle(call_id, "moh", RequestMethod::Post, None).await
    }

    async fn call_v1_call_moh_off(&self, call_id: Uuid) -> Result<(), RequestError> {
        self.call_toggle(call_id, "moh", RequestMethod::Delete, None).await
    }

    async fn call_v1_call_silence_on(&self, call_id: Uuid) -> Result<(), RequestError> {
        self.call_toggle(call_id, "silence", RequestMethod::Post, None).await
    }

    async fn call_v1_call_silence_off(&self, call_id: Uuid) -> Result<(), RequestError> {
        self.call_toggle(call_id, "silence", RequestMethod::Delete, None).await
    }

    async fn call_v1_call_recording_start(
        &self,
        call_id: Uuid,
        opts: &RecordingStartOptions,
    ) -> Result<Call, RequestError> {
        let uri = format!("/v1/calls/{call_id}/recording_start");
        self.request(QueueName::Call, &uri, RequestMethod::Post, RESOURCE_CALL, to_data(opts)?)
            .await
    }

    async fn call_v1_call_recording_stop(&self, call_id: Uuid) -> Result<Call, RequestError> {
        let uri = format!("/v1/calls/{call_id}/recording_stop");
        self.request(QueueName::Call, &uri, RequestMethod::Post, RESOURCE_CALL, None).await
    }

    async fn call_v1_groupcall_create(
        &self,
        customer_id: Uuid,
        flow_id: Uuid,
        source: &Address,
        destinations: &[Address],
        master_call_id: Uuid,
        master_groupcall_id: Uuid,
        ring_method: &str,
        answer_method: &str,
    ) -> Result<Groupcall, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "flow_id": flow_id,
            "source": source,
            "destinations": destinations,
            "master_call_id": master_call_id,
            "master_groupcall_id": master_groupcall_id,
            "ring_method": ring_method,
            "answer_method": answer_method,
        });
        self.request(
            QueueName::Call,
            "/v1/groupcalls",
            RequestMethod::Post,
            RESOURCE_GROUPCALL,
            Some(data),
        ).await
    }

    async fn call_v1_groupcall_get(&self, groupcall_id: Uuid) -> Result<Groupcall, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/groupcalls/{groupcall_id}"),
            RequestMethod::Get,
            RESOURCE_GROUPCALL,
            None,
        ).await
    }

    async fn call_v1_groupcall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Groupcall>, RequestError> {
        self.request_list(
            QueueName::Call,
            "/v1/groupcalls",
            token,
            size,
            filters,
            RESOURCE_GROUPCALL,
        ).await
    }

    async fn call_v1_groupcall_delete(
        &self,
        groupcall_id: Uuid,
    ) -> Result<Groupcall, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/groupcalls/{groupcall_id}"),
            RequestMethod::Delete,
            RESOURCE_GROUPCALL,
            None,
        ).await
    }

    async fn call_v1_groupcall_hangup(
        &self,
        groupcall_id: Uuid,
    ) -> Result<Groupcall, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/groupcalls/{groupcall_id}/hangup"),
            RequestMethod::Post,
            RESOURCE_GROUPCALL,
            None,
        ).await
    }

    async fn call_v1_recording_get(&self, recording_id: Uuid) -> Result<Recording, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/recordings/{recording_id}"),
            RequestMethod::Get,
            RESOURCE_RECORDING,
            None,
        ).await
    }

    async fn call_v1_recording_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Recording>, RequestError> {
        self.request_list(
            QueueName::Call,
            "/v1/recordings",
            token,
            size,
            filters,
            RESOURCE_RECORDING,
        ).await
    }

    async fn call_v1_recording_delete(
        &self,
        recording_id: Uuid,
    ) -> Result<Recording, RequestError> {
        self.request(
            QueueName::Call,
            &format!("/v1/recordings/{recording_id}"),
            RequestMethod::Delete,
            RESOURCE_RECORDING,
            None,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn create_returns_calls_and_groupcalls() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let call_id = Uuid::new_v4();
        let groupcall_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/calls",
            json!({"calls": [{"id": call_id}], "groupcalls": [{"id": groupcall_id}]}),
        );

        let res = rh
            .call_v1_call_create(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::nil(),
                &Address::tel("+821100000001"),
                &[Address::tel("+821100000002")],
                false,
                false,
            )
            .await
            .unwrap();
        assert_eq!(res.calls[0].id, call_id);
        assert_eq!(res.groupcalls[0].id, groupcall_id);
    }

    #[tokio::test]
    async fn toggles_use_post_to_enable_and_delete_to_disable() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        let path = format!("/v1/calls/{id}/mute");
        rh.sock().on(RequestMethod::Post, &path, serde_json::Value::Null);
        rh.sock().on(RequestMethod::Delete, &path, serde_json::Value::Null);

        rh.call_v1_call_mute_on(id, MuteDirection::Both).await.unwrap();
        rh.call_v1_call_mute_off(id, MuteDirection::Both).await.unwrap();

        let sent = rh.sock().requests();
        assert_eq!(sent[0].request.method, RequestMethod::Post);
        assert_eq!(sent[1].request.method, RequestMethod::Delete);
        assert_eq!(sent[1].request.data, Some(json!({"direction": "both"})));
    }

    #[tokio::test]
    async fn recording_start_posts_options() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/calls/{id}/recording_start"),
            json!({"id": id, "status": "progressing"}),
        );

        let opts = RecordingStartOptions {
            format: "wav".into(),
            end_of_silence: 3,
            end_of_key: "#".into(),
            duration: 600,
            on_end_flow_id: Uuid::nil(),
        };
        let c = rh.call_v1_call_recording_start(id, &opts).await.unwrap();
        assert_eq!(c.id, id);

        let sent = rh.sock().requests();
        let data = sent[0].request.data.clone().unwrap();
        assert_eq!(data["format"], "wav");
        assert_eq!(data["end_of_key"], "#");
        assert_eq!(data["duration"], 600);
    }

    #[tokio::test]
    async fn hold_failure_surfaces_status() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let err = rh.call_v1_call_hold_on(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "response code: 404");
    }
}
