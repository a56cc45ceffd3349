use models::address::Address;
use models::agent::Agent;
use models::call::call::{self, Call, MuteDirection};
use models::call::groupcall::{self, Groupcall};
use models::call::recording::{self, Recording, RecordingStartOptions};
use models::flow::action::Action;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    pub(crate) async fn call_get_authorized(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<Call, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.call_v1_call_get(call_id))
            .await
    }

    /// Flow an outbound call or groupcall runs. A nil id gets a temporary
    /// flow built from `actions`.
    async fn outbound_flow_id(
        &self,
        a: &Agent,
        flow_id: Uuid,
        actions: &[Action],
    ) -> Result<Uuid, ServiceError> {
        let flow_id = if flow_id.is_nil() {
            self.flow_create_temp(a, actions).await?.id
        } else { flow_id };
        let f = self.flow_get_authorized(a, flow_id).await.log_err("could not get the flow")?;
        Ok(f.id)
    }

    /// Dial out to every destination. Returns the created calls and groupcalls.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, flow_id = %flow_id))]
    pub async fn call_create(
        &self,
        a: &Agent,
        flow_id: Uuid,
        actions: &[Action],
        source: &Address,
        destinations: &[Address],
    ) -> Result<(Vec<call::WebhookMessage>, Vec<groupcall::WebhookMessage>), ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a call")?;
        let flow_id = self.outbound_flow_id(a, flow_id, actions).await?;

        let res = self.req_handler
            .call_v1_call_create(
                a.customer_id,
                flow_id,
                Uuid::nil(),
                source,
                destinations,
                false,
                false,
            )
            .await
            .log_err("could not create calls")?;
        info!(calls = res.calls.len(), groupcalls = res.groupcalls.len(), "calls_created");
        Ok((
            res.calls.iter().map(Call::convert_webhook_message).collect(),
            res.groupcalls.iter().map(Groupcall::convert_webhook_message).collect(),
        ))
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_get(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<call::WebhookMessage, ServiceError> {
        let c = self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        Ok(c.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn call_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<call::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list calls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .call_v1_call_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list calls")?;
        Ok(res.iter().map(Call::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_delete(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<call::WebhookMessage, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.call_v1_call_get(call_id))
            .await
            .log_err("could not get the call")?;
        let c = self.req_handler
            .call_v1_call_delete(call_id)
            .await
            .log_err("could not delete the call")?;
        info!(call_id = %c.id, "call_deleted");
        Ok(c.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_hangup(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<call::WebhookMessage, ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        let c = self.req_handler
            .call_v1_call_hangup(call_id)
            .await
            .log_err("could not hang up the call")?;
        info!(call_id = %c.id, "call_hungup");
        Ok(c.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_talk(
        &self,
        a: &Agent,
        call_id: Uuid,
        text: &str,
        gender: &str,
        language: &str,
    ) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler
            .call_v1_call_talk(call_id, text, gender, language)
            .await
            .log_err("could not talk to the call")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_hold_on(&self, a: &Agent, call_id: Uuid) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler.call_v1_call_hold_on(call_id).await.log_err("could not hold the call")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_hold_off(&self, a: &Agent, call_id: Uuid) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler.call_v1_call_hold_off(call_id).await.log_err("could not unhold the call")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_mute_on(
        &self,
        a: &Agent,
        call_id: Uuid,
        direction: MuteDirection,
    ) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler
            .call_v1_call_mute_on(call_id, direction)
            .await
            .log_err("could not mute the call")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_mute_off(
        &self,
        a: &Agent,
        call_id: Uuid,
        direction: MuteDirection,
    ) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler
            .call_v1_call_mute_off(call_id, direction)
            .await
            .log_err("could not unmute the call")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_moh_on(&self, a: &Agent, call_id: Uuid) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler.call_v1_call_moh_on(call_id).await.log_err("could not start music on hold")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_moh_off(&self, a: &Agent, call_id: Uuid) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler.call_v1_call_moh_off(call_id).await.log_err("could not stop music on hold")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_silence_on(&self, a: &Agent, call_id: Uuid) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler
            .call_v1_call_silence_on(call_id)
            .await
            .log_err("could not silence the call")
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_silence_off(&self, a: &Agent, call_id: Uuid) -> Result<(), ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        self.req_handler
            .call_v1_call_silence_off(call_id)
            .await
            .log_err("could not unsilence the call")
    }

    /// Start recording the call.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_recording_start(
        &self,
        a: &Agent,
        call_id: Uuid,
        opts: &RecordingStartOptions,
    ) -> Result<call::WebhookMessage, ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        let c = self.req_handler
            .call_v1_call_recording_start(call_id, opts)
            .await
            .log_err("could not start the recording")?;
        info!(call_id = %c.id, recording_id = %c.recording_id, "call_recording_started");
        Ok(c.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, call_id = %call_id))]
    pub async fn call_recording_stop(
        &self,
        a: &Agent,
        call_id: Uuid,
    ) -> Result<call::WebhookMessage, ServiceError> {
        self.call_get_authorized(a, call_id).await.log_err("could not get the call")?;
        let c = self.req_handler
            .call_v1_call_recording_stop(call_id)
            .await
            .log_err("could not stop the recording")?;
        info!(call_id = %c.id, "call_recording_stopped");
        Ok(c.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn groupcall_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<groupcall::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list groupcalls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .call_v1_groupcall_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list groupcalls")?;
        Ok(res.iter().map(Groupcall::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, groupcall_id = %groupcall_id))]
    pub async fn groupcall_get(
        &self,
        a: &Agent,
        groupcall_id: Uuid,
    ) -> Result<groupcall::WebhookMessage, ServiceError> {
        let res = Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.call_v1_groupcall_get(groupcall_id),
        ).await.log_err("could not get the groupcall")?;
        Ok(res.convert_webhook_message())
    }

    /// Ring several destinations at once.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(customer_id = %a.customer_id, flow_id = %flow_id))]
    pub async fn groupcall_create(
        &self,
        a: &Agent,
        source: &Address,
        destinations: &[Address],
        flow_id: Uuid,
        actions: &[Action],
        ring_method: &str,
        answer_method: &str,
    ) -> Result<groupcall::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a groupcall")?;
        let flow_id = self.outbound_flow_id(a, flow_id, actions).await?;

        let res = self.req_handler
            .call_v1_groupcall_create(
                a.customer_id,
                flow_id,
                source,
                destinations,
                Uuid::nil(),
                Uuid::nil(),
                ring_method,
                answer_method,
            )
            .await
            .log_err("could not create a groupcall")?;
        info!(groupcall_id = %res.id, "groupcall_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, groupcall_id = %groupcall_id))]
    pub async fn groupcall_hangup(
        &self,
        a: &Agent,
        groupcall_id: Uuid,
    ) -> Result<groupcall::WebhookMessage, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.call_v1_groupcall_get(groupcall_id),
        ).await.log_err("could not get the groupcall")?;
        let res = self.req_handler
            .call_v1_groupcall_hangup(groupcall_id)
            .await
            .log_err("could not hang up the groupcall")?;
        info!(groupcall_id = %res.id, "groupcall_hungup");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, groupcall_id = %groupcall_id))]
    pub async fn groupcall_delete(
        &self,
        a: &Agent,
        groupcall_id: Uuid,
    ) -> Result<groupcall::WebhookMessage, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.call_v1_groupcall_get(groupcall_id),
        ).await.log_err("could not get the groupcall")?;
        let res = self.req_handler
            .call_v1_groupcall_delete(groupcall_id)
            .await
            .log_err("could not delete the groupcall")?;
        info!(groupcall_id = %res.id, "groupcall_deleted");
        Ok(res.convert_webhook_message())
    }

    async fn recording_get_authorized(
        &self,
        a: &Agent,
        recording_id: Uuid,
    ) -> Result<Recording, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.call_v1_recording_get(recording_id),
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, recording_id = %recording_id))]
    pub async fn recording_get(
        &self,
        a: &Agent,
        recording_id: Uuid,
    ) -> Result<recording::WebhookMessage, ServiceError> {
        let res = self.recording_get_authorized(a, recording_id)
            .await
            .log_err("could not get the recording")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn recording_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<recording::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list recordings")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .call_v1_recording_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list recordings")?;
        Ok(res.iter().map(Recording::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, recording_id = %recording_id))]
    pub async fn recording_delete(
        &self,
        a: &Agent,
        recording_id: Uuid,
    ) -> Result<recording::WebhookMessage, ServiceError> {
        self.recording_get_authorized(a, recording_id)
            .await
            .log_err("could not get the recording")?;
        let res = self.req_handler
            .call_v1_recording_delete(recording_id)
            .await
            .log_err("could not delete the recording")?;
        info!(recording_id = %res.id, "recording_deleted");
        Ok(res.convert_webhook_message())
    }

    /// Time-limited download link of a recording's media.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, recording_id = %recording_id))]
    pub async fn recordingfile_get(
        &self,
        a: &Agent,
        recording_id: Uuid,
    ) -> Result<String, ServiceError> {
        self.recording_get_authorized(a, recording_id)
            .await
            .log_err("could not get the recording")?;
        let file = self.req_handler
            .storage_v1_recording_get(recording_id)
            .await
            .log_err("could not get the recording file")?;
        Ok(file.download_uri)
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::RequestMethod;
    use serde_json::json;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn call_create_without_flow_builds_temp_flow() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let flow_id = Uuid::new_v4();
        let call_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/flows",
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/flows/{flow_id}"),
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/calls",
            json!({
                "calls": [{"id": call_id, "customer_id": a.customer_id, "flow_id": flow_id}],
                "groupcalls": []
            }),
        );

        let actions = vec![Action::new("talk", json!({"text": "hello"}))];
        let (calls, groupcalls) = h.call_create(
            &a,
            Uuid::nil(),
            &actions,
            &Address::tel("+821100000001"),
            &[Address::tel("+821100000002")],
        ).await.unwrap();
        assert_eq!(calls[0].id, call_id);
        assert!(groupcalls.is_empty());

        let flow = rh.sock().find(RequestMethod::Post, "/v1/flows").unwrap().request.data.unwrap();
        assert_eq!(flow["name"], "tmp");
        assert_eq!(flow["detail"], "tmp outbound flow");
        assert_eq!(flow["persist"], json!(false));
        let call = rh.sock().find(RequestMethod::Post, "/v1/calls").unwrap().request.data.unwrap();
        assert_eq!(call["flow_id"], json!(flow_id));
    }

    #[tokio::test]
    async fn call_create_with_foreign_flow_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let flow_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/flows/{flow_id}"),
            json!({"id": flow_id, "customer_id": Uuid::new_v4()}),
        );

        let res = h.call_create(
            &a,
            flow_id,
            &[],
            &Address::tel("+821100000001"),
            &[Address::tel("+821100000002")],
        ).await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn call_create_without_flow_or_actions_still_builds_temp_flow() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let flow_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/flows",
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/flows/{flow_id}"),
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(RequestMethod::Post, "/v1/calls", json!({"calls": [], "groupcalls": []}));

        let (calls, _) = h.call_create(&a, Uuid::nil(), &[], &Address::tel("+821100000001"), &[])
            .await
            .unwrap();
        assert!(calls.is_empty());

        let flow = rh.sock().find(RequestMethod::Post, "/v1/flows").unwrap().request.data.unwrap();
        assert_eq!(flow["actions"], json!([]));
        let call = rh.sock().find(RequestMethod::Post, "/v1/calls").unwrap().request.data.unwrap();
        assert_eq!(call["flow_id"], json!(flow_id));
    }

    #[tokio::test]
    async fn groupcall_create_without_flow_builds_temp_flow() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let flow_id = Uuid::new_v4();
        let groupcall_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/flows",
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/flows/{flow_id}"),
            json!({"id": flow_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/groupcalls",
            json!({"id": groupcall_id, "customer_id": a.customer_id, "flow_id": flow_id}),
        );

        let src = Address::tel("+821100000001");
        let dst = [Address::tel("+821100000002"), Address::tel("+821100000003")];
        let res = h.groupcall_create(&a, &src, &dst, Uuid::nil(), &[], "ringall", "hangup_others")
            .await
            .unwrap();
        assert_eq!(res.id, groupcall_id);

        let sent = rh.sock()
            .find(RequestMethod::Post, "/v1/groupcalls")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(sent["flow_id"], json!(flow_id));
    }

    #[tokio::test]
    async fn agent_only_caller_cannot_touch_calls() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        assert!(matches!(h.call_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.call_hangup(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.call_hold_on(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.call_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.groupcall_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn manager_controls_own_calls() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().reply(
            RequestMethod::Post,
            &format!("/v1/calls/{id}/hold"),
            requesthandler::Response::json(200, serde_json::Value::Null),
        );

        h.call_hold_on(&a, id).await.unwrap();
        assert_eq!(rh.sock().mutations().len(), 1);
    }

    #[tokio::test]
    async fn call_list_treats_null_reply_as_empty() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        rh.sock().on(RequestMethod::Get, "/v1/calls", serde_json::Value::Null);

        assert!(h.call_list(&a, 10, "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recording_start_and_stop_on_own_call() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        let recording_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/calls/{id}/recording_start"),
            json!({"id": id, "customer_id": a.customer_id, "recording_id": recording_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/calls/{id}/recording_stop"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        let opts = RecordingStartOptions {
            format: "wav".into(),
            duration: 60,
            ..Default::default()
        };
        let c = h.call_recording_start(&a, id, &opts).await.unwrap();
        assert_eq!(c.recording_id, recording_id);
        h.call_recording_stop(&a, id).await.unwrap();
        assert_eq!(rh.sock().mutations().len(), 2);
    }

    #[tokio::test]
    async fn recording_start_on_foreign_call_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        let res = h.call_recording_start(&a, id, &RecordingStartOptions::default()).await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn recordingfile_returns_download_link() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/recordings/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        // call-manager and storage-manager share the path; the reply is scripted once per request.
        let link = "https://storage.example.com/recording.wav";
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/recordings/{id}"),
            json!({"id": id, "customer_id": a.customer_id, "download_uri": link}),
        );

        assert_eq!(h.recordingfile_get(&a, id).await.unwrap(), link);
        let queues: Vec<_> = rh.sock().requests().into_iter().map(|r| r.queue).collect();
        assert_eq!(
            queues,
            vec!["bin-manager.call-manager.request", "bin-manager.storage-manager.request"]
        );
    }
}
