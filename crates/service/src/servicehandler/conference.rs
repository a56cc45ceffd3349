use std::collections::HashMap;

use models::agent::Agent;
use models::conference::conference::{self, Conference};
use models::conference::conferencecall::{self, Conferencecall};
use models::flow::action::Action;
use requesthandler::conference::ConferenceCreate;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    pub(crate) async fn conference_get_authorized(
        &self,
        a: &Agent,
        conference_id: Uuid,
    ) -> Result<Conference, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.conference_v1_conference_get(conference_id),
        ).await
    }

    async fn conferencecall_get_authorized(
        &self,
        a: &Agent,
        conferencecall_id: Uuid,
    ) -> Result<Conferencecall, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.conference_v1_conferencecall_get(conferencecall_id),
        ).await
    }

    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn conference_create(
        &self,
        a: &Agent,
        conference_type: &str,
        name: &str,
        detail: &str,
        timeout: i32,
        data: HashMap<String, Value>,
        pre_actions: &[Action],
        post_actions: &[Action],
    ) -> Result<conference::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a conference")?;
        let req = ConferenceCreate {
            customer_id: a.customer_id,
            conference_type: conference_type.to_string(),
            name: name.to_string(),
            detail: detail.to_string(),
            timeout,
            data,
            pre_actions: pre_actions.to_vec(),
            post_actions: post_actions.to_vec(),
        };
        let res = self.req_handler
            .conference_v1_conference_create(&req)
            .await
            .log_err("could not create a conference")?;
        info!(conference_id = %res.id, "conference_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_delete(
        &self,
        a: &Agent,
        conference_id: Uuid,
    ) -> Result<conference::WebhookMessage, ServiceError> {
        self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        let res = self.req_handler
            .conference_v1_conference_delete(conference_id)
            .await
            .log_err("could not delete the conference")?;
        info!(conference_id = %res.id, "conference_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_get(
        &self,
        a: &Agent,
        conference_id: Uuid,
    ) -> Result<conference::WebhookMessage, ServiceError> {
        let res = self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn conference_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<conference::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list conferences")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .conference_v1_conference_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list conferences")?;
        Ok(res.iter().map(Conference::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_recording_start(
        &self,
        a: &Agent,
        conference_id: Uuid,
    ) -> Result<conference::WebhookMessage, ServiceError> {
        self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        let res = self.req_handler
            .conference_v1_conference_recording_start(conference_id)
            .await
            .log_err("could not start the recording")?;
        info!(
            conference_id = %res.id,
            recording_id = %res.recording_id,
            "conference_recording_started"
        );
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_recording_stop(
        &self,
        a: &Agent,
        conference_id: Uuid,
    ) -> Result<conference::WebhookMessage, ServiceError> {
        self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        let res = self.req_handler
            .conference_v1_conference_recording_stop(conference_id)
            .await
            .log_err("could not stop the recording")?;
        info!(conference_id = %res.id, "conference_recording_stopped");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_transcribe_start(
        &self,
        a: &Agent,
        conference_id: Uuid,
        language: &str,
    ) -> Result<conference::WebhookMessage, ServiceError> {
        self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        let res = self.req_handler
            .conference_v1_conference_transcribe_start(conference_id, language)
            .await
            .log_err("could not start the transcribe")?;
        info!(
            conference_id = %res.id,
            transcribe_id = %res.transcribe_id,
            "conference_transcribe_started"
        );
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_transcribe_stop(
        &self,
        a: &Agent,
        conference_id: Uuid,
    ) -> Result<conference::WebhookMessage, ServiceError> {
        self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        let res = self.req_handler
            .conference_v1_conference_transcribe_stop(conference_id)
            .await
            .log_err("could not stop the transcribe")?;
        info!(conference_id = %res.id, "conference_transcribe_stopped");
        Ok(res.convert_webhook_message())
    }

    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(customer_id = %a.customer_id, conference_id = %conference_id))]
    pub async fn conference_update(
        &self,
        a: &Agent,
        conference_id: Uuid,
        name: &str,
        detail: &str,
        timeout: i32,
        pre_actions: &[Action],
        post_actions: &[Action],
    ) -> Result<conference::WebhookMessage, ServiceError> {
        self.conference_get_authorized(a, conference_id)
            .await
            .log_err("could not get the conference")?;
        let res = self.req_handler
            .conference_v1_conference_update(
                conference_id,
                name,
                detail,
                timeout,
                pre_actions,
                post_actions,
            )
            .await
            .log_err("could not update the conference")?;
        info!(conference_id = %res.id, "conference_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conferencecall_id = %conferencecall_id)
    )]
    pub async fn conferencecall_get(
        &self,
        a: &Agent,
        conferencecall_id: Uuid,
    ) -> Result<conferencecall::WebhookMessage, ServiceError> {
        let res = self.conferencecall_get_authorized(a, conferencecall_id)
            .await
            .log_err("could not get the conferencecall")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn conferencecall_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<conferencecall::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list conferencecalls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .conference_v1_conferencecall_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list conferencecalls")?;
        Ok(res.iter().map(Conferencecall::convert_webhook_message).collect())
    }

    /// Remove a participant from its conference.
    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conferencecall_id = %conferencecall_id)
    )]
    pub async fn conferencecall_kick(
        &self,
        a: &Agent,
        conferencecall_id: Uuid,
    ) -> Result<conferencecall::WebhookMessage, ServiceError> {
        self.conferencecall_get_authorized(a, conferencecall_id)
            .await
            .log_err("could not get the conferencecall")?;
        let res = self.req_handler
            .conference_v1_conferencecall_kick(conferencecall_id)
            .await
            .log_err("could not kick the conferencecall")?;
        info!(conferencecall_id = %res.id, "conferencecall_kicked");
        Ok(res.convert_webhook_message())
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
    async fn kick_of_foreign_conferencecall_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/conferencecalls/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(h.conferencecall_kick(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn conference_create_sends_type() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        rh.sock().on(
            RequestMethod::Post,
            "/v1/conferences",
            json!({"id": Uuid::new_v4(), "customer_id": a.customer_id, "type": "conference"}),
        );

        let res = h.conference_create(&a, "conference", "standup", "", 0, HashMap::new(), &[], &[])
            .await
            .unwrap();
        assert_eq!(res.conference_type, "conference");
        let sent = rh.sock()
            .find(RequestMethod::Post, "/v1/conferences")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(sent["customer_id"], json!(a.customer_id));
        assert_eq!(sent["name"], "standup");
    }
}
