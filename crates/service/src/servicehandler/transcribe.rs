use models::agent::Agent;
use models::transcribe::transcribe::{self, Transcribe};
use models::transcribe::transcript::{self, Transcript};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

pub const REFERENCE_TYPE_CALL: &str = "call";
pub const REFERENCE_TYPE_CONFERENCE: &str = "conference";

impl ServiceHandler {
    async fn transcribe_get_authorized(
        &self,
        a: &Agent,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.transcribe_v1_transcribe_get(transcribe_id),
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, transcribe_id = %transcribe_id))]
    pub async fn transcribe_get(
        &self,
        a: &Agent,
        transcribe_id: Uuid,
    ) -> Result<transcribe::WebhookMessage, ServiceError> {
        let res = self.transcribe_get_authorized(a, transcribe_id)
            .await
            .log_err("could not get the transcribe")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn transcribe_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<transcribe::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list transcribes")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .transcribe_v1_transcribe_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list transcribes")?;
        Ok(res.iter().map(Transcribe::convert_webhook_message).collect())
    }

    /// Start transcribing a live call or conference.
    ///
    /// The referenced resource is authorized first, so a caller can only
    /// transcribe media of its own customer.
    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            reference_type = %reference_type,
            reference_id = %reference_id,
        )
    )]
    pub async fn transcribe_start(
        &self,
        a: &Agent,
        reference_type: &str,
        reference_id: Uuid,
        language: &str,
        direction: &str,
        on_end_flow_id: Uuid,
    ) -> Result<transcribe::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to start a transcribe")?;
        match reference_type {
            REFERENCE_TYPE_CALL => {
                self.call_get_authorized(a, reference_id).await.log_err("could not get the call")?;
            }
            REFERENCE_TYPE_CONFERENCE => {
                self.conference_get_authorized(a, reference_id)
                    .await
                    .log_err("could not get the conference")?;
            }
            other => {
                return Err(ServiceError::Validation(format!("unsupported reference type: {other}")))
                    .log_err("could not start the transcribe");
            }
        }
        if !on_end_flow_id.is_nil() {
            self.flow_get_authorized(a, on_end_flow_id)
                .await
                .log_err("could not get the on-end flow")?;
        }

        let res = self
            .req_handler
            .transcribe_v1_transcribe_start(
                a.customer_id,
                Uuid::nil(),
                on_end_flow_id,
                reference_type,
                reference_id,
                language,
                direction,
            )
            .await
            .log_err("could not start the transcribe")?;
        info!(transcribe_id = %res.id, "transcribe_started");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, transcribe_id = %transcribe_id))]
    pub async fn transcribe_stop(
        &self,
        a: &Agent,
        transcribe_id: Uuid,
    ) -> Result<transcribe::WebhookMessage, ServiceError> {
        self.transcribe_get_authorized(a, transcribe_id)
            .await
            .log_err("could not get the transcribe")?;
        let res = self.req_handler
            .transcribe_v1_transcribe_stop(transcribe_id)
            .await
            .log_err("could not stop the transcribe")?;
        info!(transcribe_id = %res.id, "transcribe_stopped");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, transcribe_id = %transcribe_id))]
    pub async fn transcribe_delete(
        &self,
        a: &Agent,
        transcribe_id: Uuid,
    ) -> Result<transcribe::WebhookMessage, ServiceError> {
        self.transcribe_get_authorized(a, transcribe_id)
            .await
            .log_err("could not get the transcribe")?;
        let res = self.req_handler
            .transcribe_v1_transcribe_delete(transcribe_id)
            .await
            .log_err("could not delete the transcribe")?;
        info!(transcribe_id = %res.id, "transcribe_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, transcribe_id = %transcribe_id))]
    pub async fn transcript_list(
        &self,
        a: &Agent,
        transcribe_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<transcript::WebhookMessage>, ServiceError> {
        self.transcribe_get_authorized(a, transcribe_id)
            .await
            .log_err("could not get the transcribe")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("transcribe_id".into(), json!(transcribe_id));
        let res = self.req_handler
            .transcribe_v1_transcript_list(&token, size, &filters)
            .await
            .log_err("could not list transcripts")?;
        Ok(res.iter().map(Transcript::convert_webhook_message).collect())
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::RequestMethod;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn start_on_foreign_call_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let call_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/calls/{call_id}"),
            json!({"id": call_id, "customer_id": Uuid::new_v4()}),
        );

        let err = h.transcribe_start(&a, REFERENCE_TYPE_CALL, call_id, "en-US", "both", Uuid::nil())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoPermission));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn start_on_own_conference() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let conference_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/conferences/{conference_id}"),
            json!({"id": conference_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/transcribes",
            json!({
                "id": Uuid::new_v4(),
                "customer_id": a.customer_id,
                "reference_type": "conference",
                "reference_id": conference_id
            }),
        );

        let res = h.transcribe_start(
            &a,
            REFERENCE_TYPE_CONFERENCE,
            conference_id,
            "en-US",
            "both",
            Uuid::nil(),
        ).await.unwrap();
        assert_eq!(res.reference_id, conference_id);
    }

    #[tokio::test]
    async fn unknown_reference_type_is_rejected() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);

        let err = h.transcribe_start(&a, "recording", Uuid::new_v4(), "en-US", "both", Uuid::nil())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(rh.sock().requests().is_empty());
    }

    #[tokio::test]
    async fn transcripts_filtered_by_transcribe() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/transcribes/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            "/v1/transcripts",
            json!([{"id": Uuid::new_v4(), "transcribe_id": id, "message": "hello"}]),
        );

        let res = h.transcript_list(&a, id, 10, "").await.unwrap();
        assert_eq!(res[0].message, "hello");
        let data = rh.sock()
            .find(RequestMethod::Get, "/v1/transcripts")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(data["transcribe_id"], json!(id));
    }
}
