use async_trait::async_trait;
use models::transcribe::transcribe::Transcribe;
use models::transcribe::transcript::Transcript;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// transcribe-manager RPCs.
#[async_trait]
pub trait TranscribeRequest: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn transcribe_v1_transcribe_start(
        &self,
        customer_id: Uuid,
        activeflow_id: Uuid,
        on_end_flow_id: Uuid,
        reference_type: &str,
        reference_id: Uuid,
        language: &str,
        direction: &str,
    ) -> Result<Transcribe, RequestError>;
    async fn transcribe_v1_transcribe_get(
        &self,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, RequestError>;
    async fn transcribe_v1_transcribe_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Transcribe>, RequestError>;
    async fn transcribe_v1_transcribe_stop(
        &self,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, RequestError>;
    async fn transcribe_v1_transcribe_delete(
        &self,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, RequestError>;

    async fn transcribe_v1_transcript_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Transcript>, RequestError>;
}

const RESOURCE_TRANSCRIBE: &str = "transcribe/transcribes";
const RESOURCE_TRANSCRIPT: &str = "transcribe/transcripts";

#[async_trait]
impl<S: Sock> TranscribeRequest for RequestHandlerClient<S> {
    async fn transcribe_v1_transcribe_start(
        &self,
        customer_id: Uuid,
        activeflow_id: Uuid,
        on_end_flow_id: Uuid,
        reference_type: &str,
        reference_id: Uuid,
        language: &str,
        direction: &str,
    ) -> Result<Transcribe, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "activeflow_id": activeflow_id,
            "on_end_flow_id": on_end_flow_id,
            "reference_type": reference_type,
            "reference_id": reference_id,
            "language": language,
            "direction": direction,
        });
        self.request(
            QueueName::Transcribe,
            "/v1/transcribes",
            RequestMethod::Post,
            RESOURCE_TRANSCRIBE,
            Some(data),
        ).await
    }

    async fn transcribe_v1_transcribe_get(
        &self,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, RequestError> {
        self.request(
            QueueName::Transcribe,
            &format!("/v1/transcribes/{transcribe_id}"),
            RequestMethod::Get,
            RESOURCE_TRANSCRIBE,
            None,
        ).await
    }

    async fn transcribe_v1_transcribe_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Transcribe>, RequestError> {
        self.request_list(
            QueueName::Transcribe,
            "/v1/transcribes",
            token,
            size,
            filters,
            RESOURCE_TRANSCRIBE,
        ).await
    }

    async fn transcribe_v1_transcribe_stop(
        &self,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, RequestError> {
        self.request(
            QueueName::Transcribe,
            &format!("/v1/transcribes/{transcribe_id}/stop"),
            RequestMethod::Post,
            RESOURCE_TRANSCRIBE,
            None,
        ).await
    }

    async fn transcribe_v1_transcribe_delete(
        &self,
        transcribe_id: Uuid,
    ) -> Result<Transcribe, RequestError> {
        self.request(
            QueueName::Transcribe,
            &format!("/v1/transcribes/{transcribe_id}"),
            RequestMethod::Delete,
            RESOURCE_TRANSCRIBE,
            None,
        ).await
    }

    async fn transcribe_v1_transcript_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Transcript>, RequestError> {
        self.request_list(
            QueueName::Transcribe,
            "/v1/transcripts",
            token,
            size,
            filters,
            RESOURCE_TRANSCRIPT,
        ).await
    }
}
