use async_trait::async_trait;
use models::outdial::outdial::Outdial;
use models::outdial::outdialtarget::{OutdialTarget, TargetInfo};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::{list_uri, to_data};
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// outdial-manager RPCs.
#[async_trait]
pub trait OutdialRequest: Send + Sync {
    async fn outdial_v1_outdial_create(
        &self,
        customer_id: Uuid,
        campaign_id: Uuid,
        name: &str,
        detail: &str,
        data: &str,
    ) -> Result<Outdial, RequestError>;
    async fn outdial_v1_outdial_get(&self, outdial_id: Uuid) -> Result<Outdial, RequestError>;
    async fn outdial_v1_outdial_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Outdial>, RequestError>;
    async fn outdial_v1_outdial_delete(&self, outdial_id: Uuid) -> Result<Outdial, RequestError>;
    async fn outdial_v1_outdial_update_basic_info(
        &self,
        outdial_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Outdial, RequestError>;
    async fn outdial_v1_outdial_update_campaign_id(
        &self,
        outdial_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Outdial, RequestError>;
    async fn outdial_v1_outdial_update_data(
        &self,
        outdial_id: Uuid,
        data: &str,
    ) -> Result<Outdial, RequestError>;

    async fn outdial_v1_outdialtarget_create(
        &self,
        outdial_id: Uuid,
        info: &TargetInfo,
    ) -> Result<OutdialTarget, RequestError>;
    async fn outdial_v1_outdialtarget_get(
        &self,
        outdialtarget_id: Uuid,
    ) -> Result<OutdialTarget, RequestError>;
    async fn outdial_v1_outdialtarget_delete(
        &self,
        outdialtarget_id: Uuid,
    ) -> Result<OutdialTarget, RequestError>;
    async fn outdial_v1_outdialtarget_list_by_outdial_id(
        &self,
        outdial_id: Uuid,
        token: &str,
        size: u64,
    ) -> Result<Vec<OutdialTarget>, RequestError>;
}

const RESOURCE_OUTDIAL: &str = "outdial/outdials";
const RESOURCE_OUTDIALTARGET: &str = "outdial/outdialtargets";

#[async_trait]
impl<S: Sock> OutdialRequest for RequestHandlerClient<S> {
    async fn outdial_v1_outdial_create(
        &self,
        customer_id: Uuid,
        campaign_id: Uuid,
        name: &str,
        detail: &str,
        data: &str,
    ) -> Result<Outdial, RequestError> {
        let body = json!({
            "customer_id": customer_id,
            "campaign_id": campaign_id,
            "name": name,
            "detail": detail,
            "data": data
        });
        self.request(
            QueueName::Outdial,
            "/v1/outdials",
            RequestMethod::Post,
            RESOURCE_OUTDIAL,
            Some(body),
        ).await
    }

    async fn outdial_v1_outdial_get(&self, outdial_id: Uuid) -> Result<Outdial, RequestError> {
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdials/{outdial_id}"),
            RequestMethod::Get,
            RESOURCE_OUTDIAL,
            None,
        ).await
    }

    async fn outdial_v1_outdial_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Outdial>, RequestError> {
        self.request_list(
            QueueName::Outdial,
            "/v1/outdials",
            token,
            size,
            filters,
            RESOURCE_OUTDIAL,
        ).await
    }

    async fn outdial_v1_outdial_delete(&self, outdial_id: Uuid) -> Result<Outdial, RequestError> {
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdials/{outdial_id}"),
            RequestMethod::Delete,
            RESOURCE_OUTDIAL,
            None,
        ).await
    }

    async fn outdial_v1_outdial_update_basic_info(
        &self,
        outdial_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Outdial, RequestError> {
        let body = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdials/{outdial_id}"),
            RequestMethod::Put,
            RESOURCE_OUTDIAL,
            Some(body),
        ).await
    }

    async fn outdial_v1_outdial_update_campaign_id(
        &self,
        outdial_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<Outdial, RequestError> {
        let body = json!({"campaign_id": campaign_id});
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdials/{outdial_id}/campaign_id"),
            RequestMethod::Put,
            RESOURCE_OUTDIAL,
            Some(body),
        ).await
    }

    async fn outdial_v1_outdial_update_data(
        &self,
        outdial_id: Uuid,
        data: &str,
    ) -> Result<Outdial, RequestError> {
        let body = json!({"data": data});
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdials/{outdial_id}/data"),
            RequestMethod::Put,
            RESOURCE_OUTDIAL,
            Some(body),
        ).await
    }

    async fn outdial_v1_outdialtarget_create(
        &self,
        outdial_id: Uuid,
        info: &TargetInfo,
    ) -> Result<OutdialTarget, RequestError> {
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdials/{outdial_id}/targets"),
            RequestMethod::Post,
            RESOURCE_OUTDIALTARGET,
            to_data(info)?,
        ).await
    }

    async fn outdial_v1_outdialtarget_get(
        &self,
        outdialtarget_id: Uuid,
    ) -> Result<OutdialTarget, RequestError> {
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdialtargets/{outdialtarget_id}"),
            RequestMethod::Get,
            RESOURCE_OUTDIALTARGET,
            None,
        ).await
    }

    async fn outdial_v1_outdialtarget_delete(
        &self,
        outdialtarget_id: Uuid,
    ) -> Result<OutdialTarget, RequestError> {
        self.request(
            QueueName::Outdial,
            &format!("/v1/outdialtargets/{outdialtarget_id}"),
            RequestMethod::Delete,
            RESOURCE_OUTDIALTARGET,
            None,
        ).await
    }

    async fn outdial_v1_outdialtarget_list_by_outdial_id(
        &self,
        outdial_id: Uuid,
        token: &str,
        size: u64,
    ) -> Result<Vec<OutdialTarget>, RequestError> {
        let uri = list_uri(&format!("/v1/outdials/{outdial_id}/targets"), token, size);
        self.request(QueueName::Outdial, &uri, RequestMethod::Get, RESOURCE_OUTDIALTARGET, None)
            .await
    }
}
