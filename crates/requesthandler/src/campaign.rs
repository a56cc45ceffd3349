use async_trait::async_trait;
use models::address::Address;
use models::campaign::campaign::{Campaign, Status};
use models::campaign::campaigncall::Campaigncall;
use models::campaign::outplan::Outplan;
use models::flow::action::Action;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::to_data;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// Campaign creation payload. Resource ids may be nil.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignCreate {
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub campaign_type: String,
    pub name: String,
    pub detail: String,
    pub actions: Vec<Action>,
    pub service_level: i32,
    pub end_handle: String,
    pub outplan_id: Uuid,
    pub outdial_id: Uuid,
    pub queue_id: Uuid,
    pub next_campaign_id: Uuid,
}

/// campaign-manager RPCs.
#[async_trait]
pub trait CampaignRequest: Send + Sync {
    async fn campaign_v1_campaign_create(
        &self,
        req: &CampaignCreate,
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_get(&self, campaign_id: Uuid) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Campaign>, RequestError>;
    async fn campaign_v1_campaign_delete(
        &self,
        campaign_id: Uuid,
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_update_basic_info(
        &self,
        campaign_id: Uuid,
        name: &str,
        detail: &str,
        campaign_type: &str,
        service_level: i32,
        end_handle: &str,
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_update_status(
        &self,
        campaign_id: Uuid,
        status: Status,
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_update_service_level(
        &self,
        campaign_id: Uuid,
        service_level: i32,
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_update_actions(
        &self,
        campaign_id: Uuid,
        actions: &[Action],
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_update_resource_info(
        &self,
        campaign_id: Uuid,
        outplan_id: Uuid,
        outdial_id: Uuid,
        queue_id: Uuid,
        next_campaign_id: Uuid,
    ) -> Result<Campaign, RequestError>;
    async fn campaign_v1_campaign_update_next_campaign_id(
        &self,
        campaign_id: Uuid,
        next_campaign_id: Uuid,
    ) -> Result<Campaign, RequestError>;

    async fn campaign_v1_campaigncall_get(
        &self,
        campaigncall_id: Uuid,
    ) -> Result<Campaigncall, RequestError>;
    async fn campaign_v1_campaigncall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Campaigncall>, RequestError>;
    async fn campaign_v1_campaigncall_delete(
        &self,
        campaigncall_id: Uuid,
    ) -> Result<Campaigncall, RequestError>;

    async fn campaign_v1_outplan_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        source: &Address,
        dial_timeout: i32,
        try_interval: i32,
    ) -> Result<Outplan, RequestError>;
    async fn campaign_v1_outplan_get(&self, outplan_id: Uuid) -> Result<Outplan, RequestError>;
    async fn campaign_v1_outplan_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Outplan>, RequestError>;
    async fn campaign_v1_outplan_delete(&self, outplan_id: Uuid) -> Result<Outplan, RequestError>;
    async fn campaign_v1_outplan_update_basic_info(
        &self,
        outplan_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Outplan, RequestError>;
    async fn campaign_v1_outplan_update_dial_info(
        &self,
        outplan_id: Uuid,
        source: &Address,
        dial_timeout: i32,
        try_interval: i32,
    ) -> Result<Outplan, RequestError>;
}

const RESOURCE_CAMPAIGN: &str = "campaign/campaigns";
const RESOURCE_CAMPAIGNCALL: &str = "campaign/campaigncalls";
const RESOURCE_OUTPLAN: &str = "campaign/outplans";

#[async_trait]
impl<S: Sock> CampaignRequest for RequestHandlerClient<S> {
    async fn campaign_v1_campaign_create(
        &self,
        req: &CampaignCreate,
    ) -> Result<Campaign, RequestError> {
        self.request(
            QueueName::Campaign,
            "/v1/campaigns",
            RequestMethod::Post,
            RESOURCE_CAMPAIGN,
            to_data(req)?,
        ).await
    }

    async fn campaign_v1_campaign_get(&self, campaign_id: Uuid) -> Result<Campaign, RequestError> {
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}"),
            RequestMethod::Get,
            RESOURCE_CAMPAIGN,
            None,
        ).await
    }

    async fn campaign_v1_campaign_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Campaign>, RequestError> {
        self.request_list(
            QueueName::Campaign,
            "/v1/campaigns",
            token,
            size,
            filters,
            RESOURCE_CAMPAIGN,
        ).await
    }

    async fn campaign_v1_campaign_delete(
        &self,
        campaign_id: Uuid,
    ) -> Result<Campaign, RequestError> {
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}"),
            RequestMethod::Delete,
            RESOURCE_CAMPAIGN,
            None,
        ).await
    }

    async fn campaign_v1_campaign_update_basic_info(
        &self,
        campaign_id: Uuid,
        name: &str,
        detail: &str,
        campaign_type: &str,
        service_level: i32,
        end_handle: &str,
    ) -> Result<Campaign, RequestError> {
        let data = json!({
            "name": name,
            "detail": detail,
            "type": campaign_type,
            "service_level": service_level,
            "end_handle": end_handle
        });
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}"),
            RequestMethod::Put,
            RESOURCE_CAMPAIGN,
            Some(data),
        ).await
    }

    async fn campaign_v1_campaign_update_status(
        &self,
        campaign_id: Uuid,
        status: Status,
    ) -> Result<Campaign, RequestError> {
        let data = json!({"status": status});
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}/status"),
            RequestMethod::Put,
            RESOURCE_CAMPAIGN,
            Some(data),
        ).await
    }

    async fn campaign_v1_campaign_update_service_level(
        &self,
        campaign_id: Uuid,
        service_level: i32,
    ) -> Result<Campaign, RequestError> {
        let data = json!({"service_level": service_level});
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}/service_level"),
            RequestMethod::Put,
            RESOURCE_CAMPAIGN,
            Some(data),
        ).await
    }

    async fn campaign_v1_campaign_update_actions(
        &self,
        campaign_id: Uuid,
        actions: &[Action],
    ) -> Result<Campaign, RequestError> {
        let data = json!({"actions": actions});
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}/actions"),
            RequestMethod::Put,
            RESOURCE_CAMPAIGN,
            Some(data),
        ).await
    }

    async fn campaign_v1_campaign_update_resource_info(
        &self,
        campaign_id: Uuid,
        outplan_id: Uuid,
        outdial_id: Uuid,
        queue_id: Uuid,
        next_campaign_id: Uuid,
    ) -> Result<Campaign, RequestError> {
        let data = json!({
            "outplan_id": outplan_id,
            "outdial_id": outdial_id,
            "queue_id": queue_id,
            "next_campaign_id": next_campaign_id
        });
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}/resource_info"),
            RequestMethod::Put,
            RESOURCE_CAMPAIGN,
            Some(data),
        ).await
    }

    async fn campaign_v1_campaign_update_next_campaign_id(
        &self,
        campaign_id: Uuid,
        next_campaign_id: Uuid,
    ) -> Result<Campaign, RequestError> {
        let data = json!({"next_campaign_id": next_campaign_id});
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigns/{campaign_id}/next_campaign_id"),
            RequestMethod::Put,
            RESOURCE_CAMPAIGN,
            Some(data),
        ).await
    }

    async fn campaign_v1_campaigncall_get(
        &self,
        campaigncall_id: Uuid,
    ) -> Result<Campaigncall, RequestError> {
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigncalls/{campaigncall_id}"),
            RequestMethod::Get,
            RESOURCE_CAMPAIGNCALL,
            None,
        ).await
    }

    async fn campaign_v1_campaigncall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Campaigncall>, RequestError> {
        self.request_list(
            QueueName::Campaign,
            "/v1/campaigncalls",
            token,
            size,
            filters,
            RESOURCE_CAMPAIGNCALL,
        ).await
    }

    async fn campaign_v1_campaigncall_delete(
        &self,
        campaigncall_id: Uuid,
    ) -> Result<Campaigncall, RequestError> {
        self.request(
            QueueName::Campaign,
            &format!("/v1/campaigncalls/{campaigncall_id}"),
            RequestMethod::Delete,
            RESOURCE_CAMPAIGNCALL,
            None,
        ).await
    }

    async fn campaign_v1_outplan_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        source: &Address,
        dial_timeout: i32,
        try_interval: i32,
    ) -> Result<Outplan, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "name": name,
            "detail": detail,
            "source": source,
            "dial_timeout": dial_timeout,
            "try_interval": try_interval,
        });
        self.request(
            QueueName::Campaign,
            "/v1/outplans",
            RequestMethod::Post,
            RESOURCE_OUTPLAN,
            Some(data),
        ).await
    }

    async fn campaign_v1_outplan_get(&self, outplan_id: Uuid) -> Result<Outplan, RequestError> {
        self.request(
            QueueName::Campaign,
            &format!("/v1/outplans/{outplan_id}"),
            RequestMethod::Get,
            RESOURCE_OUTPLAN,
            None,
        ).await
    }

    async fn campaign_v1_outplan_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Outplan>, RequestError> {
        self.request_list(
            QueueName::Campaign,
            "/v1/outplans",
            token,
            size,
            filters,
            RESOURCE_OUTPLAN,
        ).await
    }

    async fn campaign_v1_outplan_delete(&self, outplan_id: Uuid) -> Result<Outplan, RequestError> {
        self.request(
            QueueName::Campaign,
            &format!("/v1/outplans/{outplan_id}"),
            RequestMethod::Delete,
            RESOURCE_OUTPLAN,
            None,
        ).await
    }

    async fn campaign_v1_outplan_update_basic_info(
        &self,
        outplan_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Outplan, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Campaign,
            &format!("/v1/outplans/{outplan_id}"),
            RequestMethod::Put,
            RESOURCE_OUTPLAN,
            Some(data),
        ).await
    }

    async fn campaign_v1_outplan_update_dial_info(
        &self,
        outplan_id: Uuid,
        source: &Address,
        dial_timeout: i32,
        try_interval: i32,
    ) -> Result<Outplan, RequestError> {
        let data = json!({
            "source": source,
            "dial_timeout": dial_timeout,
            "try_interval": try_interval
        });
        self.request(
            QueueName::Campaign,
            &format!("/v1/outplans/{outplan_id}/dial_info"),
            RequestMethod::Put,
            RESOURCE_OUTPLAN,
            Some(data),
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn create_sends_type_field() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        rh.sock().on(
            RequestMethod::Post,
            "/v1/campaigns",
            json!({"name": "test", "status": "stop"}),
        );

        let req = CampaignCreate {
            customer_id: Uuid::new_v4(),
            campaign_type: "call".into(),
            name: "test".into(),
            service_level: 100,
            ..Default::default()
        };
        let res = rh.campaign_v1_campaign_create(&req).await.unwrap();
        assert_eq!(res.status, Status::Stop);

        let data = rh.sock().requests()[0].request.data.clone().unwrap();
        assert_eq!(data["type"], "call");
        assert_eq!(data["service_level"], 100);
    }
}
