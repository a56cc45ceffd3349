use models::address::Address;
use models::agent::Agent;
use models::campaign::campaign::{self, Campaign, Status};
use models::campaign::campaigncall::{self, Campaigncall};
use models::campaign::outplan::{self, Outplan};
use models::flow::action::Action;
use requesthandler::campaign::CampaignCreate;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

/// Resources a campaign points at. Nil ids are left unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignResources {
    pub outplan_id: Uuid,
    pub outdial_id: Uuid,
    pub queue_id: Uuid,
    pub next_campaign_id: Uuid,
}

impl ServiceHandler {
    pub(crate) async fn campaign_get_authorized(
        &self,
        a: &Agent,
        campaign_id: Uuid,
    ) -> Result<Campaign, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.campaign_v1_campaign_get(campaign_id),
        ).await
    }

    async fn outplan_get_authorized(
        &self,
        a: &Agent,
        outplan_id: Uuid,
    ) -> Result<Outplan, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.campaign_v1_outplan_get(outplan_id),
        ).await
    }

    /// Every referenced resource must be one the caller may use.
    async fn campaign_check_resources(
        &self,
        a: &Agent,
        r: &CampaignResources,
    ) -> Result<(), ServiceError> {
        if !r.outplan_id.is_nil() {
            self.outplan_get_authorized(a, r.outplan_id)
                .await
                .log_err("could not get the outplan")?;
        }
        if !r.outdial_id.is_nil() {
            self.outdial_get_authorized(a, r.outdial_id)
                .await
                .log_err("could not get the outdial")?;
        }
        if !r.queue_id.is_nil() {
            self.queue_get_authorized(a, r.queue_id).await.log_err("could not get the queue")?;
        }
        if !r.next_campaign_id.is_nil() {
            self.campaign_get_authorized(a, r.next_campaign_id)
                .await
                .log_err("could not get the next campaign")?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn campaign_create(
        &self,
        a: &Agent,
        name: &str,
        detail: &str,
        campaign_type: &str,
        service_level: i32,
        end_handle: &str,
        actions: &[Action],
        resources: CampaignResources,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a campaign")?;
        self.campaign_check_resources(a, &resources).await?;

        let req = CampaignCreate {
            customer_id: a.customer_id,
            campaign_type: campaign_type.to_string(),
            name: name.to_string(),
            detail: detail.to_string(),
            actions: actions.to_vec(),
            service_level,
            end_handle: end_handle.to_string(),
            outplan_id: resources.outplan_id,
            outdial_id: resources.outdial_id,
            queue_id: resources.queue_id,
            next_campaign_id: resources.next_campaign_id,
        };
        let res = self.req_handler
            .campaign_v1_campaign_create(&req)
            .await
            .log_err("could not create a campaign")?;
        info!(campaign_id = %res.id, "campaign_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn campaign_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<campaign::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list campaigns")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .campaign_v1_campaign_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list campaigns")?;
        Ok(res.iter().map(Campaign::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_get(
        &self,
        a: &Agent,
        campaign_id: Uuid,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        let res = self.campaign_get_authorized(a, campaign_id)
            .await
            .log_err("could not get the campaign")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_delete(
        &self,
        a: &Agent,
        campaign_id: Uuid,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        let res = self.req_handler
            .campaign_v1_campaign_delete(campaign_id)
            .await
            .log_err("could not delete the campaign")?;
        info!(campaign_id = %res.id, "campaign_deleted");
        Ok(res.convert_webhook_message())
    }

    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_update_basic_info(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        name: &str,
        detail: &str,
        campaign_type: &str,
        service_level: i32,
        end_handle: &str,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        let res = self.req_handler
            .campaign_v1_campaign_update_basic_info(
                campaign_id,
                name,
                detail,
                campaign_type,
                service_level,
                end_handle,
            )
            .await
            .log_err("could not update the campaign")?;
        info!(campaign_id = %res.id, "campaign_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_update_status(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        status: Status,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        let res = self.req_handler
            .campaign_v1_campaign_update_status(campaign_id, status)
            .await
            .log_err("could not update the campaign status")?;
        info!(campaign_id = %res.id, status = ?res.status, "campaign_status_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_update_service_level(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        service_level: i32,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        let res = self.req_handler
            .campaign_v1_campaign_update_service_level(campaign_id, service_level)
            .await
            .log_err("could not update the service level")?;
        info!(campaign_id = %res.id, "campaign_service_level_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_update_actions(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        actions: &[Action],
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        let res = self.req_handler
            .campaign_v1_campaign_update_actions(campaign_id, actions)
            .await
            .log_err("could not update the campaign actions")?;
        info!(campaign_id = %res.id, "campaign_actions_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_update_resource_info(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        resources: CampaignResources,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        self.campaign_check_resources(a, &resources).await?;
        let res = self
            .req_handler
            .campaign_v1_campaign_update_resource_info(
                campaign_id,
                resources.outplan_id,
                resources.outdial_id,
                resources.queue_id,
                resources.next_campaign_id,
            )
            .await
            .log_err("could not update the campaign resources")?;
        info!(campaign_id = %res.id, "campaign_resource_info_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaign_update_next_campaign_id(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        next_campaign_id: Uuid,
    ) -> Result<campaign::WebhookMessage, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        self.campaign_check_resources(
            a,
            &CampaignResources { next_campaign_id, ..Default::default() },
        ).await?;
        let res = self.req_handler
            .campaign_v1_campaign_update_next_campaign_id(campaign_id, next_campaign_id)
            .await
            .log_err("could not update the next campaign")?;
        info!(campaign_id = %res.id, "campaign_next_campaign_id_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn campaigncall_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<campaigncall::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list campaigncalls")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .campaign_v1_campaigncall_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list campaigncalls")?;
        Ok(res.iter().map(Campaigncall::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn campaigncall_list_by_campaign_id(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<campaigncall::WebhookMessage>, ServiceError> {
        self.campaign_get_authorized(a, campaign_id).await.log_err("could not get the campaign")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("campaign_id".into(), json!(campaign_id));
        let res = self.req_handler
            .campaign_v1_campaigncall_list(&token, size, &filters)
            .await
            .log_err("could not list campaigncalls")?;
        Ok(res.iter().map(Campaigncall::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, campaigncall_id = %campaigncall_id)
    )]
    pub async fn campaigncall_get(
        &self,
        a: &Agent,
        campaigncall_id: Uuid,
    ) -> Result<campaigncall::WebhookMessage, ServiceError> {
        let res = Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.campaign_v1_campaigncall_get(campaigncall_id),
        ).await.log_err("could not get the campaigncall")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, campaigncall_id = %campaigncall_id)
    )]
    pub async fn campaigncall_delete(
        &self,
        a: &Agent,
        campaigncall_id: Uuid,
    ) -> Result<campaigncall::WebhookMessage, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.campaign_v1_campaigncall_get(campaigncall_id),
        ).await.log_err("could not get the campaigncall")?;
        let res = self.req_handler
            .campaign_v1_campaigncall_delete(campaigncall_id)
            .await
            .log_err("could not delete the campaigncall")?;
        info!(campaigncall_id = %res.id, "campaigncall_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn outplan_create(
        &self,
        a: &Agent,
        name: &str,
        detail: &str,
        source: &Address,
        dial_timeout: i32,
        try_interval: i32,
    ) -> Result<outplan::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create an outplan")?;
        let res = self.req_handler
            .campaign_v1_outplan_create(
                a.customer_id,
                name,
                detail,
                source,
                dial_timeout,
                try_interval,
            )
            .await
            .log_err("could not create an outplan")?;
        info!(outplan_id = %res.id, "outplan_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outplan_id = %outplan_id))]
    pub async fn outplan_delete(
        &self,
        a: &Agent,
        outplan_id: Uuid,
    ) -> Result<outplan::WebhookMessage, ServiceError> {
        self.outplan_get_authorized(a, outplan_id).await.log_err("could not get the outplan")?;
        let res = self.req_handler
            .campaign_v1_outplan_delete(outplan_id)
            .await
            .log_err("could not delete the outplan")?;
        info!(outplan_id = %res.id, "outplan_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn outplan_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<outplan::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list outplans")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .campaign_v1_outplan_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list outplans")?;
        Ok(res.iter().map(Outplan::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outplan_id = %outplan_id))]
    pub async fn outplan_get(
        &self,
        a: &Agent,
        outplan_id: Uuid,
    ) -> Result<outplan::WebhookMessage, ServiceError> {
        let res = self.outplan_get_authorized(a, outplan_id)
            .await
            .log_err("could not get the outplan")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outplan_id = %outplan_id))]
    pub async fn outplan_update_basic_info(
        &self,
        a: &Agent,
        outplan_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<outplan::WebhookMessage, ServiceError> {
        self.outplan_get_authorized(a, outplan_id).await.log_err("could not get the outplan")?;
        let res = self.req_handler
            .campaign_v1_outplan_update_basic_info(outplan_id, name, detail)
            .await
            .log_err("could not update the outplan")?;
        info!(outplan_id = %res.id, "outplan_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outplan_id = %outplan_id))]
    pub async fn outplan_update_dial_info(
        &self,
        a: &Agent,
        outplan_id: Uuid,
        source: &Address,
        dial_timeout: i32,
        try_interval: i32,
    ) -> Result<outplan::WebhookMessage, ServiceError> {
        self.outplan_get_authorized(a, outplan_id).await.log_err("could not get the outplan")?;
        let res = self.req_handler
            .campaign_v1_outplan_update_dial_info(outplan_id, source, dial_timeout, try_interval)
            .await
            .log_err("could not update the dial info")?;
        info!(outplan_id = %res.id, "outplan_dial_info_updated");
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use models::agent::Permission;
    use requesthandler::RequestMethod;

    use super::*;
    use crate::test_support::{agent_with, mock_handler};

    #[tokio::test]
    async fn campaign_create_rejects_foreign_queue() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let queue_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/queues/{queue_id}"),
            json!({"id": queue_id, "customer_id": Uuid::new_v4()}),
        );

        let resources = CampaignResources { queue_id, ..Default::default() };
        let res = h.campaign_create(&a, "c", "d", "call", 100, "stop", &[], resources).await;
        assert!(matches!(res, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn campaign_create_pins_customer() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let outplan_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outplans/{outplan_id}"),
            json!({"id": outplan_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            "/v1/campaigns",
            json!({"id": Uuid::new_v4(), "customer_id": a.customer_id, "outplan_id": outplan_id}),
        );

        let res = h.campaign_create(
            &a,
            "c",
            "d",
            "call",
            100,
            "stop",
            &[],
            CampaignResources { outplan_id, ..Default::default() },
        ).await.unwrap();
        assert_eq!(res.outplan_id, outplan_id);

        let sent = rh.sock()
            .find(RequestMethod::Post, "/v1/campaigns")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(sent["customer_id"], json!(a.customer_id));
        assert_eq!(sent["type"], "call");
    }

    #[tokio::test]
    async fn campaigncalls_filter_by_campaign() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let campaign_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/campaigns/{campaign_id}"),
            json!({"id": campaign_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            "/v1/campaigncalls",
            json!([{"id": Uuid::new_v4(), "campaign_id": campaign_id}]),
        );

        let res = h.campaigncall_list_by_campaign_id(&a, campaign_id, 10, "").await.unwrap();
        assert_eq!(res.len(), 1);
        let filters = rh.sock()
            .find(RequestMethod::Get, "/v1/campaigncalls")
            .unwrap()
            .request
            .data
            .unwrap();
        assert_eq!(filters["campaign_id"], json!(campaign_id));
    }
}
