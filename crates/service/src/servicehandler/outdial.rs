use models::agent::Agent;
use models::outdial::outdial::{self, Outdial};
use models::outdial::outdialtarget::{self, OutdialTarget, TargetInfo};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    pub(crate) async fn outdial_get_authorized(
        &self,
        a: &Agent,
        outdial_id: Uuid,
    ) -> Result<Outdial, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.outdial_v1_outdial_get(outdial_id),
        ).await
    }

    /// Targets carry no customer id. The parent outdial is authorized first,
    /// then the target must hang off that outdial.
    async fn outdialtarget_get_authorized(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        target_id: Uuid,
    ) -> Result<OutdialTarget, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await?;
        let res = self.req_handler.outdial_v1_outdialtarget_get(target_id).await?;
        if res.outdial_id != outdial_id {
            return Err(ServiceError::NoPermission);
        }
        if res.is_deleted() {
            return Err(ServiceError::NotFound);
        }
        Ok(res)
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, campaign_id = %campaign_id))]
    pub async fn outdial_create(
        &self,
        a: &Agent,
        campaign_id: Uuid,
        name: &str,
        detail: &str,
        data: &str,
    ) -> Result<outdial::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create an outdial")?;
        if !campaign_id.is_nil() {
            self.campaign_get_authorized(a, campaign_id)
                .await
                .log_err("could not get the campaign")?;
        }

        let res = self.req_handler
            .outdial_v1_outdial_create(a.customer_id, campaign_id, name, detail, data)
            .await
            .log_err("could not create an outdial")?;
        info!(outdial_id = %res.id, "outdial_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn outdial_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<outdial::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list outdials")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .outdial_v1_outdial_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list outdials")?;
        Ok(res.iter().map(Outdial::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outdial_id = %outdial_id))]
    pub async fn outdial_get(
        &self,
        a: &Agent,
        outdial_id: Uuid,
    ) -> Result<outdial::WebhookMessage, ServiceError> {
        let res = self.outdial_get_authorized(a, outdial_id)
            .await
            .log_err("could not get the outdial")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outdial_id = %outdial_id))]
    pub async fn outdial_delete(
        &self,
        a: &Agent,
        outdial_id: Uuid,
    ) -> Result<outdial::WebhookMessage, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await.log_err("could not get the outdial")?;
        let res = self.req_handler
            .outdial_v1_outdial_delete(outdial_id)
            .await
            .log_err("could not delete the outdial")?;
        info!(outdial_id = %res.id, "outdial_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outdial_id = %outdial_id))]
    pub async fn outdial_update_basic_info(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<outdial::WebhookMessage, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await.log_err("could not get the outdial")?;
        let res = self.req_handler
            .outdial_v1_outdial_update_basic_info(outdial_id, name, detail)
            .await
            .log_err("could not update the outdial")?;
        info!(outdial_id = %res.id, "outdial_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, outdial_id = %outdial_id, campaign_id = %campaign_id)
    )]
    pub async fn outdial_update_campaign_id(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        campaign_id: Uuid,
    ) -> Result<outdial::WebhookMessage, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await.log_err("could not get the outdial")?;
        if !campaign_id.is_nil() {
            self.campaign_get_authorized(a, campaign_id)
                .await
                .log_err("could not get the campaign")?;
        }

        let res = self.req_handler
            .outdial_v1_outdial_update_campaign_id(outdial_id, campaign_id)
            .await
            .log_err("could not update the outdial campaign")?;
        info!(outdial_id = %res.id, "outdial_campaign_id_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outdial_id = %outdial_id))]
    pub async fn outdial_update_data(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        data: &str,
    ) -> Result<outdial::WebhookMessage, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await.log_err("could not get the outdial")?;
        let res = self.req_handler
            .outdial_v1_outdial_update_data(outdial_id, data)
            .await
            .log_err("could not update the outdial data")?;
        info!(outdial_id = %res.id, "outdial_data_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outdial_id = %outdial_id))]
    pub async fn outdialtarget_create(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        info: &TargetInfo,
    ) -> Result<outdialtarget::WebhookMessage, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await.log_err("could not get the outdial")?;
        let res = self.req_handler
            .outdial_v1_outdialtarget_create(outdial_id, info)
            .await
            .log_err("could not create an outdial target")?;
        info!(outdialtarget_id = %res.id, "outdialtarget_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            outdial_id = %outdial_id,
            outdialtarget_id = %target_id,
        )
    )]
    pub async fn outdialtarget_get(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        target_id: Uuid,
    ) -> Result<outdialtarget::WebhookMessage, ServiceError> {
        let res = self.outdialtarget_get_authorized(a, outdial_id, target_id)
            .await
            .log_err("could not get the outdial target")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            outdial_id = %outdial_id,
            outdialtarget_id = %target_id,
        )
    )]
    pub async fn outdialtarget_delete(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        target_id: Uuid,
    ) -> Result<outdialtarget::WebhookMessage, ServiceError> {
        self.outdialtarget_get_authorized(a, outdial_id, target_id)
            .await
            .log_err("could not get the outdial target")?;
        let res = self.req_handler
            .outdial_v1_outdialtarget_delete(target_id)
            .await
            .log_err("could not delete the outdial target")?;
        info!(outdialtarget_id = %res.id, "outdialtarget_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, outdial_id = %outdial_id))]
    pub async fn outdialtarget_list_by_outdial_id(
        &self,
        a: &Agent,
        outdial_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<outdialtarget::WebhookMessage>, ServiceError> {
        self.outdial_get_authorized(a, outdial_id).await.log_err("could not get the outdial")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .outdial_v1_outdialtarget_list_by_outdial_id(outdial_id, &token, size)
            .await
            .log_err("could not list outdial targets")?;
        Ok(res.iter().map(OutdialTarget::convert_webhook_message).collect())
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
    async fn target_of_another_outdial_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let outdial_id = Uuid::new_v4();
        let target_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outdials/{outdial_id}"),
            json!({"id": outdial_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outdialtargets/{target_id}"),
            json!({"id": target_id, "outdial_id": Uuid::new_v4()}),
        );

        let err = h.outdialtarget_delete(&a, outdial_id, target_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NoPermission));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn target_of_own_outdial_is_returned() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let outdial_id = Uuid::new_v4();
        let target_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outdials/{outdial_id}"),
            json!({"id": outdial_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outdialtargets/{target_id}"),
            json!({"id": target_id, "outdial_id": outdial_id, "name": "t1"}),
        );

        let res = h.outdialtarget_get(&a, outdial_id, target_id).await.unwrap();
        assert_eq!(res.name, "t1");
    }

    #[tokio::test]
    async fn targets_are_listed_through_the_outdial() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let outdial_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outdials/{outdial_id}"),
            json!({"id": outdial_id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/outdials/{outdial_id}/targets"),
            json!([{"id": Uuid::new_v4(), "outdial_id": outdial_id}]),
        );

        assert_eq!(
            h.outdialtarget_list_by_outdial_id(&a, outdial_id, 10, "").await.unwrap().len(),
            1
        );
    }
}
