use models::agent::Agent;
use models::number::available_number::{self, AvailableNumber};
use models::number::number::{self, Number};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    customer_filters,
    page,
    ServiceHandler,
    PERM_ADMIN_MANAGER,
    PERM_CUSTOMER_ALL,
    PERM_PROJECT,
};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn number_get_authorized(
        &self,
        a: &Agent,
        number_id: Uuid,
    ) -> Result<Number, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.number_v1_number_get(number_id),
        ).await
    }

    /// Both flows must belong to the caller's customer. A nil id means
    /// "no flow" and is always allowed.
    async fn number_check_flows(
        &self,
        a: &Agent,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
    ) -> Result<(), ServiceError> {
        for flow_id in [call_flow_id, message_flow_id] {
            if !flow_id.is_nil() {
                self.flow_get_authorized(a, flow_id).await.log_err("could not get the flow")?;
            }
        }
        Ok(())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, number = %num))]
    pub async fn number_create(
        &self,
        a: &Agent,
        num: &str,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<number::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a number")?;
        self.number_check_flows(a, call_flow_id, message_flow_id).await?;

        let res = self.req_handler
            .number_v1_number_create(
                a.customer_id,
                num,
                call_flow_id,
                message_flow_id,
                name,
                detail,
            )
            .await
            .log_err("could not create a number")?;
        info!(number_id = %res.id, "number_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, number_id = %number_id))]
    pub async fn number_get(
        &self,
        a: &Agent,
        number_id: Uuid,
    ) -> Result<number::WebhookMessage, ServiceError> {
        let res = self.number_get_authorized(a, number_id)
            .await
            .log_err("could not get the number")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn number_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<number::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list numbers")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .number_v1_number_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list numbers")?;
        Ok(res.iter().map(Number::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, number_id = %number_id))]
    pub async fn number_delete(
        &self,
        a: &Agent,
        number_id: Uuid,
    ) -> Result<number::WebhookMessage, ServiceError> {
        self.number_get_authorized(a, number_id).await.log_err("could not get the number")?;
        let res = self.req_handler
            .number_v1_number_delete(number_id)
            .await
            .log_err("could not delete the number")?;
        info!(number_id = %res.id, "number_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, number_id = %number_id))]
    pub async fn number_update(
        &self,
        a: &Agent,
        number_id: Uuid,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<number::WebhookMessage, ServiceError> {
        self.number_get_authorized(a, number_id).await.log_err("could not get the number")?;
        self.number_check_flows(a, call_flow_id, message_flow_id).await?;

        let res = self.req_handler
            .number_v1_number_update(number_id, call_flow_id, message_flow_id, name, detail)
            .await
            .log_err("could not update the number")?;
        info!(number_id = %res.id, "number_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, number_id = %number_id))]
    pub async fn number_update_flow_ids(
        &self,
        a: &Agent,
        number_id: Uuid,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
    ) -> Result<number::WebhookMessage, ServiceError> {
        self.number_get_authorized(a, number_id).await.log_err("could not get the number")?;
        self.number_check_flows(a, call_flow_id, message_flow_id).await?;

        let res = self.req_handler
            .number_v1_number_update_flow_ids(number_id, call_flow_id, message_flow_id)
            .await
            .log_err("could not update the number flows")?;
        info!(number_id = %res.id, "number_flow_ids_updated");
        Ok(res.convert_webhook_message())
    }

    /// Renew every number whose renewal time is before `tm_renew`.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, tm_renew = %tm_renew))]
    pub async fn number_renew(
        &self,
        a: &Agent,
        tm_renew: &str,
    ) -> Result<Vec<number::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_PROJECT)
            .log_err("no permission to renew numbers")?;
        let res = self.req_handler
            .number_v1_number_renew(tm_renew)
            .await
            .log_err("could not renew numbers")?;
        info!(count = res.len(), "numbers_renewed");
        Ok(res.iter().map(Number::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, country_code = %country_code))]
    pub async fn available_number_list(
        &self,
        a: &Agent,
        size: u64,
        country_code: &str,
    ) -> Result<Vec<available_number::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ALL)
            .log_err("no permission to list available numbers")?;
        let (_, size) = page(size, "");
        let res = self.req_handler
            .number_v1_available_number_list(a.customer_id, size, country_code)
            .await
            .log_err("could not list available numbers")?;
        Ok(res.iter().map(AvailableNumber::convert_webhook_message).collect())
    }
}
