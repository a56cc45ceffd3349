use models::agent::{Agent, Permission};
use models::customer::{self, Customer, CustomerInfo};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{deleted_filter, page, ServiceHandler, PERM_CUSTOMER_ADMIN, PERM_PROJECT};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn customer_get_authorized(
        &self,
        a: &Agent,
        customer_id: Uuid,
        perm: Permission,
    ) -> Result<Customer, ServiceError> {
        Self::get_authorized(a, perm, self.req_handler.customer_v1_customer_get(customer_id)).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn customer_create(
        &self,
        a: &Agent,
        info: &CustomerInfo,
    ) -> Result<customer::WebhookMessage, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to create a customer")?;
        let res = self.req_handler
            .customer_v1_customer_create(info)
            .await
            .log_err("could not create a customer")?;
        info!(new_customer_id = %res.id, "customer_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, target_customer_id = %customer_id))]
    pub async fn customer_get(
        &self,
        a: &Agent,
        customer_id: Uuid,
    ) -> Result<customer::WebhookMessage, ServiceError> {
        let res = self.customer_get_authorized(a, customer_id, PERM_CUSTOMER_ADMIN)
            .await
            .log_err("could not get the customer")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn customer_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<customer::WebhookMessage>, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to list customers")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .customer_v1_customer_list(&token, size, &deleted_filter())
            .await
            .log_err("could not list customers")?;
        Ok(res.iter().map(Customer::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, target_customer_id = %customer_id))]
    pub async fn customer_update(
        &self,
        a: &Agent,
        customer_id: Uuid,
        info: &CustomerInfo,
    ) -> Result<customer::WebhookMessage, ServiceError> {
        self.customer_get_authorized(a, customer_id, PERM_CUSTOMER_ADMIN)
            .await
            .log_err("could not get the customer")?;
        let res = self.req_handler
            .customer_v1_customer_update(customer_id, info)
            .await
            .log_err("could not update the customer")?;
        info!(target_customer_id = %res.id, "customer_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, target_customer_id = %customer_id))]
    pub async fn customer_delete(
        &self,
        a: &Agent,
        customer_id: Uuid,
    ) -> Result<customer::WebhookMessage, ServiceError> {
        self.customer_get_authorized(a, customer_id, PERM_PROJECT)
            .await
            .log_err("could not get the customer")?;
        let res = self.req_handler
            .customer_v1_customer_delete(customer_id)
            .await
            .log_err("could not delete the customer")?;
        info!(target_customer_id = %res.id, "customer_deleted");
        Ok(res.convert_webhook_message())
    }

    /// Point the customer at another billing account. The caller must
    /// administer both the customer and the account.
    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            target_customer_id = %customer_id,
            billing_account_id = %billing_account_id,
        )
    )]
    pub async fn customer_update_billing_account_id(
        &self,
        a: &Agent,
        customer_id: Uuid,
        billing_account_id: Uuid,
    ) -> Result<customer::WebhookMessage, ServiceError> {
        self.customer_get_authorized(a, customer_id, PERM_CUSTOMER_ADMIN)
            .await
            .log_err("could not get the customer")?;
        let account = self.billing_account_get_authorized(a, billing_account_id)
            .await
            .log_err("could not get the billing account")?;
        if account.customer_id != customer_id {
            return Err(ServiceError::NoPermission)
                .log_err("billing account belongs to another customer");
        }

        let res = self.req_handler
            .customer_v1_customer_update_billing_account_id(customer_id, billing_account_id)
            .await
            .log_err("could not update the billing account id")?;
        info!(
            target_customer_id = %res.id,
            billing_account_id = %res.billing_account_id,
            "customer_billing_account_updated"
        );
        Ok(res.convert_webhook_message())
    }
}

#[cfg(test)]
mod tests {
    use requesthandler::RequestMethod;
    use serde_json::json;

    use super::*;
    use crate::test_support::{agent_with, mock_handler, CapturedLogs};

    #[tokio::test]
    async fn customer_admin_reads_own_customer_only() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let other = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/customers/{}", a.customer_id),
            json!({"id": a.customer_id, "name": "mine"}),
        );
        rh.sock().on(RequestMethod::Get, &format!("/v1/customers/{other}"), json!({"id": other}));

        assert_eq!(h.customer_get(&a, a.customer_id).await.unwrap().name, "mine");
        assert!(matches!(h.customer_get(&a, other).await, Err(ServiceError::NoPermission)));
    }

    #[tokio::test]
    async fn customer_create_needs_project_admin() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ALL);

        let err = h.customer_create(&a, &CustomerInfo { name: "new".into(), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoPermission));
        assert!(rh.sock().requests().is_empty());
    }

    #[tokio::test]
    async fn billing_account_must_belong_to_customer() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::PROJECT_SUPER_ADMIN);
        let customer_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/customers/{customer_id}"),
            json!({"id": customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{account_id}"),
            json!({"id": account_id, "customer_id": Uuid::new_v4()}),
        );

        let err = h.customer_update_billing_account_id(&a, customer_id, account_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoPermission));
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn foreign_billing_account_denial_is_logged() {
        let (h, rh) = mock_handler();
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let a = agent_with(Uuid::new_v4(), Permission::PROJECT_SUPER_ADMIN);
        let customer_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/customers/{customer_id}"),
            json!({"id": customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{account_id}"),
            json!({"id": account_id, "customer_id": Uuid::new_v4()}),
        );

        let err = h.customer_update_billing_account_id(&a, customer_id, account_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoPermission));
        assert!(logs.contents().contains("billing account belongs to another customer"));
    }
}
