use models::agent::Agent;
use models::billing::account::{self, Account, PaymentMethod, PaymentType};
use models::billing::allowance::{self, Allowance};
use models::billing::billing::{self, Billing};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_CUSTOMER_ADMIN, PERM_PROJECT};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    pub(crate) async fn billing_account_get_authorized(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<Account, ServiceError> {
        Self::get_authorized(
            a,
            PERM_CUSTOMER_ADMIN,
            self.req_handler.billing_v1_account_get(account_id),
        ).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn billing_account_create(
        &self,
        a: &Agent,
        name: &str,
        detail: &str,
        payment_type: PaymentType,
        payment_method: PaymentMethod,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ADMIN)
            .log_err("no permission to create a billing account")?;
        let res = self.req_handler
            .billing_v1_account_create(a.customer_id, name, detail, payment_type, payment_method)
            .await
            .log_err("could not create a billing account")?;
        info!(billing_account_id = %res.id, "billing_account_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, billing_account_id = %account_id))]
    pub async fn billing_account_get(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        let res = self.billing_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the billing account")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn billing_account_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<account::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ADMIN)
            .log_err("no permission to list billing accounts")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .billing_v1_account_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list billing accounts")?;
        Ok(res.iter().map(Account::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, billing_account_id = %account_id))]
    pub async fn billing_account_delete(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        self.billing_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the billing account")?;
        let res = self.req_handler
            .billing_v1_account_delete(account_id)
            .await
            .log_err("could not delete the billing account")?;
        info!(billing_account_id = %res.id, "billing_account_deleted");
        Ok(res.convert_webhook_message())
    }

    /// Credit an account without a payment. Project admins only.
    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, billing_account_id = %account_id, balance = balance)
    )]
    pub async fn billing_account_add_balance_force(
        &self,
        a: &Agent,
        account_id: Uuid,
        balance: f32,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::get_authorized(a, PERM_PROJECT, self.req_handler.billing_v1_account_get(account_id))
            .await
            .log_err("could not get the billing account")?;
        let res = self.req_handler
            .billing_v1_account_add_balance_force(account_id, balance)
            .await
            .log_err("could not add the balance")?;
        info!(billing_account_id = %res.id, balance, "billing_account_balance_added");
        Ok(res.convert_webhook_message())
    }

    /// Debit an account outside of the billing cycle. Project admins only.
    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, billing_account_id = %account_id, balance = balance)
    )]
    pub async fn billing_account_subtract_balance_force(
        &self,
        a: &Agent,
        account_id: Uuid,
        balance: f32,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::get_authorized(a, PERM_PROJECT, self.req_handler.billing_v1_account_get(account_id))
            .await
            .log_err("could not get the billing account")?;
        let res = self.req_handler
            .billing_v1_account_subtract_balance_force(account_id, balance)
            .await
            .log_err("could not subtract the balance")?;
        info!(billing_account_id = %res.id, balance, "billing_account_balance_subtracted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, billing_account_id = %account_id))]
    pub async fn billing_account_update_basic_info(
        &self,
        a: &Agent,
        account_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<account::WebhookMessage, ServiceError> {
        self.billing_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the billing account")?;
        let res = self.req_handler
            .billing_v1_account_update_basic_info(account_id, name, detail)
            .await
            .log_err("could not update the billing account")?;
        info!(billing_account_id = %res.id, "billing_account_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, billing_account_id = %account_id))]
    pub async fn billing_account_update_payment_info(
        &self,
        a: &Agent,
        account_id: Uuid,
        payment_type: PaymentType,
        payment_method: PaymentMethod,
    ) -> Result<account::WebhookMessage, ServiceError> {
        self.billing_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the billing account")?;
        let res = self.req_handler
            .billing_v1_account_update_payment_info(account_id, payment_type, payment_method)
            .await
            .log_err("could not update the payment info")?;
        info!(billing_account_id = %res.id, "billing_account_payment_info_updated");
        Ok(res.convert_webhook_message())
    }

    /// Token allowances of an account, one entry per billing cycle.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, billing_account_id = %account_id))]
    pub async fn billing_account_allowances_get(
        &self,
        a: &Agent,
        account_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<allowance::WebhookMessage>, ServiceError> {
        self.billing_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the billing account")?;
        let (token, size) = page(size, token);
        let res = self
            .req_handler
            .billing_v1_account_allowances_get(account_id, &token, size)
            .await
            .log_err("could not get the allowances")?;
        Ok(res.iter().map(Allowance::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, billing_id = %billing_id))]
    pub async fn billing_get(
        &self,
        a: &Agent,
        billing_id: Uuid,
    ) -> Result<billing::WebhookMessage, ServiceError> {
        let res = Self::get_authorized(
            a,
            PERM_CUSTOMER_ADMIN,
            self.req_handler.billing_v1_billing_get(billing_id),
        ).await.log_err("could not get the billing")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn billing_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<billing::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_CUSTOMER_ADMIN)
            .log_err("no permission to list billings")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .billing_v1_billing_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list billings")?;
        Ok(res.iter().map(Billing::convert_webhook_message).collect())
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
    async fn billing_account_of_another_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        let err = h.billing_account_get(&a, id).await.unwrap_err();
        assert_eq!(err.to_string(), "user has no permission");
        assert!(rh.sock().mutations().is_empty());
    }

    #[tokio::test]
    async fn billing_account_of_own_customer_is_returned() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}"),
            json!({"id": id, "customer_id": a.customer_id, "balance": 10.0}),
        );

        let res = h.billing_account_get(&a, id).await.unwrap();
        assert_eq!(res.id, id);
    }

    #[tokio::test]
    async fn manager_is_not_billing_admin() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );

        assert!(matches!(h.billing_account_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.billing_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
    }

    #[tokio::test]
    async fn forced_balance_needs_project_admin() {
        let (h, rh) = mock_handler();
        let id = Uuid::new_v4();
        let customer_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}"),
            json!({"id": id, "customer_id": customer_id}),
        );
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/accounts/{id}/balance_add_force"),
            json!({"id": id, "customer_id": customer_id}),
        );

        let admin = agent_with(customer_id, Permission::CUSTOMER_ADMIN);
        assert!(matches!(
            h.billing_account_add_balance_force(&admin, id, 20.0).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().mutations().is_empty());

        let root = agent_with(Uuid::new_v4(), Permission::PROJECT_SUPER_ADMIN);
        h.billing_account_add_balance_force(&root, id, 20.0).await.unwrap();
        assert_eq!(rh.sock().mutations().len(), 1);
    }

    #[tokio::test]
    async fn allowances_are_read_after_account_check() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}"),
            json!({"id": id, "customer_id": a.customer_id}),
        );
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}/allowances"),
            json!([{
                "id": Uuid::new_v4(),
                "account_id": id,
                "tokens_total": 1000,
                "tokens_used": 250
            }]),
        );

        let res = h.billing_account_allowances_get(&a, id, 0, "").await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].tokens_used, 250);

        let sent = rh.sock().requests();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].request.uri.contains("page_size=100"));
    }

    #[tokio::test]
    async fn allowances_of_another_customer_are_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/accounts/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(
            h.billing_account_allowances_get(&a, id, 10, "").await,
            Err(ServiceError::NoPermission)
        ));
        assert_eq!(rh.sock().requests().len(), 1);
    }
}
