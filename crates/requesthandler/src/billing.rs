use async_trait::async_trait;
use models::billing::account::{Account, PaymentMethod, PaymentType};
use models::billing::allowance::Allowance;
use models::billing::billing::Billing;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// billing-manager RPCs.
#[async_trait]
pub trait BillingRequest: Send + Sync {
    async fn billing_v1_account_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        payment_type: PaymentType,
        payment_method: PaymentMethod,
    ) -> Result<Account, RequestError>;
    async fn billing_v1_account_get(&self, account_id: Uuid) -> Result<Account, RequestError>;
    async fn billing_v1_account_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Account>, RequestError>;
    async fn billing_v1_account_delete(&self, account_id: Uuid) -> Result<Account, RequestError>;
    async fn billing_v1_account_add_balance_force(
        &self,
        account_id: Uuid,
        balance: f32,
    ) -> Result<Account, RequestError>;
    async fn billing_v1_account_subtract_balance_force(
        &self,
        account_id: Uuid,
        balance: f32,
    ) -> Result<Account, RequestError>;
    async fn billing_v1_account_update_basic_info(
        &self,
        account_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Account, RequestError>;
    async fn billing_v1_account_update_payment_info(
        &self,
        account_id: Uuid,
        payment_type: PaymentType,
        payment_method: PaymentMethod,
    ) -> Result<Account, RequestError>;
    async fn billing_v1_account_allowances_get(
        &self,
        account_id: Uuid,
        token: &str,
        size: u64,
    ) -> Result<Vec<Allowance>, RequestError>;

    async fn billing_v1_billing_get(&self, billing_id: Uuid) -> Result<Billing, RequestError>;
    async fn billing_v1_billing_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Billing>, RequestError>;
}

const RESOURCE_ACCOUNT: &str = "billing/accounts";
const RESOURCE_BILLING: &str = "billing/billings";

#[async_trait]
impl<S: Sock> BillingRequest for RequestHandlerClient<S> {
    async fn billing_v1_account_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        payment_type: PaymentType,
        payment_method: PaymentMethod,
    ) -> Result<Account, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "name": name,
            "detail": detail,
            "payment_type": payment_type,
            "payment_method": payment_method,
        });
        self.request(
            QueueName::Billing,
            "/v1/accounts",
            RequestMethod::Post,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn billing_v1_account_get(&self, account_id: Uuid) -> Result<Account, RequestError> {
        self.request(
            QueueName::Billing,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Get,
            RESOURCE_ACCOUNT,
            None,
        ).await
    }

    async fn billing_v1_account_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Account>, RequestError> {
        self.request_list(
            QueueName::Billing,
            "/v1/accounts",
            token,
            size,
            filters,
            RESOURCE_ACCOUNT,
        ).await
    }

    async fn billing_v1_account_delete(&self, account_id: Uuid) -> Result<Account, RequestError> {
        self.request(
            QueueName::Billing,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Delete,
            RESOURCE_ACCOUNT,
            None,
        ).await
    }

    async fn billing_v1_account_add_balance_force(
        &self,
        account_id: Uuid,
        balance: f32,
    ) -> Result<Account, RequestError> {
        let data = json!({"balance": balance});
        self.request(
            QueueName::Billing,
            &format!("/v1/accounts/{account_id}/balance_add_force"),
            RequestMethod::Post,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn billing_v1_account_subtract_balance_force(
        &self,
        account_id: Uuid,
        balance: f32,
    ) -> Result<Account, RequestError> {
        let data = json!({"balance": balance});
        self.request(
            QueueName::Billing,
            &format!("/v1/accounts/{account_id}/balance_subtract_force"),
            RequestMethod::Post,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn billing_v1_account_update_basic_info(
        &self,
        account_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Account, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Billing,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Put,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn billing_v1_account_update_payment_info(
        &self,
        account_id: Uuid,
        payment_type: PaymentType,
        payment_method: PaymentMethod,
    ) -> Result<Account, RequestError> {
        let data = json!({"payment_type": payment_type, "payment_method": payment_method});
        self.request(
            QueueName::Billing,
            &format!("/v1/accounts/{account_id}/payment_info"),
            RequestMethod::Put,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn billing_v1_account_allowances_get(
        &self,
        account_id: Uuid,
        token: &str,
        size: u64,
    ) -> Result<Vec<Allowance>, RequestError> {
        let base = format!("/v1/accounts/{account_id}/allowances");
        self.request_list(QueueName::Billing, &base, token, size, &Filters::new(), RESOURCE_ACCOUNT)
            .await
    }

    async fn billing_v1_billing_get(&self, billing_id: Uuid) -> Result<Billing, RequestError> {
        self.request(
            QueueName::Billing,
            &format!("/v1/billings/{billing_id}"),
            RequestMethod::Get,
            RESOURCE_BILLING,
            None,
        ).await
    }

    async fn billing_v1_billing_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Billing>, RequestError> {
        self.request_list(
            QueueName::Billing,
            "/v1/billings",
            token,
            size,
            filters,
            RESOURCE_BILLING,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn balance_add_force_posts_amount() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/accounts/{id}/balance_add_force"),
            json!({"id": id, "balance": 30.5}),
        );

        let res = rh.billing_v1_account_add_balance_force(id, 20.0).await.unwrap();
        assert_eq!(res.balance, 30.5);

        let sent = &rh.sock().requests()[0];
        assert_eq!(sent.queue, "bin-manager.billing-manager.request");
        assert_eq!(sent.request.data, Some(json!({"balance": 20.0})));
    }

    #[tokio::test]
    async fn allowances_are_paged_per_account() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        let path = format!("/v1/accounts/{id}/allowances");
        rh.sock().on(
            RequestMethod::Get,
            &path,
            json!([{"account_id": id, "tokens_total": 10000, "tokens_used": 3500}]),
        );

        let res = rh.billing_v1_account_allowances_get(id, "2026-02-15 00:00:00.000000", 10)
            .await
            .unwrap();
        assert_eq!(res[0].tokens_used, 3500);
        assert!(rh.sock().requests()[0].request.uri.ends_with("&page_size=10"));
    }
}
