use async_trait::async_trait;
use models::customer::{Customer, CustomerInfo};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::to_data;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// customer-manager RPCs.
#[async_trait]
pub trait CustomerRequest: Send + Sync {
    async fn customer_v1_customer_create(
        &self,
        info: &CustomerInfo,
    ) -> Result<Customer, RequestError>;
    async fn customer_v1_customer_get(&self, customer_id: Uuid) -> Result<Customer, RequestError>;
    async fn customer_v1_customer_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Customer>, RequestError>;
    async fn customer_v1_customer_update(
        &self,
        customer_id: Uuid,
        info: &CustomerInfo,
    ) -> Result<Customer, RequestError>;
    async fn customer_v1_customer_delete(
        &self,
        customer_id: Uuid,
    ) -> Result<Customer, RequestError>;
    async fn customer_v1_customer_update_billing_account_id(
        &self,
        customer_id: Uuid,
        billing_account_id: Uuid,
    ) -> Result<Customer, RequestError>;
}

const RESOURCE: &str = "customer/customers";

#[async_trait]
impl<S: Sock> CustomerRequest for RequestHandlerClient<S> {
    async fn customer_v1_customer_create(
        &self,
        info: &CustomerInfo,
    ) -> Result<Customer, RequestError> {
        self.request(
            QueueName::Customer,
            "/v1/customers",
            RequestMethod::Post,
            RESOURCE,
            to_data(info)?,
        ).await
    }

    async fn customer_v1_customer_get(&self, customer_id: Uuid) -> Result<Customer, RequestError> {
        self.request(
            QueueName::Customer,
            &format!("/v1/customers/{customer_id}"),
            RequestMethod::Get,
            RESOURCE,
            None,
        ).await
    }

    async fn customer_v1_customer_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Customer>, RequestError> {
        self.request_list(QueueName::Customer, "/v1/customers", token, size, filters, RESOURCE)
            .await
    }

    async fn customer_v1_customer_update(
        &self,
        customer_id: Uuid,
        info: &CustomerInfo,
    ) -> Result<Customer, RequestError> {
        self.request(
            QueueName::Customer,
            &format!("/v1/customers/{customer_id}"),
            RequestMethod::Put,
            RESOURCE,
            to_data(info)?,
        ).await
    }

    async fn customer_v1_customer_delete(
        &self,
        customer_id: Uuid,
    ) -> Result<Customer, RequestError> {
        self.request(
            QueueName::Customer,
            &format!("/v1/customers/{customer_id}"),
            RequestMethod::Delete,
            RESOURCE,
            None,
        ).await
    }

    async fn customer_v1_customer_update_billing_account_id(
        &self,
        customer_id: Uuid,
        billing_account_id: Uuid,
    ) -> Result<Customer, RequestError> {
        let data = json!({"billing_account_id": billing_account_id});
        self.request(
            QueueName::Customer,
            &format!("/v1/customers/{customer_id}/billing_account_id"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }
}
