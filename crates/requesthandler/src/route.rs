use async_trait::async_trait;
use models::route::provider::{Provider, ProviderInfo};
use models::route::route::Route;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::send_request::to_data;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// route-manager RPCs.
#[async_trait]
pub trait RouteRequest: Send + Sync {
    async fn route_v1_provider_create(&self, info: &ProviderInfo) -> Result<Provider, RequestError>;
    async fn route_v1_provider_get(&self, provider_id: Uuid) -> Result<Provider, RequestError>;
    async fn route_v1_provider_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Provider>, RequestError>;
    async fn route_v1_provider_delete(&self, provider_id: Uuid) -> Result<Provider, RequestError>;
    async fn route_v1_provider_update(
        &self,
        provider_id: Uuid,
        info: &ProviderInfo,
    ) -> Result<Provider, RequestError>;

    async fn route_v1_route_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        provider_id: Uuid,
        priority: i32,
        target: &str,
    ) -> Result<Route, RequestError>;
    async fn route_v1_route_get(&self, route_id: Uuid) -> Result<Route, RequestError>;
    async fn route_v1_route_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Route>, RequestError>;
    async fn route_v1_route_delete(&self, route_id: Uuid) -> Result<Route, RequestError>;
    async fn route_v1_route_update(
        &self,
        route_id: Uuid,
        name: &str,
        detail: &str,
        provider_id: Uuid,
        priority: i32,
        target: &str,
    ) -> Result<Route, RequestError>;
}

const RESOURCE_PROVIDER: &str = "route/providers";
const RESOURCE_ROUTE: &str = "route/routes";

#[async_trait]
impl<S: Sock> RouteRequest for RequestHandlerClient<S> {
    async fn route_v1_provider_create(
        &self,
        info: &ProviderInfo,
    ) -> Result<Provider, RequestError> {
        self.request(
            QueueName::Route,
            "/v1/providers",
            RequestMethod::Post,
            RESOURCE_PROVIDER,
            to_data(info)?,
        ).await
    }

    async fn route_v1_provider_get(&self, provider_id: Uuid) -> Result<Provider, RequestError> {
        self.request(
            QueueName::Route,
            &format!("/v1/providers/{provider_id}"),
            RequestMethod::Get,
            RESOURCE_PROVIDER,
            None,
        ).await
    }

    async fn route_v1_provider_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Provider>, RequestError> {
        self.request_list(
            QueueName::Route,
            "/v1/providers",
            token,
            size,
            filters,
            RESOURCE_PROVIDER,
        ).await
    }

    async fn route_v1_provider_delete(&self, provider_id: Uuid) -> Result<Provider, RequestError> {
        self.request(
            QueueName::Route,
            &format!("/v1/providers/{provider_id}"),
            RequestMethod::Delete,
            RESOURCE_PROVIDER,
            None,
        ).await
    }

    async fn route_v1_provider_update(
        &self,
        provider_id: Uuid,
        info: &ProviderInfo,
    ) -> Result<Provider, RequestError> {
        self.request(
            QueueName::Route,
            &format!("/v1/providers/{provider_id}"),
            RequestMethod::Put,
            RESOURCE_PROVIDER,
            to_data(info)?,
        ).await
    }

    async fn route_v1_route_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        provider_id: Uuid,
        priority: i32,
        target: &str,
    ) -> Result<Route, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "name": name,
            "detail": detail,
            "provider_id": provider_id,
            "priority": priority,
            "target": target
        });
        self.request(
            QueueName::Route,
            "/v1/routes",
            RequestMethod::Post,
            RESOURCE_ROUTE,
            Some(data),
        ).await
    }

    async fn route_v1_route_get(&self, route_id: Uuid) -> Result<Route, RequestError> {
        self.request(
            QueueName::Route,
            &format!("/v1/routes/{route_id}"),
            RequestMethod::Get,
            RESOURCE_ROUTE,
            None,
        ).await
    }

    async fn route_v1_route_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Route>, RequestError> {
        self.request_list(QueueName::Route, "/v1/routes", token, size, filters, RESOURCE_ROUTE)
            .await
    }

    async fn route_v1_route_delete(&self, route_id: Uuid) -> Result<Route, RequestError> {
        self.request(
            QueueName::Route,
            &format!("/v1/routes/{route_id}"),
            RequestMethod::Delete,
            RESOURCE_ROUTE,
            None,
        ).await
    }

    async fn route_v1_route_update(
        &self,
        route_id: Uuid,
        name: &str,
        detail: &str,
        provider_id: Uuid,
        priority: i32,
        target: &str,
    ) -> Result<Route, RequestError> {
        let data = json!({
            "name": name,
            "detail": detail,
            "provider_id": provider_id,
            "priority": priority,
            "target": target
        });
        self.request(
            QueueName::Route,
            &format!("/v1/routes/{route_id}"),
            RequestMethod::Put,
            RESOURCE_ROUTE,
            Some(data),
        ).await
    }
}
