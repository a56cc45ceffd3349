//! Outbound routing: carriers (providers) and per-customer routes.
//! Both are project-level configuration, so every operation needs a
//! project admin.

use models::agent::Agent;
use models::route::provider::{self, Provider, ProviderInfo};
use models::route::route::{self, Route};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, deleted_filter, page, ServiceHandler, PERM_PROJECT};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn provider_get_authorized(
        &self,
        a: &Agent,
        provider_id: Uuid,
    ) -> Result<Provider, ServiceError> {
        Self::get_authorized(a, PERM_PROJECT, self.req_handler.route_v1_provider_get(provider_id))
            .await
    }

    async fn route_get_authorized(&self, a: &Agent, route_id: Uuid) -> Result<Route, ServiceError> {
        Self::get_authorized(a, PERM_PROJECT, self.req_handler.route_v1_route_get(route_id)).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn provider_create(
        &self,
        a: &Agent,
        info: &ProviderInfo,
    ) -> Result<provider::WebhookMessage, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to create a provider")?;
        let res = self.req_handler
            .route_v1_provider_create(info)
            .await
            .log_err("could not create a provider")?;
        info!(provider_id = %res.id, "provider_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, provider_id = %provider_id))]
    pub async fn provider_get(
        &self,
        a: &Agent,
        provider_id: Uuid,
    ) -> Result<provider::WebhookMessage, ServiceError> {
        let res = self.provider_get_authorized(a, provider_id)
            .await
            .log_err("could not get the provider")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn provider_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<provider::WebhookMessage>, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to list providers")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .route_v1_provider_list(&token, size, &deleted_filter())
            .await
            .log_err("could not list providers")?;
        Ok(res.iter().map(Provider::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, provider_id = %provider_id))]
    pub async fn provider_delete(
        &self,
        a: &Agent,
        provider_id: Uuid,
    ) -> Result<provider::WebhookMessage, ServiceError> {
        self.provider_get_authorized(a, provider_id).await.log_err("could not get the provider")?;
        let res = self.req_handler
            .route_v1_provider_delete(provider_id)
            .await
            .log_err("could not delete the provider")?;
        info!(provider_id = %res.id, "provider_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, provider_id = %provider_id))]
    pub async fn provider_update(
        &self,
        a: &Agent,
        provider_id: Uuid,
        info: &ProviderInfo,
    ) -> Result<provider::WebhookMessage, ServiceError> {
        self.provider_get_authorized(a, provider_id).await.log_err("could not get the provider")?;
        let res = self.req_handler
            .route_v1_provider_update(provider_id, info)
            .await
            .log_err("could not update the provider")?;
        info!(provider_id = %res.id, "provider_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, route_id = %route_id))]
    pub async fn route_get(
        &self,
        a: &Agent,
        route_id: Uuid,
    ) -> Result<route::WebhookMessage, ServiceError> {
        let res = self.route_get_authorized(a, route_id).await.log_err("could not get the route")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn route_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<route::WebhookMessage>, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to list routes")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .route_v1_route_list(&token, size, &deleted_filter())
            .await
            .log_err("could not list routes")?;
        Ok(res.iter().map(Route::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, target_customer_id = %customer_id))]
    pub async fn route_list_by_customer_id(
        &self,
        a: &Agent,
        customer_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<route::WebhookMessage>, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to list routes")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .route_v1_route_list(&token, size, &customer_filters(customer_id))
            .await
            .log_err("could not list routes")?;
        Ok(res.iter().map(Route::convert_webhook_message).collect())
    }

    /// A nil `customer_id` creates a default route shared by every customer.
    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            target_customer_id = %customer_id,
            provider_id = %provider_id,
        )
    )]
    pub async fn route_create(
        &self,
        a: &Agent,
        customer_id: Uuid,
        name: &str,
        detail: &str,
        provider_id: Uuid,
        priority: i32,
        target: &str,
    ) -> Result<route::WebhookMessage, ServiceError> {
        self.provider_get_authorized(a, provider_id).await.log_err("could not get the provider")?;
        let res = self.req_handler
            .route_v1_route_create(customer_id, name, detail, provider_id, priority, target)
            .await
            .log_err("could not create a route")?;
        info!(route_id = %res.id, "route_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, route_id = %route_id))]
    pub async fn route_delete(
        &self,
        a: &Agent,
        route_id: Uuid,
    ) -> Result<route::WebhookMessage, ServiceError> {
        self.route_get_authorized(a, route_id).await.log_err("could not get the route")?;
        let res = self.req_handler
            .route_v1_route_delete(route_id)
            .await
            .log_err("could not delete the route")?;
        info!(route_id = %res.id, "route_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, route_id = %route_id))]
    pub async fn route_update(
        &self,
        a: &Agent,
        route_id: Uuid,
        name: &str,
        detail: &str,
        provider_id: Uuid,
        priority: i32,
        target: &str,
    ) -> Result<route::WebhookMessage, ServiceError> {
        self.route_get_authorized(a, route_id).await.log_err("could not get the route")?;
        self.provider_get_authorized(a, provider_id).await.log_err("could not get the provider")?;

        let res = self.req_handler
            .route_v1_route_update(route_id, name, detail, provider_id, priority, target)
            .await
            .log_err("could not update the route")?;
        info!(route_id = %res.id, priority = res.priority, "route_updated");
        Ok(res.convert_webhook_message())
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
    async fn customer_admin_cannot_touch_providers() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ALL);
        let id = Uuid::new_v4();
        rh.sock().on(RequestMethod::Get, &format!("/v1/providers/{id}"), json!({"id": id}));

        assert!(matches!(h.provider_get(&a, id).await, Err(ServiceError::NoPermission)));
        assert!(matches!(h.provider_list(&a, 10, "").await, Err(ServiceError::NoPermission)));
    }

    #[tokio::test]
    async fn routes_listed_for_the_given_customer() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::PROJECT_SUPER_ADMIN);
        let customer_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            "/v1/routes",
            json!([{"id": Uuid::new_v4(), "customer_id": customer_id, "priority": 1}]),
        );

        let res = h.route_list_by_customer_id(&a, customer_id, 0, "").await.unwrap();
        assert_eq!(res[0].customer_id, customer_id);
        let sent = rh.sock().find(RequestMethod::Get, "/v1/routes").unwrap();
        assert!(sent.request.uri.contains("page_size=100"));
        assert_eq!(sent.request.data.unwrap()["customer_id"], json!(customer_id));
    }

    #[tokio::test]
    async fn route_create_needs_live_provider() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::PROJECT_SUPER_ADMIN);
        let provider_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/providers/{provider_id}"),
            json!({"id": provider_id, "tm_delete": "2024-01-01 00:00:00.000000"}),
        );

        let err = h.route_create(&a, Uuid::nil(), "default", "", provider_id, 1, "+82")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
        assert!(rh.sock().mutations().is_empty());
    }
}
