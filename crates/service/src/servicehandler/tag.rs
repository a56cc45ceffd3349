use models::agent::Agent;
use models::tag::{self, Tag};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn tag_get_authorized(&self, a: &Agent, tag_id: Uuid) -> Result<Tag, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.tag_v1_tag_get(tag_id)).await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn tag_create(
        &self,
        a: &Agent,
        name: &str,
        detail: &str,
    ) -> Result<tag::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a tag")?;
        let res = self.req_handler
            .tag_v1_tag_create(a.customer_id, name, detail)
            .await
            .log_err("could not create a tag")?;
        info!(tag_id = %res.id, "tag_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, tag_id = %tag_id))]
    pub async fn tag_get(
        &self,
        a: &Agent,
        tag_id: Uuid,
    ) -> Result<tag::WebhookMessage, ServiceError> {
        let res = self.tag_get_authorized(a, tag_id).await.log_err("could not get the tag")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn tag_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<tag::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list tags")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .tag_v1_tag_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list tags")?;
        Ok(res.iter().map(Tag::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, tag_id = %tag_id))]
    pub async fn tag_delete(
        &self,
        a: &Agent,
        tag_id: Uuid,
    ) -> Result<tag::WebhookMessage, ServiceError> {
        self.tag_get_authorized(a, tag_id).await.log_err("could not get the tag")?;
        let res = self.req_handler
            .tag_v1_tag_delete(tag_id)
            .await
            .log_err("could not delete the tag")?;
        info!(tag_id = %res.id, "tag_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, tag_id = %tag_id))]
    pub async fn tag_update(
        &self,
        a: &Agent,
        tag_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<tag::WebhookMessage, ServiceError> {
        self.tag_get_authorized(a, tag_id).await.log_err("could not get the tag")?;
        let res = self.req_handler
            .tag_v1_tag_update(tag_id, name, detail)
            .await
            .log_err("could not update the tag")?;
        info!(tag_id = %res.id, "tag_updated");
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
    async fn tag_list_is_scoped_to_caller() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_MANAGER);
        rh.sock().on(
            RequestMethod::Get,
            "/v1/tags",
            json!([{"id": Uuid::new_v4(), "customer_id": a.customer_id, "name": "sales"}]),
        );

        let res = h.tag_list(&a, 10, "2024-01-01 00:00:00.000000").await.unwrap();
        assert_eq!(res[0].name, "sales");
        let data = rh.sock().find(RequestMethod::Get, "/v1/tags").unwrap().request.data.unwrap();
        assert_eq!(data["customer_id"], json!(a.customer_id));
        assert_eq!(data["deleted"], json!(false));
    }

    #[tokio::test]
    async fn tag_update_of_other_customer_is_denied() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            &format!("/v1/tags/{id}"),
            json!({"id": id, "customer_id": Uuid::new_v4()}),
        );

        assert!(matches!(h.tag_update(&a, id, "n", "d").await, Err(ServiceError::NoPermission)));
        assert!(rh.sock().mutations().is_empty());
    }
}
