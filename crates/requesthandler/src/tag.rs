use async_trait::async_trait;
use models::tag::Tag;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// tag-manager RPCs.
#[async_trait]
pub trait TagRequest: Send + Sync {
    async fn tag_v1_tag_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Tag, RequestError>;
    async fn tag_v1_tag_get(&self, tag_id: Uuid) -> Result<Tag, RequestError>;
    async fn tag_v1_tag_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Tag>, RequestError>;
    async fn tag_v1_tag_delete(&self, tag_id: Uuid) -> Result<Tag, RequestError>;
    async fn tag_v1_tag_update(
        &self,
        tag_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Tag, RequestError>;
}

const RESOURCE: &str = "tag/tags";

#[async_trait]
impl<S: Sock> TagRequest for RequestHandlerClient<S> {
    async fn tag_v1_tag_create(
        &self,
        customer_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Tag, RequestError> {
        let data = json!({"customer_id": customer_id, "name": name, "detail": detail});
        self.request(QueueName::Tag, "/v1/tags", RequestMethod::Post, RESOURCE, Some(data)).await
    }

    async fn tag_v1_tag_get(&self, tag_id: Uuid) -> Result<Tag, RequestError> {
        self.request(
            QueueName::Tag,
            &format!("/v1/tags/{tag_id}"),
            RequestMethod::Get,
            RESOURCE,
            None,
        ).await
    }

    async fn tag_v1_tag_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Tag>, RequestError> {
        self.request_list(QueueName::Tag, "/v1/tags", token, size, filters, RESOURCE).await
    }

    async fn tag_v1_tag_delete(&self, tag_id: Uuid) -> Result<Tag, RequestError> {
        self.request(
            QueueName::Tag,
            &format!("/v1/tags/{tag_id}"),
            RequestMethod::Delete,
            RESOURCE,
            None,
        ).await
    }

    async fn tag_v1_tag_update(
        &self,
        tag_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Tag, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Tag,
            &format!("/v1/tags/{tag_id}"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }
}
