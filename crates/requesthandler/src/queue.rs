use async_trait::async_trait;
use models::flow::action::Action;
use models::queue::queue::{Queue, QueueInfo, RoutingMethod};
use models::queue::queuecall::Queuecall;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// queue-manager RPCs.
#[async_trait]
pub trait QueueRequest: Send + Sync {
    async fn queue_v1_queue_create(
        &self,
        customer_id: Uuid,
        info: &QueueInfo,
    ) -> Result<Queue, RequestError>;
    async fn queue_v1_queue_get(&self, queue_id: Uuid) -> Result<Queue, RequestError>;
    async fn queue_v1_queue_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Queue>, RequestError>;
    async fn queue_v1_queue_delete(&self, queue_id: Uuid) -> Result<Queue, RequestError>;
    async fn queue_v1_queue_update(
        &self,
        queue_id: Uuid,
        info: &QueueInfo,
    ) -> Result<Queue, RequestError>;
    async fn queue_v1_queue_update_tag_ids(
        &self,
        queue_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Queue, RequestError>;
    async fn queue_v1_queue_update_routing_method(
        &self,
        queue_id: Uuid,
        routing_method: RoutingMethod,
    ) -> Result<Queue, RequestError>;
    async fn queue_v1_queue_update_actions(
        &self,
        queue_id: Uuid,
        wait_actions: &[Action],
        wait_timeout: i32,
        service_timeout: i32,
    ) -> Result<Queue, RequestError>;

    async fn queue_v1_queuecall_get(&self, queuecall_id: Uuid) -> Result<Queuecall, RequestError>;
    async fn queue_v1_queuecall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Queuecall>, RequestError>;
    async fn queue_v1_queuecall_delete(
        &self,
        queuecall_id: Uuid,
    ) -> Result<Queuecall, RequestError>;
    async fn queue_v1_queuecall_get_by_reference_id(
        &self,
        reference_id: Uuid,
    ) -> Result<Queuecall, RequestError>;
    async fn queue_v1_queuecall_kick(&self, queuecall_id: Uuid) -> Result<Queuecall, RequestError>;
    async fn queue_v1_queuecall_kick_by_reference_id(
        &self,
        reference_id: Uuid,
    ) -> Result<Queuecall, RequestError>;
}

const RESOURCE_QUEUE: &str = "queue/queues";
const RESOURCE_QUEUECALL: &str = "queue/queuecalls";

fn info_body(info: &QueueInfo) -> serde_json::Value {
    json!({
        "name": info.name,
        "detail": info.detail,
        "routing_method": info.routing_method,
        "tag_ids": info.tag_ids,
        "wait_actions": info.wait_actions,
        "wait_timeout": info.wait_timeout,
        "service_timeout": info.service_timeout,
    })
}

#[async_trait]
impl<S: Sock> QueueRequest for RequestHandlerClient<S> {
    async fn queue_v1_queue_create(
        &self,
        customer_id: Uuid,
        info: &QueueInfo,
    ) -> Result<Queue, RequestError> {
        let mut data = info_body(info);
        data["customer_id"] = json!(customer_id);
        self.request(
            QueueName::Queue,
            "/v1/queues",
            RequestMethod::Post,
            RESOURCE_QUEUE,
            Some(data),
        ).await
    }

    async fn queue_v1_queue_get(&self, queue_id: Uuid) -> Result<Queue, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queues/{queue_id}"),
            RequestMethod::Get,
            RESOURCE_QUEUE,
            None,
        ).await
    }

    async fn queue_v1_queue_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Queue>, RequestError> {
        self.request_list(QueueName::Queue, "/v1/queues", token, size, filters, RESOURCE_QUEUE)
            .await
    }

    async fn queue_v1_queue_delete(&self, queue_id: Uuid) -> Result<Queue, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queues/{queue_id}"),
            RequestMethod::Delete,
            RESOURCE_QUEUE,
            None,
        ).await
    }

    async fn queue_v1_queue_update(
        &self,
        queue_id: Uuid,
        info: &QueueInfo,
    ) -> Result<Queue, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queues/{queue_id}"),
            RequestMethod::Put,
            RESOURCE_QUEUE,
            Some(info_body(info)),
        ).await
    }

    async fn queue_v1_queue_update_tag_ids(
        &self,
        queue_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Queue, RequestError> {
        let data = json!({"tag_ids": tag_ids});
        self.request(
            QueueName::Queue,
            &format!("/v1/queues/{queue_id}/tag_ids"),
            RequestMethod::Put,
            RESOURCE_QUEUE,
            Some(data),
        ).await
    }

    async fn queue_v1_queue_update_routing_method(
        &self,
        queue_id: Uuid,
        routing_method: RoutingMethod,
    ) -> Result<Queue, RequestError> {
        let data = json!({"routing_method": routing_method});
        self.request(
            QueueName::Queue,
            &format!("/v1/queues/{queue_id}/routing_method"),
            RequestMethod::Put,
            RESOURCE_QUEUE,
            Some(data),
        ).await
    }

    async fn queue_v1_queue_update_actions(
        &self,
        queue_id: Uuid,
        wait_actions: &[Action],
        wait_timeout: i32,
        service_timeout: i32,
    ) -> Result<Queue, RequestError> {
        let data = json!({
            "wait_actions": wait_actions,
            "wait_timeout": wait_timeout,
            "service_timeout": service_timeout
        });
        self.request(
            QueueName::Queue,
            &format!("/v1/queues/{queue_id}/wait_actions"),
            RequestMethod::Put,
            RESOURCE_QUEUE,
            Some(data),
        ).await
    }

    async fn queue_v1_queuecall_get(&self, queuecall_id: Uuid) -> Result<Queuecall, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queuecalls/{queuecall_id}"),
            RequestMethod::Get,
            RESOURCE_QUEUECALL,
            None,
        ).await
    }

    async fn queue_v1_queuecall_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Queuecall>, RequestError> {
        self.request_list(
            QueueName::Queue,
            "/v1/queuecalls",
            token,
            size,
            filters,
            RESOURCE_QUEUECALL,
        ).await
    }

    async fn queue_v1_queuecall_delete(
        &self,
        queuecall_id: Uuid,
    ) -> Result<Queuecall, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queuecalls/{queuecall_id}"),
            RequestMethod::Delete,
            RESOURCE_QUEUECALL,
            None,
        ).await
    }

    async fn queue_v1_queuecall_get_by_reference_id(
        &self,
        reference_id: Uuid,
    ) -> Result<Queuecall, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queuecalls/reference_id/{reference_id}"),
            RequestMethod::Get,
            RESOURCE_QUEUECALL,
            None,
        ).await
    }

    async fn queue_v1_queuecall_kick(&self, queuecall_id: Uuid) -> Result<Queuecall, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queuecalls/{queuecall_id}/kick"),
            RequestMethod::Post,
            RESOURCE_QUEUECALL,
            None,
        ).await
    }

    async fn queue_v1_queuecall_kick_by_reference_id(
        &self,
        reference_id: Uuid,
    ) -> Result<Queuecall, RequestError> {
        self.request(
            QueueName::Queue,
            &format!("/v1/queuecalls/reference_id/{reference_id}/kick"),
            RequestMethod::Post,
            RESOURCE_QUEUECALL,
            None,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn create_merges_customer_into_info() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        rh.sock().on(
            RequestMethod::Post,
            "/v1/queues",
            json!({"name": "sales", "routing_method": "random"}),
        );

        let customer_id = Uuid::new_v4();
        let info = QueueInfo {
            name: "sales".into(),
            routing_method: RoutingMethod::Random,
            wait_timeout: 60000,
            ..Default::default()
        };
        let res = rh.queue_v1_queue_create(customer_id, &info).await.unwrap();
        assert_eq!(res.routing_method, RoutingMethod::Random);

        let data = rh.sock().requests()[0].request.data.clone().unwrap();
        assert_eq!(data["customer_id"], json!(customer_id));
        assert_eq!(data["wait_timeout"], 60000);
    }
}
