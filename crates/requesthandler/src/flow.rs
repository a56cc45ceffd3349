use async_trait::async_trait;
use models::flow::action::Action;
use models::flow::activeflow::Activeflow;
use models::flow::flow::Flow;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// flow-manager RPCs.
#[async_trait]
pub trait FlowRequest: Send + Sync {
    /// `persist = false` creates a throwaway flow the flow-manager drops once executed.
    async fn flow_v1_flow_create(
        &self,
        customer_id: Uuid,
        flow_type: &str,
        name: &str,
        detail: &str,
        actions: &[Action],
        persist: bool,
    ) -> Result<Flow, RequestError>;
    async fn flow_v1_flow_get(&self, flow_id: Uuid) -> Result<Flow, RequestError>;
    async fn flow_v1_flow_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Flow>, RequestError>;
    async fn flow_v1_flow_delete(&self, flow_id: Uuid) -> Result<Flow, RequestError>;
    async fn flow_v1_flow_update(
        &self,
        flow_id: Uuid,
        name: &str,
        detail: &str,
        actions: &[Action],
    ) -> Result<Flow, RequestError>;

    async fn flow_v1_activeflow_create(
        &self,
        activeflow_id: Uuid,
        customer_id: Uuid,
        flow_id: Uuid,
        reference_type: &str,
        reference_id: Uuid,
    ) -> Result<Activeflow, RequestError>;
    async fn flow_v1_activeflow_get(&self, activeflow_id: Uuid) -> Result<Activeflow, RequestError>;
    async fn flow_v1_activeflow_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Activeflow>, RequestError>;
    async fn flow_v1_activeflow_delete(
        &self,
        activeflow_id: Uuid,
    ) -> Result<Activeflow, RequestError>;
    async fn flow_v1_activeflow_stop(
        &self,
        activeflow_id: Uuid,
    ) -> Result<Activeflow, RequestError>;
}

const RESOURCE_FLOW: &str = "flow/flows";
const RESOURCE_ACTIVEFLOW: &str = "flow/activeflows";

#[async_trait]
impl<S: Sock> FlowRequest for RequestHandlerClient<S> {
    async fn flow_v1_flow_create(
        &self,
        customer_id: Uuid,
        flow_type: &str,
        name: &str,
        detail: &str,
        actions: &[Action],
        persist: bool,
    ) -> Result<Flow, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "type": flow_type,
            "name": name,
            "detail": detail,
            "actions": actions,
            "persist": persist,
        });
        self.request(QueueName::Flow, "/v1/flows", RequestMethod::Post, RESOURCE_FLOW, Some(data))
            .await
    }

    async fn flow_v1_flow_get(&self, flow_id: Uuid) -> Result<Flow, RequestError> {
        self.request(
            QueueName::Flow,
            &format!("/v1/flows/{flow_id}"),
            RequestMethod::Get,
            RESOURCE_FLOW,
            None,
        ).await
    }

    async fn flow_v1_flow_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Flow>, RequestError> {
        self.request_list(QueueName::Flow, "/v1/flows", token, size, filters, RESOURCE_FLOW).await
    }

    async fn flow_v1_flow_delete(&self, flow_id: Uuid) -> Result<Flow, RequestError> {
        self.request(
            QueueName::Flow,
            &format!("/v1/flows/{flow_id}"),
            RequestMethod::Delete,
            RESOURCE_FLOW,
            None,
        ).await
    }

    async fn flow_v1_flow_update(
        &self,
        flow_id: Uuid,
        name: &str,
        detail: &str,
        actions: &[Action],
    ) -> Result<Flow, RequestError> {
        let data = json!({"name": name, "detail": detail, "actions": actions});
        self.request(
            QueueName::Flow,
            &format!("/v1/flows/{flow_id}"),
            RequestMethod::Put,
            RESOURCE_FLOW,
            Some(data),
        ).await
    }

    async fn flow_v1_activeflow_create(
        &self,
        activeflow_id: Uuid,
        customer_id: Uuid,
        flow_id: Uuid,
        reference_type: &str,
        reference_id: Uuid,
    ) -> Result<Activeflow, RequestError> {
        let data = json!({
            "id": activeflow_id,
            "customer_id": customer_id,
            "flow_id": flow_id,
            "reference_type": reference_type,
            "reference_id": reference_id,
        });
        self.request(
            QueueName::Flow,
            "/v1/activeflows",
            RequestMethod::Post,
            RESOURCE_ACTIVEFLOW,
            Some(data),
        ).await
    }

    async fn flow_v1_activeflow_get(
        &self,
        activeflow_id: Uuid,
    ) -> Result<Activeflow, RequestError> {
        self.request(
            QueueName::Flow,
            &format!("/v1/activeflows/{activeflow_id}"),
            RequestMethod::Get,
            RESOURCE_ACTIVEFLOW,
            None,
        ).await
    }

    async fn flow_v1_activeflow_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Activeflow>, RequestError> {
        self.request_list(
            QueueName::Flow,
            "/v1/activeflows",
            token,
            size,
            filters,
            RESOURCE_ACTIVEFLOW,
        ).await
    }

    async fn flow_v1_activeflow_delete(
        &self,
        activeflow_id: Uuid,
    ) -> Result<Activeflow, RequestError> {
        self.request(
            QueueName::Flow,
            &format!("/v1/activeflows/{activeflow_id}"),
            RequestMethod::Delete,
            RESOURCE_ACTIVEFLOW,
            None,
        ).await
    }

    async fn flow_v1_activeflow_stop(
        &self,
        activeflow_id: Uuid,
    ) -> Result<Activeflow, RequestError> {
        self.request(
            QueueName::Flow,
            &format!("/v1/activeflows/{activeflow_id}/stop"),
            RequestMethod::Post,
            RESOURCE_ACTIVEFLOW,
            None,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn flow_create_sends_persist_flag() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        rh.sock().on(
            RequestMethod::Post,
            "/v1/flows",
            json!({"id": Uuid::new_v4(), "name": "tmp"}),
        );

        let actions = vec![Action::new("answer", serde_json::Value::Null)];
        rh.flow_v1_flow_create(Uuid::new_v4(), "flow", "tmp", "tmp outbound flow", &actions, false)
            .await
            .unwrap();

        let data = rh.sock().requests()[0].request.data.clone().unwrap();
        assert_eq!(data["persist"], false);
        assert_eq!(data["type"], "flow");
        assert_eq!(data["actions"][0]["type"], "answer");
    }

    #[tokio::test]
    async fn activeflow_stop_posts_to_stop() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            &format!("/v1/activeflows/{id}/stop"),
            json!({"id": id, "status": "ended"}),
        );

        let res = rh.flow_v1_activeflow_stop(id).await.unwrap();
        assert_eq!(res.status, "ended");
    }
}
