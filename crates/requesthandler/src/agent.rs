use async_trait::async_trait;
use models::address::Address;
use models::agent::{Agent, Permission, RingMethod, Status};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// agent-manager RPCs.
#[async_trait]
pub trait AgentRequest: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn agent_v1_agent_create(
        &self,
        customer_id: Uuid,
        username: &str,
        password: &str,
        name: &str,
        detail: &str,
        ring_method: RingMethod,
        permission: Permission,
        tag_ids: &[Uuid],
        addresses: &[Address],
    ) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_get(&self, agent_id: Uuid) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Agent>, RequestError>;
    async fn agent_v1_agent_delete(&self, agent_id: Uuid) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_update(
        &self,
        agent_id: Uuid,
        name: &str,
        detail: &str,
        ring_method: RingMethod,
    ) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_update_addresses(
        &self,
        agent_id: Uuid,
        addresses: &[Address],
    ) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_update_password(
        &self,
        agent_id: Uuid,
        password: &str,
    ) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_update_permission(
        &self,
        agent_id: Uuid,
        permission: Permission,
    ) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_update_status(
        &self,
        agent_id: Uuid,
        status: Status,
    ) -> Result<Agent, RequestError>;
    async fn agent_v1_agent_update_tag_ids(
        &self,
        agent_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Agent, RequestError>;
}

const RESOURCE: &str = "agent/agents";

#[async_trait]
impl<S: Sock> AgentRequest for RequestHandlerClient<S> {
    async fn agent_v1_agent_create(
        &self,
        customer_id: Uuid,
        username: &str,
        password: &str,
        name: &str,
        detail: &str,
        ring_method: RingMethod,
        permission: Permission,
        tag_ids: &[Uuid],
        addresses: &[Address],
    ) -> Result<Agent, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "username": username,
            "password": password,
            "name": name,
            "detail": detail,
            "ring_method": ring_method,
            "permission": permission,
            "tag_ids": tag_ids,
            "addresses": addresses,
        });
        self.request(QueueName::Agent, "/v1/agents", RequestMethod::Post, RESOURCE, Some(data))
            .await
    }

    async fn agent_v1_agent_get(&self, agent_id: Uuid) -> Result<Agent, RequestError> {
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}"),
            RequestMethod::Get,
            RESOURCE,
            None,
        ).await
    }

    async fn agent_v1_agent_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Agent>, RequestError> {
        self.request_list(QueueName::Agent, "/v1/agents", token, size, filters, RESOURCE).await
    }

    async fn agent_v1_agent_delete(&self, agent_id: Uuid) -> Result<Agent, RequestError> {
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}"),
            RequestMethod::Delete,
            RESOURCE,
            None,
        ).await
    }

    async fn agent_v1_agent_update(
        &self,
        agent_id: Uuid,
        name: &str,
        detail: &str,
        ring_method: RingMethod,
    ) -> Result<Agent, RequestError> {
        let data = json!({"name": name, "detail": detail, "ring_method": ring_method});
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }

    async fn agent_v1_agent_update_addresses(
        &self,
        agent_id: Uuid,
        addresses: &[Address],
    ) -> Result<Agent, RequestError> {
        let data = json!({"addresses": addresses});
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}/addresses"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }

    async fn agent_v1_agent_update_password(
        &self,
        agent_id: Uuid,
        password: &str,
    ) -> Result<Agent, RequestError> {
        let data = json!({"password": password});
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}/password"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }

    async fn agent_v1_agent_update_permission(
        &self,
        agent_id: Uuid,
        permission: Permission,
    ) -> Result<Agent, RequestError> {
        let data = json!({"permission": permission});
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}/permission"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }

    async fn agent_v1_agent_update_status(
        &self,
        agent_id: Uuid,
        status: Status,
    ) -> Result<Agent, RequestError> {
        let data = json!({"status": status});
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}/status"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }

    async fn agent_v1_agent_update_tag_ids(
        &self,
        agent_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Agent, RequestError> {
        let data = json!({"tag_ids": tag_ids});
        self.request(
            QueueName::Agent,
            &format!("/v1/agents/{agent_id}/tag_ids"),
            RequestMethod::Put,
            RESOURCE,
            Some(data),
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    fn client() -> RequestHandlerClient<MockSock> {
        RequestHandlerClient::new(MockSock::new(), "api-manager")
    }

    #[tokio::test]
    async fn create_posts_agent_fields() {
        let rh = client();
        let customer_id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Post,
            "/v1/agents",
            json!({"id": Uuid::new_v4(), "customer_id": customer_id, "username": "test1"}),
        );

        let res = rh
            .agent_v1_agent_create(
                customer_id,
                "test1",
                "password1",
                "name",
                "",
                RingMethod::RingAll,
                Permission::CUSTOMER_AGENT,
                &[],
                &[Address::tel("+821100000001")],
            )
            .await
            .unwrap();
        assert_eq!(res.username, "test1");

        let sent = rh.sock().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].queue, "bin-manager.agent-manager.request");
        assert_eq!(sent[0].request.publisher, "api-manager");
        assert_eq!(sent[0].request.data_type, "application/json");
        let data = sent[0].request.data.clone().unwrap();
        assert_eq!(data["ring_method"], "ringall");
        assert_eq!(data["permission"], 0x10);
        assert_eq!(data["addresses"][0]["target"], "+821100000001");
    }

    #[tokio::test]
    async fn list_encodes_page_query_and_filters() {
        let rh = client();
        rh.sock().on(
            RequestMethod::Get,
            "/v1/agents",
            json!([{"username": "a"}, {"username": "b"}]),
        );

        let mut filters = Filters::new();
        filters.insert("deleted".into(), json!(false));
        let res = rh.agent_v1_agent_list("2020-09-20 03:23:20.995000", 10, &filters).await.unwrap();
        assert_eq!(res.len(), 2);

        let sent = &rh.sock().requests()[0].request;
        assert_eq!(sent.uri, "/v1/agents?page_token=2020-09-20+03%3A23%3A20.995000&page_size=10");
        assert_eq!(sent.method, RequestMethod::Get);
        assert_eq!(sent.data, Some(json!({"deleted": false})));
    }

    #[tokio::test]
    async fn get_propagates_status_error() {
        let rh = client();
        let err = rh.agent_v1_agent_get(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
