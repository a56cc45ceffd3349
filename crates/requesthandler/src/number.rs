use async_trait::async_trait;
use models::number::available_number::AvailableNumber;
use models::number::number::Number;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// number-manager RPCs.
#[async_trait]
pub trait NumberRequest: Send + Sync {
    async fn number_v1_number_create(
        &self,
        customer_id: Uuid,
        number: &str,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Number, RequestError>;
    async fn number_v1_number_get(&self, number_id: Uuid) -> Result<Number, RequestError>;
    async fn number_v1_number_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Number>, RequestError>;
    async fn number_v1_number_delete(&self, number_id: Uuid) -> Result<Number, RequestError>;
    async fn number_v1_number_update(
        &self,
        number_id: Uuid,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Number, RequestError>;
    async fn number_v1_number_update_flow_ids(
        &self,
        number_id: Uuid,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
    ) -> Result<Number, RequestError>;
    /// Renew every number whose last renewal is older than `tm_renew`.
    async fn number_v1_number_renew(&self, tm_renew: &str) -> Result<Vec<Number>, RequestError>;

    async fn number_v1_available_number_list(
        &self,
        customer_id: Uuid,
        size: u64,
        country_code: &str,
    ) -> Result<Vec<AvailableNumber>, RequestError>;
}

const RESOURCE_NUMBER: &str = "number/numbers";
const RESOURCE_AVAILABLE_NUMBER: &str = "number/available_numbers";

#[async_trait]
impl<S: Sock> NumberRequest for RequestHandlerClient<S> {
    async fn number_v1_number_create(
        &self,
        customer_id: Uuid,
        number: &str,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Number, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "number": number,
            "call_flow_id": call_flow_id,
            "message_flow_id": message_flow_id,
            "name": name,
            "detail": detail,
        });
        self.request(
            QueueName::Number,
            "/v1/numbers",
            RequestMethod::Post,
            RESOURCE_NUMBER,
            Some(data),
        ).await
    }

    async fn number_v1_number_get(&self, number_id: Uuid) -> Result<Number, RequestError> {
        self.request(
            QueueName::Number,
            &format!("/v1/numbers/{number_id}"),
            RequestMethod::Get,
            RESOURCE_NUMBER,
            None,
        ).await
    }

    async fn number_v1_number_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Number>, RequestError> {
        self.request_list(QueueName::Number, "/v1/numbers", token, size, filters, RESOURCE_NUMBER)
            .await
    }

    async fn number_v1_number_delete(&self, number_id: Uuid) -> Result<Number, RequestError> {
        self.request(
            QueueName::Number,
            &format!("/v1/numbers/{number_id}"),
            RequestMethod::Delete,
            RESOURCE_NUMBER,
            None,
        ).await
    }

    async fn number_v1_number_update(
        &self,
        number_id: Uuid,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Number, RequestError> {
        let data = json!({
            "call_flow_id": call_flow_id,
            "message_flow_id": message_flow_id,
            "name": name,
            "detail": detail
        });
        self.request(
            QueueName::Number,
            &format!("/v1/numbers/{number_id}"),
            RequestMethod::Put,
            RESOURCE_NUMBER,
            Some(data),
        ).await
    }

    async fn number_v1_number_update_flow_ids(
        &self,
        number_id: Uuid,
        call_flow_id: Uuid,
        message_flow_id: Uuid,
    ) -> Result<Number, RequestError> {
        let data = json!({"call_flow_id": call_flow_id, "message_flow_id": message_flow_id});
        self.request(
            QueueName::Number,
            &format!("/v1/numbers/{number_id}/flow_ids"),
            RequestMethod::Put,
            RESOURCE_NUMBER,
            Some(data),
        ).await
    }

    async fn number_v1_number_renew(&self, tm_renew: &str) -> Result<Vec<Number>, RequestError> {
        let data = json!({"tm_renew": tm_renew});
        self.request(
            QueueName::Number,
            "/v1/numbers/renew",
            RequestMethod::Post,
            RESOURCE_NUMBER,
            Some(data),
        ).await
    }

    async fn number_v1_available_number_list(
        &self,
        customer_id: Uuid,
        size: u64,
        country_code: &str,
    ) -> Result<Vec<AvailableNumber>, RequestError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("customer_id", &customer_id.to_string())
            .append_pair("page_size", &size.to_string())
            .append_pair("country_code", country_code)
            .finish();
        self.request(
            QueueName::Number,
            &format!("/v1/available_numbers?{query}"),
            RequestMethod::Get,
            RESOURCE_AVAILABLE_NUMBER,
            None,
        ).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSock;

    #[tokio::test]
    async fn available_numbers_take_query_parameters() {
        let rh = RequestHandlerClient::new(MockSock::new(), "api-manager");
        rh.sock().on(
            RequestMethod::Get,
            "/v1/available_numbers",
            json!([{"number": "+16188850188", "country": "US"}]),
        );

        let customer_id = Uuid::new_v4();
        let res = rh.number_v1_available_number_list(customer_id, 10, "US").await.unwrap();
        assert_eq!(res[0].number, "+16188850188");
        assert_eq!(
            rh.sock().requests()[0].request.uri,
            format!("/v1/available_numbers?customer_id={customer_id}&page_size=10&country_code=US")
        );
    }
}
