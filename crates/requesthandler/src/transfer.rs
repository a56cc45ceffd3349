use async_trait::async_trait;
use models::address::Address;
use models::transfer::{Transfer, TransferType};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{RequestError, RequestHandlerClient};

/// transfer-manager RPCs.
#[async_trait]
pub trait TransferRequest: Send + Sync {
    async fn transfer_v1_transfer_start(
        &self,
        transfer_type: TransferType,
        transferer_call_id: Uuid,
        transferee_addresses: &[Address],
    ) -> Result<Transfer, RequestError>;
}

#[async_trait]
impl<S: Sock> TransferRequest for RequestHandlerClient<S> {
    async fn transfer_v1_transfer_start(
        &self,
        transfer_type: TransferType,
        transferer_call_id: Uuid,
        transferee_addresses: &[Address],
    ) -> Result<Transfer, RequestError> {
        let data = json!({
            "type": transfer_type,
            "transferer_call_id": transferer_call_id,
            "transferee_addresses": transferee_addresses,
        });
        self.request(
            QueueName::Transfer,
            "/v1/transfers",
            RequestMethod::Post,
            "transfer/transfers",
            Some(data),
        ).await
    }
}
