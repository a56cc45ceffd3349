use models::address::Address;
use models::agent::Agent;
use models::transfer::{self, TransferType};

use tracing::{info, instrument};
use uuid::Uuid;

use super::{ServiceHandler, PERM_CUSTOMER_ALL};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    /// Hand the transferer call over to the given addresses.
    ///
    /// The transferer call must belong to the caller's customer; any
    /// customer-level permission is enough.
    #[instrument(
        skip_all,
        fields(
            customer_id = %a.customer_id,
            transferer_call_id = %transferer_call_id,
            transfer_type = ?transfer_type,
        )
    )]
    pub async fn transfer_start(
        &self,
        a: &Agent,
        transfer_type: TransferType,
        transferer_call_id: Uuid,
        transferee_addresses: &[Address],
    ) -> Result<transfer::WebhookMessage, ServiceError> {
        if transferee_addresses.is_empty() {
            return Err(ServiceError::Validation("no transferee address given".into()))
                .log_err("nothing to transfer to");
        }
        Self::get_authorized(
            a,
            PERM_CUSTOMER_ALL,
            self.req_handler.call_v1_call_get(transferer_call_id),
        ).await.log_err("could not get the transferer call")?;

        let res = self.req_handler
            .transfer_v1_transfer_start(transfer_type, transferer_call_id, transferee_addresses)
            .await
            .log_err("could not start the transfer")?;
        info!(transfer_id = %res.id, "transfer_started");
        Ok(res.convert_webhook_message())
    }
}
