use models::address::Address;
use models::agent::Agent;
use models::message::{self, Message};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn message_get_authorized(
        &self,
        a: &Agent,
        message_id: Uuid,
    ) -> Result<Message, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.message_v1_message_get(message_id),
        ).await
    }

    /// Send an SMS from `source` to every destination.
    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn message_send(
        &self,
        a: &Agent,
        source: &Address,
        destinations: &[Address],
        text: &str,
    ) -> Result<message::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to send a message")?;
        if destinations.is_empty() {
            return Err(ServiceError::Validation("no destination given".into()))
                .log_err("could not send the message");
        }

        let res = self.req_handler
            .message_v1_message_send(Uuid::new_v4(), a.customer_id, source, destinations, text)
            .await
            .log_err("could not send the message")?;
        info!(message_id = %res.id, targets = res.targets.len(), "message_sent");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, message_id = %message_id))]
    pub async fn message_get(
        &self,
        a: &Agent,
        message_id: Uuid,
    ) -> Result<message::WebhookMessage, ServiceError> {
        let res = self.message_get_authorized(a, message_id)
            .await
            .log_err("could not get the message")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn message_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<message::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list messages")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .message_v1_message_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list messages")?;
        Ok(res.iter().map(Message::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, message_id = %message_id))]
    pub async fn message_delete(
        &self,
        a: &Agent,
        message_id: Uuid,
    ) -> Result<message::WebhookMessage, ServiceError> {
        self.message_get_authorized(a, message_id).await.log_err("could not get the message")?;
        let res = self.req_handler
            .message_v1_message_delete(message_id)
            .await
            .log_err("could not delete the message")?;
        info!(message_id = %res.id, "message_deleted");
        Ok(res.convert_webhook_message())
    }
}
