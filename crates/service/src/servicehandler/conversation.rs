use models::agent::Agent;
use models::conversation::account::{self, Account};
use models::conversation::conversation::{self, Conversation};
use models::conversation::message::{self, Message};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{customer_filters, page, ServiceHandler, PERM_ADMIN_MANAGER};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn conversation_get_authorized(
        &self,
        a: &Agent,
        conversation_id: Uuid,
    ) -> Result<Conversation, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.conversation_v1_conversation_get(conversation_id),
        ).await
    }

    async fn conversation_account_get_authorized(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<Account, ServiceError> {
        Self::get_authorized(
            a,
            PERM_ADMIN_MANAGER,
            self.req_handler.conversation_v1_account_get(account_id),
        ).await
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_id = %conversation_id)
    )]
    pub async fn conversation_get(
        &self,
        a: &Agent,
        conversation_id: Uuid,
    ) -> Result<conversation::WebhookMessage, ServiceError> {
        let res = self.conversation_get_authorized(a, conversation_id)
            .await
            .log_err("could not get the conversation")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn conversation_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<conversation::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list conversations")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .conversation_v1_conversation_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list conversations")?;
        Ok(res.iter().map(Conversation::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_id = %conversation_id)
    )]
    pub async fn conversation_update(
        &self,
        a: &Agent,
        conversation_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<conversation::WebhookMessage, ServiceError> {
        self.conversation_get_authorized(a, conversation_id)
            .await
            .log_err("could not get the conversation")?;
        let res = self.req_handler
            .conversation_v1_conversation_update(conversation_id, name, detail)
            .await
            .log_err("could not update the conversation")?;
        info!(conversation_id = %res.id, "conversation_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_id = %conversation_id)
    )]
    pub async fn conversation_message_list(
        &self,
        a: &Agent,
        conversation_id: Uuid,
        size: u64,
        token: &str,
    ) -> Result<Vec<message::WebhookMessage>, ServiceError> {
        self.conversation_get_authorized(a, conversation_id)
            .await
            .log_err("could not get the conversation")?;
        let (token, size) = page(size, token);
        let mut filters = customer_filters(a.customer_id);
        filters.insert("conversation_id".into(), json!(conversation_id));
        let res = self.req_handler
            .conversation_v1_message_list(&token, size, &filters)
            .await
            .log_err("could not list conversation messages")?;
        Ok(res.iter().map(Message::convert_webhook_message).collect())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_id = %conversation_id)
    )]
    pub async fn conversation_message_send(
        &self,
        a: &Agent,
        conversation_id: Uuid,
        text: &str,
        medias: &[Value],
    ) -> Result<message::WebhookMessage, ServiceError> {
        self.conversation_get_authorized(a, conversation_id)
            .await
            .log_err("could not get the conversation")?;
        let res = self.req_handler
            .conversation_v1_message_send(conversation_id, text, medias)
            .await
            .log_err("could not send the message")?;
        info!(message_id = %res.id, "conversation_message_sent");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_account_id = %account_id)
    )]
    pub async fn conversation_account_get(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        let res = self.conversation_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the conversation account")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn conversation_account_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<account::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list conversation accounts")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .conversation_v1_account_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list conversation accounts")?;
        Ok(res.iter().map(Account::convert_webhook_message).collect())
    }

    /// Register a messaging channel account (e.g. a LINE bot) for the customer.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, account_type = %account_type))]
    pub async fn conversation_account_create(
        &self,
        a: &Agent,
        account_type: &str,
        name: &str,
        detail: &str,
        secret: &str,
        token: &str,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to create a conversation account")?;
        let res = self.req_handler
            .conversation_v1_account_create(
                a.customer_id,
                account_type,
                name,
                detail,
                secret,
                token,
            )
            .await
            .log_err("could not create a conversation account")?;
        info!(conversation_account_id = %res.id, "conversation_account_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_account_id = %account_id)
    )]
    pub async fn conversation_account_update(
        &self,
        a: &Agent,
        account_id: Uuid,
        name: &str,
        detail: &str,
        secret: &str,
        token: &str,
    ) -> Result<account::WebhookMessage, ServiceError> {
        self.conversation_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the conversation account")?;
        let res = self.req_handler
            .conversation_v1_account_update(account_id, name, detail, secret, token)
            .await
            .log_err("could not update the conversation account")?;
        info!(conversation_account_id = %res.id, "conversation_account_updated");
        Ok(res.convert_webhook_message())
    }

    #[instrument(
        skip_all,
        fields(customer_id = %a.customer_id, conversation_account_id = %account_id)
    )]
    pub async fn conversation_account_delete(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        self.conversation_account_get_authorized(a, account_id)
            .await
            .log_err("could not get the conversation account")?;
        let res = self.req_handler
            .conversation_v1_account_delete(account_id)
            .await
            .log_err("could not delete the conversation account")?;
        info!(conversation_account_id = %res.id, "conversation_account_deleted");
        Ok(res.convert_webhook_message())
    }
}
