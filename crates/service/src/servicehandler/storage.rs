use models::agent::Agent;
use models::storage::account::{self, Account};
use models::storage::file::{self, File};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    customer_filters,
    deleted_filter,
    page,
    ServiceHandler,
    PERM_ADMIN_MANAGER,
    PERM_CUSTOMER_ADMIN,
    PERM_PROJECT,
};
use crate::errors::{LogErr, ServiceError};

impl ServiceHandler {
    async fn storage_file_get_authorized(
        &self,
        a: &Agent,
        file_id: Uuid,
    ) -> Result<File, ServiceError> {
        Self::get_authorized(a, PERM_ADMIN_MANAGER, self.req_handler.storage_v1_file_get(file_id))
            .await
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, target_customer_id = %customer_id))]
    pub async fn storage_account_create(
        &self,
        a: &Agent,
        customer_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT).log_err(
            "no permission to create a storage account",
        )?;
        let res = self.req_handler
            .storage_v1_account_create(customer_id)
            .await
            .log_err("could not create a storage account")?;
        info!(storage_account_id = %res.id, "storage_account_created");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, storage_account_id = %account_id))]
    pub async fn storage_account_get(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        let res = Self::get_authorized(
            a,
            PERM_CUSTOMER_ADMIN,
            self.req_handler.storage_v1_account_get(account_id),
        ).await.log_err("could not get the storage account")?;
        Ok(res.convert_webhook_message())
    }

    /// The storage account of a customer. Each customer has at most one.
    #[instrument(skip_all, fields(customer_id = %a.customer_id, target_customer_id = %customer_id))]
    pub async fn storage_account_get_by_customer_id(
        &self,
        a: &Agent,
        customer_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::check_permission(a, customer_id, PERM_CUSTOMER_ADMIN)
            .log_err("no permission to get the storage account")?;
        let (token, _) = page(1, "");
        let res = self.req_handler
            .storage_v1_account_list(&token, 1, &customer_filters(customer_id))
            .await
            .log_err("could not list storage accounts")?;
        let account = res.into_iter()
            .next()
            .ok_or(ServiceError::NotFound)
            .log_err("customer has no storage account")?;
        Ok(account.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn storage_account_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<account::WebhookMessage>, ServiceError> {
        Self::check_permission(a, Uuid::nil(), PERM_PROJECT)
            .log_err("no permission to list storage accounts")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .storage_v1_account_list(&token, size, &deleted_filter())
            .await
            .log_err("could not list storage accounts")?;
        Ok(res.iter().map(Account::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, storage_account_id = %account_id))]
    pub async fn storage_account_delete(
        &self,
        a: &Agent,
        account_id: Uuid,
    ) -> Result<account::WebhookMessage, ServiceError> {
        Self::get_authorized(a, PERM_PROJECT, self.req_handler.storage_v1_account_get(account_id))
            .await
            .log_err("could not get the storage account")?;
        let res = self.req_handler
            .storage_v1_account_delete(account_id)
            .await
            .log_err("could not delete the storage account")?;
        info!(storage_account_id = %res.id, "storage_account_deleted");
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, file_id = %file_id))]
    pub async fn storage_file_get(
        &self,
        a: &Agent,
        file_id: Uuid,
    ) -> Result<file::WebhookMessage, ServiceError> {
        let res = self.storage_file_get_authorized(a, file_id)
            .await
            .log_err("could not get the file")?;
        Ok(res.convert_webhook_message())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id))]
    pub async fn storage_file_list(
        &self,
        a: &Agent,
        size: u64,
        token: &str,
    ) -> Result<Vec<file::WebhookMessage>, ServiceError> {
        Self::check_permission(a, a.customer_id, PERM_ADMIN_MANAGER)
            .log_err("no permission to list files")?;
        let (token, size) = page(size, token);
        let res = self.req_handler
            .storage_v1_file_list(&token, size, &customer_filters(a.customer_id))
            .await
            .log_err("could not list files")?;
        Ok(res.iter().map(File::convert_webhook_message).collect())
    }

    #[instrument(skip_all, fields(customer_id = %a.customer_id, file_id = %file_id))]
    pub async fn storage_file_delete(
        &self,
        a: &Agent,
        file_id: Uuid,
    ) -> Result<file::WebhookMessage, ServiceError> {
        self.storage_file_get_authorized(a, file_id).await.log_err("could not get the file")?;
        let res = self.req_handler
            .storage_v1_file_delete(file_id)
            .await
            .log_err("could not delete the file")?;
        info!(file_id = %res.id, "file_deleted");
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
    async fn account_by_customer_takes_first_match() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        let id = Uuid::new_v4();
        rh.sock().on(
            RequestMethod::Get,
            "/v1/accounts",
            json!([{"id": id, "customer_id": a.customer_id, "total_file_count": 3}]),
        );

        let res = h.storage_account_get_by_customer_id(&a, a.customer_id).await.unwrap();
        assert_eq!(res.id, id);
        assert_eq!(res.total_file_count, 3);
    }

    #[tokio::test]
    async fn account_by_customer_without_account_is_not_found() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);
        rh.sock().on(RequestMethod::Get, "/v1/accounts", json!([]));

        assert!(matches!(
            h.storage_account_get_by_customer_id(&a, a.customer_id).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn account_of_other_customer_is_not_listed() {
        let (h, rh) = mock_handler();
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ADMIN);

        assert!(matches!(
            h.storage_account_get_by_customer_id(&a, Uuid::new_v4()).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(matches!(
            h.storage_account_create(&a, a.customer_id).await,
            Err(ServiceError::NoPermission)
        ));
        assert!(rh.sock().requests().is_empty());
    }
}
