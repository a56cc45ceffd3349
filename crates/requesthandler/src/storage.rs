use async_trait::async_trait;
use models::storage::account::Account;
use models::storage::bucketfile::BucketFile;
use models::storage::file::File;
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// storage-manager RPCs.
#[async_trait]
pub trait StorageRequest: Send + Sync {
    async fn storage_v1_account_create(&self, customer_id: Uuid) -> Result<Account, RequestError>;
    async fn storage_v1_account_get(&self, account_id: Uuid) -> Result<Account, RequestError>;
    async fn storage_v1_account_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Account>, RequestError>;
    async fn storage_v1_account_delete(&self, account_id: Uuid) -> Result<Account, RequestError>;

    async fn storage_v1_file_get(&self, file_id: Uuid) -> Result<File, RequestError>;
    async fn storage_v1_file_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<File>, RequestError>;
    async fn storage_v1_file_delete(&self, file_id: Uuid) -> Result<File, RequestError>;

    /// Signed download location of a recording's media.
    async fn storage_v1_recording_get(
        &self,
        recording_id: Uuid,
    ) -> Result<BucketFile, RequestError>;
}

const RESOURCE_ACCOUNT: &str = "storage/accounts";
const RESOURCE_FILE: &str = "storage/files";
const RESOURCE_RECORDING: &str = "storage/recordings";

#[async_trait]
impl<S: Sock> StorageRequest for RequestHandlerClient<S> {
    async fn storage_v1_account_create(&self, customer_id: Uuid) -> Result<Account, RequestError> {
        let data = json!({"customer_id": customer_id});
        self.request(
            QueueName::Storage,
            "/v1/accounts",
            RequestMethod::Post,
            RESOURCE_ACCOUNT,
            Some(data),
        ).await
    }

    async fn storage_v1_account_get(&self, account_id: Uuid) -> Result<Account, RequestError> {
        self.request(
            QueueName::Storage,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Get,
            RESOURCE_ACCOUNT,
            None,
        ).await
    }

    async fn storage_v1_account_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Account>, RequestError> {
        self.request_list(
            QueueName::Storage,
            "/v1/accounts",
            token,
            size,
            filters,
            RESOURCE_ACCOUNT,
        ).await
    }

    async fn storage_v1_account_delete(&self, account_id: Uuid) -> Result<Account, RequestError> {
        self.request(
            QueueName::Storage,
            &format!("/v1/accounts/{account_id}"),
            RequestMethod::Delete,
            RESOURCE_ACCOUNT,
            None,
        ).await
    }

    async fn storage_v1_file_get(&self, file_id: Uuid) -> Result<File, RequestError> {
        self.request(
            QueueName::Storage,
            &format!("/v1/files/{file_id}"),
            RequestMethod::Get,
            RESOURCE_FILE,
            None,
        ).await
    }

    async fn storage_v1_file_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<File>, RequestError> {
        self.request_list(QueueName::Storage, "/v1/files", token, size, filters, RESOURCE_FILE)
            .await
    }

    async fn storage_v1_file_delete(&self, file_id: Uuid) -> Result<File, RequestError> {
        self.request(
            QueueName::Storage,
            &format!("/v1/files/{file_id}"),
            RequestMethod::Delete,
            RESOURCE_FILE,
            None,
        ).await
    }

    async fn storage_v1_recording_get(
        &self,
        recording_id: Uuid,
    ) -> Result<BucketFile, RequestError> {
        self.request(
            QueueName::Storage,
            &format!("/v1/recordings/{recording_id}"),
            RequestMethod::Get,
            RESOURCE_RECORDING,
            None,
        ).await
    }
}
