//! `ServiceHandler`: the facade every public API operation goes through.
//!
//! Operations follow the same shape: authorize the caller against the
//! resource (fetching it when it already exists), forward to the owning
//! downstream service, convert the reply into its webhook message.

mod agent;
mod billing;
mod call;
mod campaign;
mod chat;
mod chatbot;
mod conference;
mod contact;
mod conversation;
mod customer;
mod flow;
mod message;
mod number;
mod outdial;
mod queue;
mod registrar;
mod route;
mod service_agent;
mod service_agent_contact;
mod service_agent_talk;
mod storage;
mod tag;
mod transcribe;
mod transfer;

use std::future::Future;
use std::sync::Arc;

use common::pagination::Pagination;
use models::agent::{Agent, Permission};
use models::resource::Resource;
use configs::AppConfig;
use requesthandler::{Filters, RequestError, RequestHandler, RequestHandlerClient};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dbhandler::{DbHandler, SeaOrmDbHandler};
use crate::errors::{LogErr, ServiceError};

pub use campaign::CampaignResources;
pub use transcribe::{REFERENCE_TYPE_CALL, REFERENCE_TYPE_CONFERENCE};

/// CustomerAdmin | CustomerManager.
pub const PERM_ADMIN_MANAGER: Permission = Permission(
    Permission::CUSTOMER_ADMIN.0 | Permission::CUSTOMER_MANAGER.0,
);
/// Any customer-level bit.
pub const PERM_CUSTOMER_ALL: Permission = Permission::CUSTOMER_ALL;
pub const PERM_CUSTOMER_ADMIN: Permission = Permission::CUSTOMER_ADMIN;
/// Project administrators only. Nothing but the project bit passes.
pub const PERM_PROJECT: Permission = Permission::NONE;

pub struct ServiceHandler {
    pub(crate) req_handler: Arc<dyn RequestHandler>,
    db_handler: Arc<dyn DbHandler>,
}

impl ServiceHandler {
    pub fn new(req_handler: Arc<dyn RequestHandler>, db_handler: Arc<dyn DbHandler>) -> Self {
        Self { req_handler, db_handler }
    }

    /// Wire a handler from the loaded config: log output, the database pool
    /// and the HTTP client for the downstream services.
    pub async fn from_config(cfg: &AppConfig) -> Result<Self, ServiceError> {
        common::utils::logging::init_from_config(&cfg.logging);
        let db = SeaOrmDbHandler::connect(&cfg.database)
            .await
            .log_err("could not connect to the database")?;
        let rh = RequestHandlerClient::from_config(&cfg.request_handler)
            .log_err("could not build the request handler")?;
        info!(
            publisher = %rh.publisher(),
            endpoints = cfg.request_handler.endpoints.len(),
            "service_handler_ready"
        );
        Ok(Self::new(Arc::new(rh), Arc::new(db)))
    }

    /// True when the agent may act on something owned by `customer_id`.
    ///
    /// Project super admins pass everything. Everyone else must belong to
    /// the same customer and hold at least one bit of `perm`.
    ///
    /// ```
    /// use models::agent::{Agent, Permission};
    /// use service::servicehandler::ServiceHandler;
    /// let customer_id = uuid::Uuid::new_v4();
    /// let a = Agent { customer_id, permission: Permission::CUSTOMER_MANAGER, ..Default::default() };
    /// assert!(ServiceHandler::has_permission(&a, customer_id, Permission::CUSTOMER_ADMIN | Permission::CUSTOMER_MANAGER));
    /// assert!(!ServiceHandler::has_permission(&a, uuid::Uuid::new_v4(), Permission::CUSTOMER_ALL));
    /// ```
    pub fn has_permission(a: &Agent, customer_id: Uuid, perm: Permission) -> bool {
        if a.has_permission(Permission::PROJECT_SUPER_ADMIN) {
            return true;
        }
        if a.customer_id != customer_id {
            return false;
        }
        a.has_permission(perm)
    }

    /// Permission check against the caller's own customer, used before creates and lists.
    pub(crate) fn check_permission(
        a: &Agent,
        customer_id: Uuid,
        perm: Permission,
    ) -> Result<(), ServiceError> {
        if Self::has_permission(a, customer_id, perm) {
            Ok(())
        } else {
            Err(ServiceError::NoPermission)
        }
    }

    /// Fetch a resource and authorize the caller on it.
    ///
    /// Deleted resources read as not found; the permission test runs against
    /// the resource's owning customer.
    pub(crate) async fn get_authorized<T, F>(
        a: &Agent,
        perm: Permission,
        fetch: F,
    ) -> Result<T, ServiceError>
    where
        T: Resource,
        F: Future<Output = Result<T, RequestError>>,
    {
        let res = fetch.await?;
        if res.is_deleted() {
            return Err(ServiceError::NotFound);
        }
        Self::check_permission(a, res.customer_id(), perm)?;
        Ok(res)
    }

    /// Readiness check against the database.
    #[instrument(skip_all)]
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        self.db_handler.ping().await.log_err("could not reach the database")
    }
}

/// Page token and size ready for a list RPC.
pub(crate) fn page(size: u64, token: &str) -> (String, u64) {
    Pagination::new(size, token).normalize()
}

/// Filters every customer-scoped list carries.
pub(crate) fn customer_filters(customer_id: Uuid) -> Filters {
    let mut filters = Filters::new();
    filters.insert("customer_id".into(), json!(customer_id));
    filters.insert("deleted".into(), json!(false));
    filters
}

/// Filters for project-wide lists.
pub(crate) fn deleted_filter() -> Filters {
    let mut filters = Filters::new();
    filters.insert("deleted".into(), json!(false));
    filters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbhandler::mock::MockDbHandler;
    use crate::test_support::{agent_with, handler};

    #[test]
    fn project_admin_passes_any_customer() {
        let a = agent_with(Uuid::new_v4(), Permission::PROJECT_SUPER_ADMIN);
        assert!(ServiceHandler::has_permission(&a, Uuid::new_v4(), PERM_PROJECT));
        assert!(ServiceHandler::has_permission(&a, Uuid::nil(), PERM_ADMIN_MANAGER));
    }

    #[test]
    fn project_mask_rejects_customer_admin() {
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_ALL);
        assert!(!ServiceHandler::has_permission(&a, a.customer_id, PERM_PROJECT));
    }

    #[test]
    fn agent_bit_is_not_manager() {
        let a = agent_with(Uuid::new_v4(), Permission::CUSTOMER_AGENT);
        assert!(!ServiceHandler::has_permission(&a, a.customer_id, PERM_ADMIN_MANAGER));
        assert!(ServiceHandler::has_permission(&a, a.customer_id, PERM_CUSTOMER_ALL));
    }

    #[test]
    fn filters_pin_customer_and_live_rows() {
        let id = Uuid::new_v4();
        let f = customer_filters(id);
        assert_eq!(f["customer_id"], json!(id));
        assert_eq!(f["deleted"], json!(false));
    }

    #[tokio::test]
    async fn health_check_reports_db_state() {
        let db = Arc::new(MockDbHandler::default());
        let (h, _) = handler(db.clone());
        h.health_check().await.unwrap();

        db.set_healthy(false);
        assert!(matches!(h.health_check().await, Err(ServiceError::Db(_))));
        assert_eq!(db.pings(), 2);
    }

    #[tokio::test]
    async fn from_config_rejects_missing_database_url() {
        let cfg = AppConfig::default();
        assert!(matches!(ServiceHandler::from_config(&cfg).await, Err(ServiceError::Db(_))));
    }
}
