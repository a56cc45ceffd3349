//! Database access needed by the handler itself. Business data lives in the
//! downstream services; only the readiness check touches the database here.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::errors::ServiceError;

#[async_trait]
pub trait DbHandler: Send + Sync {
    /// Round-trip to the database.
    async fn ping(&self) -> Result<(), ServiceError>;
}

pub struct SeaOrmDbHandler {
    pub db: DatabaseConnection,
}

impl SeaOrmDbHandler {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Connect with the `[database]` config section.
    pub async fn connect(cfg: &configs::DatabaseConfig) -> Result<Self, ServiceError> {
        let db = models::db::connect(cfg).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl DbHandler for SeaOrmDbHandler {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.db.execute_unprepared("SELECT 1").await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory handler; `set_healthy(false)` makes pings fail.
    pub struct MockDbHandler {
        healthy: AtomicBool,
        pings: AtomicUsize,
    }

    impl Default for MockDbHandler {
        fn default() -> Self { Self { healthy: AtomicBool::new(true), pings: AtomicUsize::new(0) } }
    }

    impl MockDbHandler {
        pub fn set_healthy(&self, healthy: bool) { self.healthy.store(healthy, Ordering::SeqCst) }

        pub fn pings(&self) -> usize { self.pings.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl DbHandler for MockDbHandler {
        async fn ping(&self) -> Result<(), ServiceError> {
            self.pings.fetch_add(1, Ordering::SeqCst);
            if self.healthy.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(ServiceError::Db("connection refused".into()))
            }
        }
    }
}
