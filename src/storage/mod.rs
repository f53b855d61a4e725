//! Link persistence
//!
//! [`LinkStore`] is the seam between the link service and the database;
//! [`SeaOrmStorage`] is the production implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::ShortLink;

/// Row-level operations on the `links` table.
///
/// Every method is a single statement against the store; none of them keep
/// state between calls.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Short name of the backing database, e.g. `sqlite`.
    fn backend_name(&self) -> &str;

    async fn exists(&self, code: &str) -> Result<bool>;

    /// Insert a new row. Fails with `LinkdashError::Conflict` when the code
    /// is already taken.
    async fn insert(&self, link: &ShortLink) -> Result<()>;

    async fn get(&self, code: &str) -> Result<Option<ShortLink>>;

    /// All links, newest first.
    async fn list(&self) -> Result<Vec<ShortLink>>;

    /// Returns `false` when no row matched.
    async fn delete(&self, code: &str) -> Result<bool>;

    /// Atomically add one click and stamp `last_clicked`, then return the
    /// target URL. `None` when the code does not exist.
    async fn record_click(&self, code: &str, at: DateTime<Utc>) -> Result<Option<String>>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;

        let storage = SeaOrmStorage::new(&config.database_url, &backend_type, config).await?;
        Ok(Arc::new(storage))
    }
}
