//! SeaORM storage backend
//!
//! Database storage through SeaORM, supporting SQLite, MySQL/MariaDB and
//! PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::{LinkStore, ShortLink};
use crate::config::DatabaseConfig;
use crate::errors::{LinkdashError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_shortlink, shortlink_to_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkdashError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite:, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based link store
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// Connect, run pending migrations and return a ready store.
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinkdashError::database_config("database_url is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        self.link_exists(code).await
    }

    async fn insert(&self, link: &ShortLink) -> Result<()> {
        self.insert_link(link).await
    }

    async fn get(&self, code: &str) -> Result<Option<ShortLink>> {
        self.find_link(code).await
    }

    async fn list(&self) -> Result<Vec<ShortLink>> {
        self.find_all_newest_first().await
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        self.delete_link(code).await
    }

    async fn record_click(&self, code: &str, at: DateTime<Utc>) -> Result<Option<String>> {
        self.increment_click(code, at).await
    }
}
