//! Read-only operations for SeaOrmStorage

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::trace;

use super::SeaOrmStorage;
use super::converters::model_to_shortlink;
use super::retry;
use crate::errors::{LinkdashError, Result};
use crate::storage::ShortLink;

use migration::entities::link;

impl SeaOrmStorage {
    pub(super) async fn find_link(&self, code: &str) -> Result<Option<ShortLink>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get({})", code), self.retry_config, || async {
            link::Entity::find_by_id(code.to_owned()).one(db).await
        })
        .await
        .map_err(|e| LinkdashError::store(format!("Failed to load link '{}': {}", code, e)))?;

        Ok(model.map(model_to_shortlink))
    }

    pub(super) async fn link_exists(&self, code: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(&format!("exists({})", code), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Code.eq(code))
                .count(db)
                .await
        })
        .await
        .map_err(|e| {
            LinkdashError::store(format!("Failed to check whether '{}' exists: {}", code, e))
        })?;

        trace!("exists({}) -> {}", code, count > 0);
        Ok(count > 0)
    }

    pub(super) async fn find_all_newest_first(&self) -> Result<Vec<ShortLink>> {
        let db = &self.db;

        let models = retry::with_retry("list", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .order_by_asc(link::Column::Code)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkdashError::store(format!("Failed to list links: {}", e)))?;

        trace!("Loaded {} links", models.len());
        Ok(models.into_iter().map(model_to_shortlink).collect())
    }
}
