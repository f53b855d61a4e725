//! Write operations for SeaOrmStorage
//!
//! Each write is one statement, so uniqueness and click counting are left to
//! the database instead of a read-then-write pair.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter, SqlErr};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::shortlink_to_active_model;
use super::retry;
use crate::errors::{LinkdashError, Result};
use crate::storage::ShortLink;

use migration::entities::link;

fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    // sqlx 对 SQLite 主键冲突不一定带扩展错误码
    let msg = err.to_string().to_lowercase();
    msg.contains("unique constraint failed")
        || msg.contains("duplicate entry")
        || msg.contains("duplicate key value")
}

impl SeaOrmStorage {
    /// INSERT guarded by the primary key; a duplicate code surfaces as
    /// `Conflict`.
    pub(super) async fn insert_link(&self, new_link: &ShortLink) -> Result<()> {
        let db = &self.db;
        let model = shortlink_to_active_model(new_link);

        let result = retry::with_write_retry(&format!("insert({})", new_link.code), self.retry_config, || {
            let model = model.clone();
            async move {
                link::Entity::insert(model)
                    .exec_without_returning(db)
                    .await
            }
        })
        .await;

        match result {
            Ok(_) => {
                info!("Link inserted: {} -> {}", new_link.code, new_link.url);
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(LinkdashError::conflict(format!(
                "Code '{}' already exists",
                new_link.code
            ))),
            Err(e) => Err(LinkdashError::store(format!(
                "Failed to insert link '{}': {}",
                new_link.code, e
            ))),
        }
    }

    pub(super) async fn delete_link(&self, code: &str) -> Result<bool> {
        let db = &self.db;

        let result = retry::with_retry(&format!("delete({})", code), self.retry_config, || async {
            link::Entity::delete_by_id(code.to_owned()).exec(db).await
        })
        .await
        .map_err(|e| LinkdashError::store(format!("Failed to delete link '{}': {}", code, e)))?;

        if result.rows_affected > 0 {
            info!("Link deleted: {}", code);
        }
        Ok(result.rows_affected > 0)
    }

    /// `UPDATE links SET total_clicks = total_clicks + 1, last_clicked = ?
    /// WHERE code = ?`, followed by a read of the target URL.
    pub(super) async fn increment_click(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let db = &self.db;

        let updated = retry::with_write_retry(&format!("click({})", code), self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(
                    link::Column::TotalClicks,
                    Expr::col(link::Column::TotalClicks).add(1),
                )
                .col_expr(link::Column::LastClicked, Expr::value(at))
                .filter(link::Column::Code.eq(code))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| {
            LinkdashError::store(format!("Failed to record click for '{}': {}", code, e))
        })?;

        if updated.rows_affected == 0 {
            debug!("Click on unknown code: {}", code);
            return Ok(None);
        }

        // A concurrent delete between the two statements yields None as well.
        Ok(self.find_link(code).await?.map(|found| found.url))
    }
}
