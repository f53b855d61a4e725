use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The primary key on `code` is the only uniqueness guarantee for links;
        // inserts rely on it to reject duplicates.
        manager
            .create_table(links_table(manager.get_database_backend()))
            .await?;

        // Dashboard listing is ordered by creation time
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_created_at")
                    .table(Link::Table)
                    .col(Link::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_links_created_at")
                    .table(Link::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await
    }
}

/// `links` 表定义
///
/// Codes are case-sensitive. SQLite and PostgreSQL compare text bytewise, but
/// MySQL/MariaDB default to a `_ci` collation, so `code` gets a binary one
/// there.
fn links_table(backend: DatabaseBackend) -> TableCreateStatement {
    let mut code = ColumnDef::new(Link::Code);
    code.string_len(8).not_null().primary_key();
    if backend == DatabaseBackend::MySql {
        code.extra("COLLATE utf8mb4_bin");
    }

    Table::create()
        .table(Link::Table)
        .if_not_exists()
        .col(code)
        .col(ColumnDef::new(Link::Url).text().not_null())
        .col(
            ColumnDef::new(Link::TotalClicks)
                .big_integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Link::LastClicked)
                .timestamp_with_time_zone()
                .null(),
        )
        .col(
            ColumnDef::new(Link::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Code,
    Url,
    TotalClicks,
    LastClicked,
    CreatedAt,
}
