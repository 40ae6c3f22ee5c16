//! links 表迁移
//!
//! short_path 上的唯一索引是短路径唯一性的最终裁决者；
//! created_by 外键使用 RESTRICT，存在链接时禁止删除其所属用户。

use sea_orm_migration::prelude::*;

use crate::m20250301_000001_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Links::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Links::ShortPath).string_len(512).not_null())
                    .col(ColumnDef::new(Links::TargetUrl).text().not_null())
                    .col(
                        ColumnDef::new(Links::CreateDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Links::CreatedBy).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_created_by")
                            .from(Links::Table, Links::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：并发创建同一短路径时由数据库拒绝第二个写入
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_short_path")
                    .table(Links::Table)
                    .col(Links::ShortPath)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 列表按创建时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_create_date")
                    .table(Links::Table)
                    .col(Links::CreateDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_created_by")
                    .table(Links::Table)
                    .col(Links::CreatedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_links_created_by").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_links_create_date").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_links_short_path").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Links {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    ShortPath,
    TargetUrl,
    CreateDate,
    CreatedBy,
}
