//! 使用记录表迁移
//!
//! 每次成功跳转写入一行 usage_stats：
//! - 客户端 IP
//! - 查询字符串（不含前导 "?"）
//! - referrer
//! - user agent
//!
//! 删除链接时级联删除其全部使用记录。

use sea_orm_migration::prelude::*;

use crate::m20250301_000002_links::Links;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UsageStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UsageStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UsageStats::LinkId).big_integer().not_null())
                    .col(ColumnDef::new(UsageStats::IpAddress).string_len(45).null())
                    .col(
                        ColumnDef::new(UsageStats::QueryString)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UsageStats::Referrer)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UsageStats::UserAgent)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UsageStats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usage_stats_link_id")
                            .from(UsageStats::Table, UsageStats::LinkId)
                            .to(Links::Table, Links::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 复合索引（单链接按时间倒序查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usage_stats_link_time")
                    .table(UsageStats::Table)
                    .col(UsageStats::LinkId)
                    .col(UsageStats::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_usage_stats_link_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UsageStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UsageStats {
    #[sea_orm(iden = "usage_stats")]
    Table,
    Id,
    LinkId,
    IpAddress,
    QueryString,
    Referrer,
    UserAgent,
    CreatedAt,
}
