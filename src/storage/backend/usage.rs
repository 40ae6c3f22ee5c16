//! Usage stat operations

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_usage_stat, new_usage_to_active_model};
use super::retry;
use crate::errors::Result;
use crate::storage::models::{NewUsageStat, UsageStat};

use migration::entities::usage_stat;

impl SeaOrmStorage {
    pub async fn record_usage(&self, usage: NewUsageStat) -> Result<UsageStat> {
        let model = new_usage_to_active_model(usage).insert(&self.db).await?;
        debug!("Usage recorded for link {}", model.link_id);
        Ok(model_to_usage_stat(model))
    }

    /// Usage rows of one link, newest first
    pub async fn list_usage(&self, link_id: i64) -> Result<Vec<UsageStat>> {
        let db = &self.db;

        let models = retry::with_retry(
            &format!("list_usage({})", link_id),
            self.retry_config,
            || async move {
                usage_stat::Entity::find()
                    .filter(usage_stat::Column::LinkId.eq(link_id))
                    .order_by_desc(usage_stat::Column::CreatedAt)
                    .order_by_desc(usage_stat::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(models.into_iter().map(model_to_usage_stat).collect())
    }

    pub async fn count_usage(&self, link_id: i64) -> Result<u64> {
        let db = &self.db;

        let count = retry::with_retry("count_usage", self.retry_config, || async move {
            usage_stat::Entity::find()
                .filter(usage_stat::Column::LinkId.eq(link_id))
                .count(db)
                .await
        })
        .await?;

        Ok(count)
    }
}
