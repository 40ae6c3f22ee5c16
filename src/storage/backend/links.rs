//! Link table operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_link, new_link_to_active_model};
use super::retry;
use crate::errors::{LinklisterError, Result};
use crate::storage::models::{Link, NewLink};

use migration::entities::{link, usage_stat};

impl SeaOrmStorage {
    /// Insert a link with a single statement. The unique index on
    /// `short_path` decides duplicates, so concurrent adds of the same path
    /// end in exactly one row and `DuplicateKey` for the rest.
    pub async fn create_link(&self, new_link: NewLink) -> Result<Link> {
        let model = new_link_to_active_model(&new_link)
            .insert(&self.db)
            .await
            .map_err(|e| match LinklisterError::from(e) {
                LinklisterError::DuplicateKey(_) => LinklisterError::duplicate_key(format!(
                    "Short path {} already exists",
                    new_link.short_path
                )),
                LinklisterError::Protected(_) => {
                    LinklisterError::not_found(format!("User {} not found", new_link.created_by))
                }
                other => other,
            })?;

        info!(
            "Link created: {} -> {} (owner {})",
            model.short_path, model.target_url, model.created_by
        );
        Ok(model_to_link(model))
    }

    /// Exact lookup by normalized short path
    pub async fn find_link(&self, short_path: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("find_link({})", short_path),
            self.retry_config,
            || async move {
                link::Entity::find()
                    .filter(link::Column::ShortPath.eq(short_path))
                    .one(db)
                    .await
            },
        )
        .await?;

        Ok(model.map(model_to_link))
    }

    pub async fn get_link(&self, id: i64) -> Result<Link> {
        let db = &self.db;

        retry::with_retry(&format!("get_link({})", id), self.retry_config, || async move {
            link::Entity::find_by_id(id).one(db).await
        })
        .await?
        .map(model_to_link)
        .ok_or_else(|| LinklisterError::not_found(format!("Link {} not found", id)))
    }

    /// All links, or only those owned by `owner`, newest first
    pub async fn list_links(&self, owner: Option<i64>) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = retry::with_retry("list_links", self.retry_config, || async move {
            let mut query = link::Entity::find();
            if let Some(owner_id) = owner {
                query = query.filter(link::Column::CreatedBy.eq(owner_id));
            }
            query
                .order_by_desc(link::Column::CreateDate)
                .order_by_desc(link::Column::Id)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// Delete a link together with its usage rows, in one transaction.
    /// The first statement writes, so SQLite takes the write lock up front.
    pub async fn delete_link(&self, id: i64) -> Result<Link> {
        let txn = self.db.begin().await?;

        let usage = usage_stat::Entity::delete_many()
            .filter(usage_stat::Column::LinkId.eq(id))
            .exec(&txn)
            .await?;

        // dropping the transaction rolls it back
        let model = link::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LinklisterError::not_found(format!("Link {} not found", id)))?;

        link::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!(
            "Link deleted: {} (id {}, {} usage rows)",
            model.short_path, id, usage.rows_affected
        );
        Ok(model_to_link(model))
    }
}
