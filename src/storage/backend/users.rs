//! User table operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_user;
use super::retry;
use crate::errors::{LinklisterError, Result};
use crate::storage::models::User;

use migration::entities::{link, user};

impl SeaOrmStorage {
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        use sea_orm::ActiveValue::*;

        let active = user::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(|e| {
            match LinklisterError::from(e) {
                LinklisterError::DuplicateKey(_) => {
                    LinklisterError::duplicate_key(format!("User {} already exists", username))
                }
                other => other,
            }
        })?;

        info!("User created: {} (id {})", model.username, model.id);
        Ok(model_to_user(model))
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let db = &self.db;

        let model = retry::with_retry("find_user_by_username", self.retry_config, || async move {
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
        })
        .await?;

        Ok(model.map(model_to_user))
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        let db = &self.db;

        retry::with_retry(&format!("get_user({})", id), self.retry_config, || async move {
            user::Entity::find_by_id(id).one(db).await
        })
        .await?
        .map(model_to_user)
        .ok_or_else(|| LinklisterError::not_found(format!("User {} not found", id)))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let db = &self.db;

        let models = retry::with_retry("list_users", self.retry_config, || async move {
            user::Entity::find()
                .order_by_asc(user::Column::Username)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_user).collect())
    }

    pub async fn count_links_by_owner(&self, user_id: i64) -> Result<u64> {
        let db = &self.db;

        let count = retry::with_retry("count_links_by_owner", self.retry_config, || async move {
            link::Entity::find()
                .filter(link::Column::CreatedBy.eq(user_id))
                .count(db)
                .await
        })
        .await?;

        Ok(count)
    }

    /// Delete a user that owns no links
    pub async fn delete_user(&self, username: &str) -> Result<User> {
        let txn = self.db.begin().await?;

        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&txn)
            .await?
            .ok_or_else(|| LinklisterError::not_found(format!("User {} not found", username)))?;

        let owned = link::Entity::find()
            .filter(link::Column::CreatedBy.eq(model.id))
            .count(&txn)
            .await?;
        if owned > 0 {
            return Err(LinklisterError::protected(format!(
                "User {} still owns {} link(s)",
                username, owned
            )));
        }

        user::Entity::delete_by_id(model.id).exec(&txn).await?;
        txn.commit().await?;

        info!("User deleted: {} (id {})", model.username, model.id);
        Ok(model_to_user(model))
    }
}
