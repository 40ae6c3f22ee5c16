use crate::storage::models::{Link, NewLink, NewUsageStat, UsageStat, User};
use migration::entities::{link, usage_stat, user};

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        short_path: model.short_path,
        target_url: model.target_url,
        create_date: model.create_date,
        created_by: model.created_by,
    }
}

/// 插入用 ActiveModel，id 与创建时间由这里决定
pub fn new_link_to_active_model(link: &NewLink) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        short_path: Set(link.short_path.clone()),
        target_url: Set(link.target_url.clone()),
        create_date: Set(chrono::Utc::now()),
        created_by: Set(link.created_by),
    }
}

pub fn model_to_usage_stat(model: usage_stat::Model) -> UsageStat {
    UsageStat {
        id: model.id,
        link_id: model.link_id,
        ip_address: model.ip_address,
        query_string: model.query_string,
        referrer: model.referrer,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}

pub fn new_usage_to_active_model(usage: NewUsageStat) -> usage_stat::ActiveModel {
    use sea_orm::ActiveValue::*;

    usage_stat::ActiveModel {
        id: NotSet,
        link_id: Set(usage.link_id),
        ip_address: Set(usage.ip_address),
        query_string: Set(usage.query_string),
        referrer: Set(usage.referrer),
        user_agent: Set(usage.user_agent),
        created_at: Set(chrono::Utc::now()),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}
