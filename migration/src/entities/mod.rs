pub mod link;
pub mod usage_stat;
pub mod user;

pub use link::Entity as LinkEntity;
pub use usage_stat::Entity as UsageStatEntity;
pub use user::Entity as UserEntity;
