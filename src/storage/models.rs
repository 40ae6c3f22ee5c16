use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub short_path: String,
    pub target_url: String,
    pub create_date: DateTime<Utc>,
    /// Owning user id
    pub created_by: i64,
}

/// Insert payload for [`Link`]; `short_path` must already be normalized
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_path: String,
    pub target_url: String,
    pub created_by: i64,
}

/// One served redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStat {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub query_string: String,
    pub referrer: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewUsageStat {
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub query_string: String,
    pub referrer: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user a management operation runs for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}
