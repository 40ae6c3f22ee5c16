//! Usage recording for served redirects

use std::sync::Arc;

use crate::errors::Result;
use crate::storage::{Link, NewUsageStat, SeaOrmStorage, UsageStat};

/// Raw request data captured for a redirect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    /// Query string as received; a leading "?" is tolerated
    pub query_string: String,
    /// Value of the `Referer` header, empty when absent
    pub referrer: String,
    /// Value of the `User-Agent` header, empty when absent
    pub user_agent: String,
}

impl ClientInfo {
    pub fn query_without_prefix(&self) -> &str {
        self.query_string
            .strip_prefix('?')
            .unwrap_or(&self.query_string)
    }
}

#[derive(Clone)]
pub struct UsageRecorder {
    storage: Arc<SeaOrmStorage>,
}

impl UsageRecorder {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Append one usage row for `link`. Values are stored untouched apart
    /// from the leading "?" of the query string.
    pub async fn record(&self, link: &Link, client: &ClientInfo) -> Result<UsageStat> {
        self.storage
            .record_usage(NewUsageStat {
                link_id: link.id,
                ip_address: client.ip_address.clone(),
                query_string: client.query_without_prefix().to_string(),
                referrer: client.referrer.clone(),
                user_agent: client.user_agent.clone(),
            })
            .await
    }
}
