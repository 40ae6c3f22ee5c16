//! Short path resolution
//!
//! Turns an inbound request path (plus query string) into either a redirect
//! target or a miss. Each hit records exactly one usage row before the
//! outcome is returned.

use std::sync::Arc;

use tracing::{debug, error};

use super::usage_recorder::{ClientInfo, UsageRecorder};
use crate::errors::Result;
use crate::storage::SeaOrmStorage;
use crate::utils::{lookup_key, short_link};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Redirect {
        link_id: i64,
        target_url: String,
        /// Full external short link, echoed as the `Referer` header
        referer: String,
    },
    NotFound,
}

#[derive(Clone)]
pub struct RedirectResolver {
    storage: Arc<SeaOrmStorage>,
    recorder: UsageRecorder,
    link_prefix: String,
}

impl RedirectResolver {
    pub fn new(storage: Arc<SeaOrmStorage>, link_prefix: impl Into<String>) -> Self {
        Self {
            recorder: UsageRecorder::new(storage.clone()),
            storage,
            link_prefix: link_prefix.into(),
        }
    }

    /// Resolve `request_path` with the client's query string appended.
    ///
    /// Store lookup failures are returned as errors and record nothing.
    /// A failure to record usage is logged and the redirect still happens.
    pub async fn resolve(&self, request_path: &str, client: &ClientInfo) -> Result<RedirectOutcome> {
        let key = lookup_key(request_path, client.query_without_prefix());
        if key.is_empty() {
            return Ok(RedirectOutcome::NotFound);
        }

        let Some(link) = self.storage.find_link(&key).await? else {
            debug!("Redirect link not found: {}", key);
            return Ok(RedirectOutcome::NotFound);
        };

        if let Err(e) = self.recorder.record(&link, client).await {
            error!("Failed to record usage for {}: {}", link.short_path, e);
        }

        debug!("Redirecting {} -> {}", link.short_path, link.target_url);
        Ok(RedirectOutcome::Redirect {
            link_id: link.id,
            referer: short_link(&self.link_prefix, &link.short_path),
            target_url: link.target_url,
        })
    }
}
