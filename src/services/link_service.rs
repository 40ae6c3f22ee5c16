//! Link management service
//!
//! Create/list/delete/show-usage over the link store. Every operation takes
//! the acting user explicitly; the HTTP and CLI layers are responsible for
//! authenticating them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{LinklisterError, Result};
use crate::storage::{Actor, Link, NewLink, SeaOrmStorage, UsageStat};
use crate::utils::url_validator::{UrlValidationError, validate_target_url};
use crate::utils::{normalize_short_path, short_link};

/// Column width of `links.short_path`
pub const MAX_SHORT_PATH_LEN: usize = 512;

// ============ Request/Response DTOs ============

#[derive(Debug, Clone, Deserialize)]
pub struct AddLinkRequest {
    pub short_path: String,
    pub target_url: String,
}

/// Why an add request was rejected before touching the store
#[derive(Debug, PartialEq, Eq)]
pub enum LinkValidationError {
    EmptyPath,
    SlashesOnly,
    PathTooLong(usize),
    InvalidUrl(UrlValidationError),
}

impl std::fmt::Display for LinkValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "Short path is required"),
            Self::SlashesOnly => write!(f, "Short path must contain more than slashes"),
            Self::PathTooLong(len) => write!(
                f,
                "Short path is {} characters long; at most {} are allowed",
                len, MAX_SHORT_PATH_LEN
            ),
            Self::InvalidUrl(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LinkValidationError {}

impl From<LinkValidationError> for LinklisterError {
    fn from(err: LinkValidationError) -> Self {
        LinklisterError::validation(err.to_string())
    }
}

/// An add request that passed validation: normalized path, trimmed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLink {
    pub short_path: String,
    pub target_url: String,
}

impl AddLinkRequest {
    pub fn validate(&self) -> std::result::Result<ValidLink, LinkValidationError> {
        if self.short_path.is_empty() {
            return Err(LinkValidationError::EmptyPath);
        }
        let short_path = normalize_short_path(&self.short_path);
        if short_path.is_empty() {
            return Err(LinkValidationError::SlashesOnly);
        }
        let len = short_path.chars().count();
        if len > MAX_SHORT_PATH_LEN {
            return Err(LinkValidationError::PathTooLong(len));
        }
        let target_url = validate_target_url(&self.target_url)
            .map_err(LinkValidationError::InvalidUrl)?
            .to_string();

        Ok(ValidLink {
            short_path,
            target_url,
        })
    }
}

/// A link together with its external short link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedLink {
    #[serde(flatten)]
    pub link: Link,
    pub short_link: String,
}

/// Result of an add. A duplicate short path is a notice, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddLinkOutcome {
    Created(ListedLink),
    AlreadyExists { short_path: String },
}

impl AddLinkOutcome {
    /// User-facing notice
    pub fn notice(&self) -> String {
        match self {
            AddLinkOutcome::Created(_) => "Your link was saved.".to_string(),
            AddLinkOutcome::AlreadyExists { short_path } => {
                format!("Short path {} already exists!", short_path)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkUsage {
    pub link: ListedLink,
    pub usage: Vec<UsageStat>,
}

// ============ Service ============

#[derive(Clone)]
pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    link_prefix: String,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>, link_prefix: impl Into<String>) -> Self {
        Self {
            storage,
            link_prefix: link_prefix.into(),
        }
    }

    fn listed(&self, link: Link) -> ListedLink {
        ListedLink {
            short_link: short_link(&self.link_prefix, &link.short_path),
            link,
        }
    }

    /// Validate, normalize and store a new link.
    ///
    /// Validation problems are returned as `Validation` errors; an existing
    /// short path yields [`AddLinkOutcome::AlreadyExists`].
    pub async fn add_link(&self, actor: &Actor, req: AddLinkRequest) -> Result<AddLinkOutcome> {
        let valid = req.validate()?;
        self.add_valid_link(actor, valid).await
    }

    /// Store an already validated link
    pub async fn add_valid_link(&self, actor: &Actor, link: ValidLink) -> Result<AddLinkOutcome> {
        let ValidLink {
            short_path,
            target_url,
        } = link;

        if self.storage.find_link(&short_path).await?.is_some() {
            info!(
                "LinkService: {} tried to add existing short path {}",
                actor.username, short_path
            );
            return Ok(AddLinkOutcome::AlreadyExists { short_path });
        }

        let created = self
            .storage
            .create_link(NewLink {
                short_path: short_path.clone(),
                target_url,
                created_by: actor.user_id,
            })
            .await;

        match created {
            Ok(link) => {
                info!(
                    "LinkService: {} created link {} -> {}",
                    actor.username, link.short_path, link.target_url
                );
                Ok(AddLinkOutcome::Created(self.listed(link)))
            }
            // lost the race against a concurrent insert
            Err(LinklisterError::DuplicateKey(_)) => {
                Ok(AddLinkOutcome::AlreadyExists { short_path })
            }
            Err(e) => Err(e),
        }
    }

    /// Links owned by the actor, newest first
    pub async fn list_mine(&self, actor: &Actor) -> Result<Vec<ListedLink>> {
        let links = self.storage.list_links(Some(actor.user_id)).await?;
        Ok(links.into_iter().map(|l| self.listed(l)).collect())
    }

    /// Every link, newest first
    pub async fn list_all(&self, _actor: &Actor) -> Result<Vec<ListedLink>> {
        self.all_links().await
    }

    /// Every link without an acting user, for operator tooling
    pub async fn all_links(&self) -> Result<Vec<ListedLink>> {
        let links = self.storage.list_links(None).await?;
        Ok(links.into_iter().map(|l| self.listed(l)).collect())
    }

    /// Delete a link and its usage rows. Any authenticated user may delete.
    pub async fn delete_link(&self, actor: &Actor, id: i64) -> Result<Link> {
        let link = self.storage.delete_link(id).await?;
        info!(
            "LinkService: {} deleted link {} (owner {})",
            actor.username, link.short_path, link.created_by
        );
        Ok(link)
    }

    pub async fn show_usage(&self, _actor: &Actor, id: i64) -> Result<LinkUsage> {
        let link = self.storage.get_link(id).await?;
        let usage = self.storage.list_usage(id).await?;
        Ok(LinkUsage {
            link: self.listed(link),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_outcome_notice() {
        assert_eq!(
            AddLinkOutcome::AlreadyExists {
                short_path: "/lib".to_string()
            }
            .notice(),
            "Short path /lib already exists!"
        );
    }

    #[test]
    fn test_listed_link_serializes_flat() {
        let listed = ListedLink {
            link: Link {
                id: 1,
                short_path: "/lib".to_string(),
                target_url: "https://example.com".to_string(),
                create_date: chrono::Utc::now(),
                created_by: 2,
            },
            short_link: "https://go.example.org/lib".to_string(),
        };

        let json = serde_json::to_value(&listed).unwrap();
        assert_eq!(json["short_path"], "/lib");
        assert_eq!(json["short_link"], "https://go.example.org/lib");
        assert_eq!(json["created_by"], 2);
    }

    fn request(short_path: &str, target_url: &str) -> AddLinkRequest {
        AddLinkRequest {
            short_path: short_path.to_string(),
            target_url: target_url.to_string(),
        }
    }

    #[test]
    fn test_validate_normalizes() {
        assert_eq!(
            request("lib/", " https://example.com ").validate(),
            Ok(ValidLink {
                short_path: "/lib".to_string(),
                target_url: "https://example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejections() {
        assert_eq!(
            request("", "https://example.com").validate(),
            Err(LinkValidationError::EmptyPath)
        );
        assert_eq!(
            request("///", "https://example.com").validate(),
            Err(LinkValidationError::SlashesOnly)
        );
        assert!(matches!(
            request("/ok", "ftp://example.com").validate(),
            Err(LinkValidationError::InvalidUrl(UrlValidationError::InvalidProtocol(_)))
        ));
    }

    #[test]
    fn test_validate_path_length() {
        // the leading slash counts
        let max = "a".repeat(MAX_SHORT_PATH_LEN - 1);
        assert!(request(&max, "https://example.com").validate().is_ok());

        let long = "a".repeat(MAX_SHORT_PATH_LEN);
        assert_eq!(
            request(&long, "https://example.com").validate(),
            Err(LinkValidationError::PathTooLong(MAX_SHORT_PATH_LEN + 1))
        );
        // characters, not bytes
        let wide = "é".repeat(MAX_SHORT_PATH_LEN - 1);
        assert!(request(&wide, "https://example.com").validate().is_ok());
    }
}
