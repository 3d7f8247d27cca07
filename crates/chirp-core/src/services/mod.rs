//! Application services - the aggregation engine and its write-side rules.
//!
//! Every write goes through exactly one store call (or one committed batch), so each
//! operation is atomic at the store. Duplicate-prone creates follow the same shape:
//! check for the existing row, insert, and on a unique violation re-check and return
//! the row that won the race.

mod accounts;
mod content;
mod social;
mod timeline;

pub use accounts::{AccountService, FALLBACK_EMAIL_DOMAIN};
pub use content::ContentService;
pub use social::SocialService;
pub use timeline::TimelineService;

use crate::domain::{Account, AccountId, Post, PostId};
use crate::error::DomainError;
use crate::ports::Stores;

/// Feed size used when the caller does not ask for one.
pub const DEFAULT_TIMELINE_LIMIT: usize = 50;
/// Global feed size used when the caller does not ask for one.
pub const DEFAULT_GLOBAL_FEED_LIMIT: usize = 100;

/// All engine services sharing one set of stores.
#[derive(Clone)]
pub struct Engine {
    pub accounts: AccountService,
    pub content: ContentService,
    pub social: SocialService,
    pub timeline: TimelineService,
}

impl Engine {
    pub fn new(stores: Stores) -> Self {
        Self {
            accounts: AccountService::new(stores.clone()),
            content: ContentService::new(stores.clone()),
            social: SocialService::new(stores.clone()),
            timeline: TimelineService::new(stores),
        }
    }
}

pub(crate) async fn require_account(stores: &Stores, id: AccountId) -> Result<Account, DomainError> {
    stores
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Account", id))
}

pub(crate) async fn require_post(stores: &Stores, id: PostId) -> Result<Post, DomainError> {
    stores
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", id))
}

/// A post that normal reads may show; hidden posts are reported as missing.
pub(crate) async fn require_visible_post(
    stores: &Stores,
    id: PostId,
) -> Result<Post, DomainError> {
    let post = require_post(stores, id).await?;
    let author = require_account(stores, post.author_id).await?;
    if !post.is_visible_with(&author) {
        return Err(DomainError::not_found("Post", id));
    }
    Ok(post)
}
