use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountId;
use super::post::PostId;

pub type LikeId = i64;

/// Like entity - one account's endorsement of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: LikeId,
    pub author_id: AccountId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLike {
    pub author_id: AccountId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

impl NewLike {
    pub fn new(author_id: AccountId, post_id: PostId, created_at: DateTime<Utc>) -> Self {
        Self {
            author_id,
            post_id,
            created_at,
        }
    }
}
