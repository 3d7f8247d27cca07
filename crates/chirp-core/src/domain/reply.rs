use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountId};
use super::post::{PostId, validate_body};
use crate::error::DomainError;

pub type ReplyId = i64;

/// Reply entity - content written in response to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub author_id: AccountId,
    pub post_id: PostId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

impl Reply {
    pub fn is_by(&self, account_id: AccountId) -> bool {
        self.author_id == account_id
    }

    pub fn is_visible_with(&self, author: &Account) -> bool {
        !self.deleted && author.id == self.author_id && author.is_active()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub author_id: AccountId,
    pub post_id: PostId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewReply {
    pub fn new(
        author_id: AccountId,
        post_id: PostId,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let body = validate_body(body.into(), "reply")?;
        Ok(Self {
            author_id,
            post_id,
            body,
            created_at,
        })
    }
}
