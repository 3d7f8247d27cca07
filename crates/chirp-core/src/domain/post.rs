use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountId};
use crate::error::DomainError;

pub type PostId = i64;

/// Maximum body length for posts and replies, in characters.
pub const MAX_BODY_CHARS: usize = 280;

/// Post entity - an original piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: AccountId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

impl Post {
    pub fn is_by(&self, account_id: AccountId) -> bool {
        self.author_id == account_id
    }

    /// Whether normal read paths may show this post, given its author record.
    pub fn is_visible_with(&self, author: &Account) -> bool {
        !self.deleted && author.id == self.author_id && author.is_active()
    }
}

/// A validated post awaiting its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: AccountId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(
        author_id: AccountId,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let body = validate_body(body.into(), "post")?;
        Ok(Self {
            author_id,
            body,
            created_at,
        })
    }
}

pub(crate) fn validate_body(body: String, kind: &str) -> Result<String, DomainError> {
    if body.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{kind} body must not be blank"
        )));
    }
    if body.chars().count() > MAX_BODY_CHARS {
        return Err(DomainError::Validation(format!(
            "{kind} body must be at most {MAX_BODY_CHARS} characters"
        )));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_boundary() {
        let now = Utc::now();
        assert!(NewPost::new(1, "x".repeat(280), now).is_ok());
        assert!(matches!(
            NewPost::new(1, "x".repeat(281), now),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_body_rejected() {
        assert!(NewPost::new(1, "   \n", Utc::now()).is_err());
        assert!(NewPost::new(1, "", Utc::now()).is_err());
    }

    #[test]
    fn test_body_counts_characters_not_bytes() {
        // 280 two-byte characters
        assert!(NewPost::new(1, "ñ".repeat(280), Utc::now()).is_ok());
    }

    #[test]
    fn test_visibility_requires_live_post_and_active_author() {
        let author = Account {
            id: 7,
            subject: "sub-7".into(),
            handle: "alice".into(),
            email: "alice@x.io".into(),
            active: true,
            registered_at: Utc::now(),
        };
        let mut post = Post {
            id: 1,
            author_id: 7,
            body: "hello".into(),
            created_at: Utc::now(),
            deleted: false,
        };
        assert!(post.is_visible_with(&author));

        post.deleted = true;
        assert!(!post.is_visible_with(&author));

        post.deleted = false;
        let inactive = Account {
            active: false,
            ..author
        };
        assert!(!post.is_visible_with(&inactive));
    }
}
