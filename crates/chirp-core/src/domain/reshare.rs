use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountId};
use super::post::{Post, PostId};
use crate::error::DomainError;

pub type ReshareId = i64;

/// Reshare entity - an account re-broadcasting someone else's post. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reshare {
    pub id: ReshareId,
    pub author_id: AccountId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReshare {
    pub author_id: AccountId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

impl NewReshare {
    /// Reshares always point at an original post; resharing your own post is rejected.
    pub fn of(
        resharer: &Account,
        original: &Post,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if original.is_by(resharer.id) {
            return Err(DomainError::SelfActionForbidden(
                "cannot reshare your own post".to_string(),
            ));
        }
        Ok(Self {
            author_id: resharer.id,
            post_id: original.id,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: AccountId) -> Account {
        Account {
            id,
            subject: format!("sub-{id}"),
            handle: format!("user{id:04}"),
            email: format!("user{id}@x.io"),
            active: true,
            registered_at: Utc::now(),
        }
    }

    fn post_by(author_id: AccountId) -> Post {
        Post {
            id: 10,
            author_id,
            body: "hello world".into(),
            created_at: Utc::now(),
            deleted: false,
        }
    }

    #[test]
    fn test_self_reshare_forbidden() {
        let result = NewReshare::of(&account(1), &post_by(1), Utc::now());
        assert!(matches!(result, Err(DomainError::SelfActionForbidden(_))));
    }

    #[test]
    fn test_reshare_of_other_post() {
        let draft = NewReshare::of(&account(2), &post_by(1), Utc::now()).unwrap();
        assert_eq!(draft.author_id, 2);
        assert_eq!(draft.post_id, 10);
    }
}
