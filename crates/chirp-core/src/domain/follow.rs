use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountId};
use crate::error::DomainError;

/// Directed follow edge: `follower` sees `followed`'s content in their feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub id: i64,
    pub follower_id: AccountId,
    pub followed_id: AccountId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFollow {
    pub follower_id: AccountId,
    pub followed_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl NewFollow {
    pub fn between(
        follower: &Account,
        followed: &Account,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        ensure_distinct(follower.id, followed.id)?;
        Ok(Self {
            follower_id: follower.id,
            followed_id: followed.id,
            created_at,
        })
    }
}

/// Follow and unfollow both reject targeting yourself.
pub fn ensure_distinct(follower: AccountId, followed: AccountId) -> Result<(), DomainError> {
    if follower == followed {
        return Err(DomainError::SelfActionForbidden(
            "an account cannot follow itself".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_follow_forbidden() {
        assert!(matches!(
            ensure_distinct(3, 3),
            Err(DomainError::SelfActionForbidden(_))
        ));
        assert!(ensure_distinct(3, 4).is_ok());
    }
}
