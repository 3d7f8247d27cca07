//! Follow graph mutations and listings.

use chrono::Utc;

use super::require_account;
use crate::domain::{Account, AccountId, NewFollow, ensure_distinct};
use crate::error::{DomainError, RepoError};
use crate::ports::Stores;

#[derive(Clone)]
pub struct SocialService {
    stores: Stores,
}

impl SocialService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Follow `target`. Following an account twice is a no-op.
    pub async fn follow(&self, actor: AccountId, target: AccountId) -> Result<(), DomainError> {
        ensure_distinct(actor, target)?;
        let follower = require_account(&self.stores, actor).await?;
        let followed = require_account(&self.stores, target).await?;

        if self.stores.follows.exists(actor, target).await? {
            tracing::debug!(follower_id = actor, followed_id = target, "Already following");
            return Ok(());
        }

        let draft = NewFollow::between(&follower, &followed, Utc::now())?;
        match self.stores.follows.insert(draft).await {
            Ok(_) => Ok(()),
            Err(RepoError::UniqueViolation(constraint)) => {
                if self.stores.follows.exists(actor, target).await? {
                    tracing::debug!(follower_id = actor, followed_id = target, "Follow created concurrently");
                    Ok(())
                } else {
                    Err(DomainError::ConflictRace(constraint))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stop following `target`. Unfollowing an account you do not follow is a no-op.
    pub async fn unfollow(&self, actor: AccountId, target: AccountId) -> Result<(), DomainError> {
        ensure_distinct(actor, target)?;
        require_account(&self.stores, actor).await?;
        require_account(&self.stores, target).await?;

        if !self.stores.follows.delete_by_pair(actor, target).await? {
            tracing::debug!(follower_id = actor, followed_id = target, "Nothing to unfollow");
        }
        Ok(())
    }

    pub async fn is_following(
        &self,
        actor: AccountId,
        target: AccountId,
    ) -> Result<bool, DomainError> {
        Ok(self.stores.follows.exists(actor, target).await?)
    }

    /// Accounts the actor follows.
    pub async fn following(&self, actor: AccountId) -> Result<Vec<Account>, DomainError> {
        require_account(&self.stores, actor).await?;
        let ids = self.stores.follows.followed_ids(actor).await?;
        self.accounts_sorted(&ids).await
    }

    /// Accounts following `account`.
    pub async fn followers_of(&self, account: AccountId) -> Result<Vec<Account>, DomainError> {
        require_account(&self.stores, account).await?;
        let ids = self.stores.follows.follower_ids(account).await?;
        self.accounts_sorted(&ids).await
    }

    async fn accounts_sorted(&self, ids: &[AccountId]) -> Result<Vec<Account>, DomainError> {
        let mut accounts = self.stores.accounts.find_by_ids(ids).await?;
        accounts.sort_by(|a, b| a.handle.cmp(&b.handle));
        Ok(accounts)
    }
}
