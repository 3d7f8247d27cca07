//! Identity bootstrap and account lifecycle.

use chrono::Utc;

use super::require_account;
use crate::domain::{Account, AccountId, NewAccount};
use crate::error::{DomainError, RepoError};
use crate::ports::{Stores, TokenClaims, WriteBatch, WriteOp};

/// Domain used to synthesise an email when the token carries none.
pub const FALLBACK_EMAIL_DOMAIN: &str = "chirp.local";

#[derive(Clone)]
pub struct AccountService {
    stores: Stores,
}

impl AccountService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Return the account for the token's subject, creating it on first use.
    ///
    /// Safe under concurrent first use: when the insert loses a race on the subject,
    /// the row written by the winner is returned. A clash on handle or email with a
    /// different subject is a real conflict and surfaces as `ConflictRace`.
    pub async fn ensure_account(&self, claims: &TokenClaims) -> Result<Account, DomainError> {
        if let Some(existing) = self.stores.accounts.find_by_subject(&claims.subject).await? {
            return Ok(existing);
        }

        let handle = claims.preferred_username.clone().ok_or_else(|| {
            DomainError::Validation("token carries no preferred_username claim".to_string())
        })?;
        let email = claims
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| format!("{handle}@{FALLBACK_EMAIL_DOMAIN}"));

        let draft = NewAccount::new(claims.subject.clone(), handle, email, Utc::now())?;
        let (handle, email) = (draft.handle.clone(), draft.email.clone());

        match self.stores.accounts.insert(draft).await {
            Ok(account) => {
                tracing::info!(account_id = account.id, handle = %account.handle, "Account created");
                Ok(account)
            }
            Err(RepoError::UniqueViolation(constraint)) => {
                match self.stores.accounts.find_by_subject(&claims.subject).await? {
                    Some(account) => {
                        tracing::debug!(
                            account_id = account.id,
                            "Concurrent bootstrap already created the account"
                        );
                        Ok(account)
                    }
                    None => {
                        tracing::warn!(%constraint, handle = %handle, "Account bootstrap conflict");
                        Err(DomainError::ConflictRace(format!(
                            "handle '{handle}' or email '{email}' is already in use"
                        )))
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get(&self, id: AccountId) -> Result<Account, DomainError> {
        require_account(&self.stores, id).await
    }

    pub async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.stores.accounts.find_by_handle(handle).await?)
    }

    pub async fn list(&self) -> Result<Vec<Account>, DomainError> {
        Ok(self.stores.accounts.list_all().await?)
    }

    /// Deactivate an account and soft-delete its posts and replies in one batch.
    ///
    /// The cascades select rows by author inside the commit, so content published
    /// concurrently is caught too. If any write fails the account stays active.
    pub async fn deactivate(&self, id: AccountId) -> Result<Account, DomainError> {
        let account = require_account(&self.stores, id).await?;

        let mut batch = WriteBatch::new();
        batch
            .push(WriteOp::DeactivateAccount(id))
            .push(WriteOp::SoftDeletePostsByAuthor(id))
            .push(WriteOp::SoftDeleteRepliesByAuthor(id));

        self.stores.batches.commit(batch).await.map_err(|e| match e {
            RepoError::NotFound => {
                DomainError::Internal(format!("deactivation of account {id} hit a missing row"))
            }
            other => other.into(),
        })?;

        tracing::info!(account_id = id, handle = %account.handle, "Account deactivated");

        Ok(Account {
            active: false,
            ..account
        })
    }
}
