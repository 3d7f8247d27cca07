use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub type AccountId = i64;

pub const HANDLE_MIN_CHARS: usize = 5;
pub const HANDLE_MAX_CHARS: usize = 25;

/// Account entity - a registered identity, keyed externally by its auth subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub subject: String,
    pub handle: String,
    pub email: String,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// An account that has passed validation but has no store-assigned id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub subject: String,
    pub handle: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

impl NewAccount {
    /// Validate and build a new account. Accounts always start active.
    pub fn new(
        subject: impl Into<String>,
        handle: impl Into<String>,
        email: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let subject = subject.into();
        let handle = handle.into();
        let email = email.into();

        if subject.trim().is_empty() {
            return Err(DomainError::Validation(
                "subject must not be blank".to_string(),
            ));
        }
        if handle.trim().is_empty() {
            return Err(DomainError::Validation("handle must not be blank".to_string()));
        }
        let len = handle.chars().count();
        if !(HANDLE_MIN_CHARS..=HANDLE_MAX_CHARS).contains(&len) {
            return Err(DomainError::Validation(format!(
                "handle must be between {HANDLE_MIN_CHARS} and {HANDLE_MAX_CHARS} characters"
            )));
        }
        if email.trim().is_empty() {
            return Err(DomainError::Validation("email must not be blank".to_string()));
        }

        Ok(Self {
            subject,
            handle,
            email,
            registered_at,
        })
    }
}
