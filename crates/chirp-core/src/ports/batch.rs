//! Multi-write batches applied as one unit.

use async_trait::async_trait;

use crate::domain::AccountId;
use crate::error::RepoError;

/// A single write inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Set the account's active flag to false. Fails with `NotFound` if absent.
    DeactivateAccount(AccountId),
    /// Soft-delete every live post by the account. Matching nothing is not an error.
    SoftDeletePostsByAuthor(AccountId),
    /// Soft-delete every live reply by the account. Matching nothing is not an error.
    SoftDeleteRepliesByAuthor(AccountId),
}

/// Ordered list of writes committed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: WriteOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Applies a batch all-or-nothing: if any op fails, none of them is visible afterwards.
#[async_trait]
pub trait BatchWriter: Send + Sync {
    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError>;
}
