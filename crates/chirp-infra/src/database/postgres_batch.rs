//! Atomic multi-write commits inside one database transaction.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, EntityTrait, QueryFilter, TransactionTrait,
};

use chirp_core::error::RepoError;
use chirp_core::ports::{BatchWriter, WriteBatch, WriteOp};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::reply::{self, Entity as ReplyEntity};
use super::postgres_base::map_db_err;

/// Commits a [`WriteBatch`] in a single transaction. Dropping the transaction on
/// the error path rolls it back.
pub struct PostgresBatchWriter {
    db: Arc<DbConn>,
}

impl PostgresBatchWriter {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

async fn apply<C: ConnectionTrait>(conn: &C, op: WriteOp) -> Result<(), RepoError> {
    match op {
        WriteOp::DeactivateAccount(id) => {
            let result = AccountEntity::update_many()
                .col_expr(account::Column::Active, Expr::value(false))
                .filter(account::Column::Id.eq(id))
                .exec(conn)
                .await
                .map_err(map_db_err)?;
            if result.rows_affected == 0 {
                return Err(RepoError::NotFound);
            }
        }
        WriteOp::SoftDeletePostsByAuthor(author) => {
            let result = PostEntity::update_many()
                .col_expr(post::Column::Deleted, Expr::value(true))
                .filter(post::Column::AuthorId.eq(author))
                .filter(post::Column::Deleted.eq(false))
                .exec(conn)
                .await
                .map_err(map_db_err)?;
            tracing::debug!(author, posts = result.rows_affected, "Posts soft-deleted");
        }
        WriteOp::SoftDeleteRepliesByAuthor(author) => {
            let result = ReplyEntity::update_many()
                .col_expr(reply::Column::Deleted, Expr::value(true))
                .filter(reply::Column::AuthorId.eq(author))
                .filter(reply::Column::Deleted.eq(false))
                .exec(conn)
                .await
                .map_err(map_db_err)?;
            tracing::debug!(author, replies = result.rows_affected, "Replies soft-deleted");
        }
    }
    Ok(())
}

#[async_trait]
impl BatchWriter for PostgresBatchWriter {
    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let ops = batch.into_ops();
        tracing::debug!(ops = ops.len(), "Committing write batch");

        for op in ops {
            apply(&txn, op).await?;
        }

        txn.commit().await.map_err(map_db_err)
    }
}
