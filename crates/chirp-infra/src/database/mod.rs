//! PostgreSQL adapters.

mod connections;
mod postgres_base;
mod postgres_batch;
pub mod postgres_repo;

pub mod entity;

use std::sync::Arc;

use sea_orm::DbConn;

use chirp_core::ports::Stores;

pub use connections::{DatabaseConfig, connect};
pub use postgres_base::PostgresBaseRepository;
pub use postgres_batch::PostgresBatchWriter;
pub use postgres_repo::{
    PostgresAccountRepository, PostgresFollowRepository, PostgresLikeRepository,
    PostgresPostRepository, PostgresReplyRepository, PostgresReshareRepository,
};

/// Every engine port backed by the same connection pool.
pub fn postgres_stores(db: Arc<DbConn>) -> Stores {
    Stores {
        accounts: Arc::new(PostgresAccountRepository::new(Arc::clone(&db))),
        posts: Arc::new(PostgresPostRepository::new(Arc::clone(&db))),
        replies: Arc::new(PostgresReplyRepository::new(Arc::clone(&db))),
        reshares: Arc::new(PostgresReshareRepository::new(Arc::clone(&db))),
        likes: Arc::new(PostgresLikeRepository::new(Arc::clone(&db))),
        follows: Arc::new(PostgresFollowRepository::new(Arc::clone(&db))),
        batches: Arc::new(PostgresBatchWriter::new(db)),
    }
}
