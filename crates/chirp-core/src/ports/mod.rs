//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod batch;
mod repository;

use std::sync::Arc;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use batch::{BatchWriter, WriteBatch, WriteOp};
pub use repository::{
    AccountRepository, BaseRepository, FollowRepository, LikeRepository, PostRepository,
    ReplyRepository, ReshareRepository,
};

/// Every store the engine talks to.
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub replies: Arc<dyn ReplyRepository>,
    pub reshares: Arc<dyn ReshareRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub batches: Arc<dyn BatchWriter>,
}
