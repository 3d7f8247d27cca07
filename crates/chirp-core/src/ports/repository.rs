use async_trait::async_trait;

use crate::domain::{
    Account, AccountId, FollowEdge, Like, LikeId, NewAccount, NewFollow, NewLike, NewPost,
    NewReply, NewReshare, Post, PostId, Reply, ReplyId, Reshare, ReshareId,
};
use crate::error::RepoError;

/// Generic read operations shared by every store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Find every entity whose ID is in `ids`. Missing IDs are skipped; order is unspecified.
    async fn find_by_ids(&self, ids: &[ID]) -> Result<Vec<T>, RepoError>;
}

/// Account store.
#[async_trait]
pub trait AccountRepository: BaseRepository<Account, AccountId> {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<Account>, RepoError>;

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, RepoError>;

    /// Persist a new account. Subject, handle and email are each unique;
    /// a clash yields `RepoError::UniqueViolation`.
    async fn insert(&self, account: NewAccount) -> Result<Account, RepoError>;

    async fn list_all(&self) -> Result<Vec<Account>, RepoError>;
}

/// Post store. "Visible" reads skip soft-deleted posts and posts of inactive authors.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Flip the soft-delete flag. `RepoError::NotFound` if the post does not exist.
    async fn mark_deleted(&self, id: PostId) -> Result<(), RepoError>;

    /// Newest-first visible posts by any of `authors`, at most `limit`.
    async fn visible_by_authors(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<Post>, RepoError>;

    /// Newest-first visible posts of every account, at most `limit`.
    async fn visible_recent(&self, limit: usize) -> Result<Vec<Post>, RepoError>;
}

#[async_trait]
pub trait ReplyRepository: BaseRepository<Reply, ReplyId> {
    async fn insert(&self, reply: NewReply) -> Result<Reply, RepoError>;

    async fn mark_deleted(&self, id: ReplyId) -> Result<(), RepoError>;

    /// Oldest-first visible replies to a post.
    async fn visible_for_post(&self, post: PostId) -> Result<Vec<Reply>, RepoError>;
}

#[async_trait]
pub trait ReshareRepository: BaseRepository<Reshare, ReshareId> {
    /// Persist a reshare. At most one per (author, post).
    async fn insert(&self, reshare: NewReshare) -> Result<Reshare, RepoError>;

    async fn find_by_pair(
        &self,
        author: AccountId,
        post: PostId,
    ) -> Result<Option<Reshare>, RepoError>;

    /// Newest-first reshares made by any of `authors`, at most `limit`.
    async fn by_authors(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<Reshare>, RepoError>;
}

#[async_trait]
pub trait LikeRepository: BaseRepository<Like, LikeId> {
    /// Persist a like. At most one per (author, post).
    async fn insert(&self, like: NewLike) -> Result<Like, RepoError>;

    async fn find_by_pair(
        &self,
        author: AccountId,
        post: PostId,
    ) -> Result<Option<Like>, RepoError>;

    /// Remove the like by `author` on `post`. Returns whether a row was removed.
    async fn delete_by_pair(&self, author: AccountId, post: PostId) -> Result<bool, RepoError>;

    /// Oldest-first likes of a post.
    async fn for_post(&self, post: PostId) -> Result<Vec<Like>, RepoError>;
}

/// Social graph store.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Persist an edge. At most one per (follower, followed).
    async fn insert(&self, follow: NewFollow) -> Result<FollowEdge, RepoError>;

    async fn exists(&self, follower: AccountId, followed: AccountId) -> Result<bool, RepoError>;

    async fn delete_by_pair(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> Result<bool, RepoError>;

    /// Accounts `follower` follows.
    async fn followed_ids(&self, follower: AccountId) -> Result<Vec<AccountId>, RepoError>;

    /// Accounts following `followed`.
    async fn follower_ids(&self, followed: AccountId) -> Result<Vec<AccountId>, RepoError>;
}
