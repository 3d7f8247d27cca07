//! In-memory store - used when no database is configured, and by the test suites.
//!
//! Enforces the same uniqueness rules as the PostgreSQL schema and reports clashes
//! with the same constraint names. Each trait method takes the lock once, so every
//! call is atomic; check-then-insert across two calls is not.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use chirp_core::domain::{
    Account, AccountId, FollowEdge, Like, LikeId, NewAccount, NewFollow, NewLike, NewPost,
    NewReply, NewReshare, Post, PostId, Reply, ReplyId, Reshare, ReshareId,
};
use chirp_core::error::RepoError;
use chirp_core::ports::{
    AccountRepository, BaseRepository, BatchWriter, FollowRepository, LikeRepository,
    PostRepository, ReplyRepository, ReshareRepository, Stores, WriteBatch, WriteOp,
};

pub const UQ_ACCOUNTS_SUBJECT: &str = "uq_accounts_subject";
pub const UQ_ACCOUNTS_HANDLE: &str = "uq_accounts_handle";
pub const UQ_ACCOUNTS_EMAIL: &str = "uq_accounts_email";
pub const UQ_RESHARES_AUTHOR_POST: &str = "uq_reshares_author_post";
pub const UQ_LIKES_AUTHOR_POST: &str = "uq_likes_author_post";
pub const UQ_FOLLOWS_PAIR: &str = "uq_follows_pair";

#[derive(Debug, Clone, Default)]
struct State {
    last_id: i64,
    accounts: BTreeMap<AccountId, Account>,
    posts: BTreeMap<PostId, Post>,
    replies: BTreeMap<ReplyId, Reply>,
    reshares: BTreeMap<ReshareId, Reshare>,
    likes: BTreeMap<LikeId, Like>,
    follows: BTreeMap<i64, FollowEdge>,
}

impl State {
    /// One sequence for every table, like a shared BIGSERIAL.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn author_active(&self, id: AccountId) -> bool {
        self.accounts.get(&id).is_some_and(Account::is_active)
    }

    fn post_visible(&self, post: &Post) -> bool {
        !post.deleted && self.author_active(post.author_id)
    }

    fn apply(&mut self, op: WriteOp) -> Result<(), RepoError> {
        match op {
            WriteOp::DeactivateAccount(id) => {
                let account = self.accounts.get_mut(&id).ok_or(RepoError::NotFound)?;
                account.active = false;
            }
            WriteOp::SoftDeletePostsByAuthor(author) => {
                for post in self.posts.values_mut().filter(|p| p.author_id == author) {
                    post.deleted = true;
                }
            }
            WriteOp::SoftDeleteRepliesByAuthor(author) => {
                for reply in self.replies.values_mut().filter(|r| r.author_id == author) {
                    reply.deleted = true;
                }
            }
        }
        Ok(())
    }
}

/// Every store port over one shared, lock-protected state.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a shared store as the full set of engine ports.
    pub fn stores(self: &Arc<Self>) -> Stores {
        Stores {
            accounts: self.clone(),
            posts: self.clone(),
            replies: self.clone(),
            reshares: self.clone(),
            likes: self.clone(),
            follows: self.clone(),
            batches: self.clone(),
        }
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn pick<T: Clone>(map: &BTreeMap<i64, T>, ids: &[i64]) -> Vec<T> {
    ids.iter().filter_map(|id| map.get(id).cloned()).collect()
}

#[async_trait]
impl BaseRepository<Account, AccountId> for InMemoryStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepoError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, RepoError> {
        Ok(pick(&self.state.read().await.accounts, ids))
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<Account>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.subject == subject)
            .cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, RepoError> {
        let state = self.state.read().await;
        Ok(state.accounts.values().find(|a| a.handle == handle).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, RepoError> {
        let mut state = self.state.write().await;

        for existing in state.accounts.values() {
            let clash = if existing.subject == account.subject {
                Some(UQ_ACCOUNTS_SUBJECT)
            } else if existing.handle == account.handle {
                Some(UQ_ACCOUNTS_HANDLE)
            } else if existing.email == account.email {
                Some(UQ_ACCOUNTS_EMAIL)
            } else {
                None
            };
            if let Some(constraint) = clash {
                return Err(RepoError::UniqueViolation(constraint.to_string()));
            }
        }

        let id = state.next_id();
        let account = Account {
            id,
            subject: account.subject,
            handle: account.handle,
            email: account.email,
            active: true,
            registered_at: account.registered_at,
        };
        state.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn list_all(&self) -> Result<Vec<Account>, RepoError> {
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, RepoError> {
        Ok(pick(&self.state.read().await.posts, ids))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if !state.accounts.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("fk_posts_author".to_string()));
        }
        let id = state.next_id();
        let post = Post {
            id,
            author_id: post.author_id,
            body: post.body,
            created_at: post.created_at,
            deleted: false,
        };
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn mark_deleted(&self, id: PostId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.posts.get_mut(&id).ok_or(RepoError::NotFound)?.deleted = true;
        Ok(())
    }

    async fn visible_by_authors(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| authors.contains(&p.author_id) && state.post_visible(p))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        posts.truncate(limit);
        Ok(posts)
    }

    async fn visible_recent(&self, limit: usize) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| state.post_visible(p))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        posts.truncate(limit);
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Reply, ReplyId> for InMemoryStore {
    async fn find_by_id(&self, id: ReplyId) -> Result<Option<Reply>, RepoError> {
        Ok(self.state.read().await.replies.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ReplyId]) -> Result<Vec<Reply>, RepoError> {
        Ok(pick(&self.state.read().await.replies, ids))
    }
}

#[async_trait]
impl ReplyRepository for InMemoryStore {
    async fn insert(&self, reply: NewReply) -> Result<Reply, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&reply.post_id) {
            return Err(RepoError::Constraint("fk_replies_post".to_string()));
        }
        let id = state.next_id();
        let reply = Reply {
            id,
            author_id: reply.author_id,
            post_id: reply.post_id,
            body: reply.body,
            created_at: reply.created_at,
            deleted: false,
        };
        state.replies.insert(id, reply.clone());
        Ok(reply)
    }

    async fn mark_deleted(&self, id: ReplyId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.replies.get_mut(&id).ok_or(RepoError::NotFound)?.deleted = true;
        Ok(())
    }

    async fn visible_for_post(&self, post: PostId) -> Result<Vec<Reply>, RepoError> {
        let state = self.state.read().await;
        let mut replies: Vec<Reply> = state
            .replies
            .values()
            .filter(|r| r.post_id == post && !r.deleted && state.author_active(r.author_id))
            .cloned()
            .collect();
        replies.sort_by_key(|r| (r.created_at, r.id));
        Ok(replies)
    }
}

#[async_trait]
impl BaseRepository<Reshare, ReshareId> for InMemoryStore {
    async fn find_by_id(&self, id: ReshareId) -> Result<Option<Reshare>, RepoError> {
        Ok(self.state.read().await.reshares.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ReshareId]) -> Result<Vec<Reshare>, RepoError> {
        Ok(pick(&self.state.read().await.reshares, ids))
    }
}

#[async_trait]
impl ReshareRepository for InMemoryStore {
    async fn insert(&self, reshare: NewReshare) -> Result<Reshare, RepoError> {
        let mut state = self.state.write().await;
        if state
            .reshares
            .values()
            .any(|r| r.author_id == reshare.author_id && r.post_id == reshare.post_id)
        {
            return Err(RepoError::UniqueViolation(
                UQ_RESHARES_AUTHOR_POST.to_string(),
            ));
        }
        let id = state.next_id();
        let reshare = Reshare {
            id,
            author_id: reshare.author_id,
            post_id: reshare.post_id,
            created_at: reshare.created_at,
        };
        state.reshares.insert(id, reshare.clone());
        Ok(reshare)
    }

    async fn find_by_pair(
        &self,
        author: AccountId,
        post: PostId,
    ) -> Result<Option<Reshare>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .reshares
            .values()
            .find(|r| r.author_id == author && r.post_id == post)
            .cloned())
    }

    async fn by_authors(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<Reshare>, RepoError> {
        let state = self.state.read().await;
        let mut reshares: Vec<Reshare> = state
            .reshares
            .values()
            .filter(|r| authors.contains(&r.author_id))
            .cloned()
            .collect();
        newest_first(&mut reshares, |r| (r.created_at, r.id));
        reshares.truncate(limit);
        Ok(reshares)
    }
}

#[async_trait]
impl BaseRepository<Like, LikeId> for InMemoryStore {
    async fn find_by_id(&self, id: LikeId) -> Result<Option<Like>, RepoError> {
        Ok(self.state.read().await.likes.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[LikeId]) -> Result<Vec<Like>, RepoError> {
        Ok(pick(&self.state.read().await.likes, ids))
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn insert(&self, like: NewLike) -> Result<Like, RepoError> {
        let mut state = self.state.write().await;
        if state
            .likes
            .values()
            .any(|l| l.author_id == like.author_id && l.post_id == like.post_id)
        {
            return Err(RepoError::UniqueViolation(UQ_LIKES_AUTHOR_POST.to_string()));
        }
        let id = state.next_id();
        let like = Like {
            id,
            author_id: like.author_id,
            post_id: like.post_id,
            created_at: like.created_at,
        };
        state.likes.insert(id, like.clone());
        Ok(like)
    }

    async fn find_by_pair(
        &self,
        author: AccountId,
        post: PostId,
    ) -> Result<Option<Like>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .likes
            .values()
            .find(|l| l.author_id == author && l.post_id == post)
            .cloned())
    }

    async fn delete_by_pair(&self, author: AccountId, post: PostId) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        let found = state
            .likes
            .iter()
            .find(|(_, l)| l.author_id == author && l.post_id == post)
            .map(|(id, _)| *id);
        Ok(found.and_then(|id| state.likes.remove(&id)).is_some())
    }

    async fn for_post(&self, post: PostId) -> Result<Vec<Like>, RepoError> {
        let state = self.state.read().await;
        let mut likes: Vec<Like> = state
            .likes
            .values()
            .filter(|l| l.post_id == post)
            .cloned()
            .collect();
        likes.sort_by_key(|l| (l.created_at, l.id));
        Ok(likes)
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn insert(&self, follow: NewFollow) -> Result<FollowEdge, RepoError> {
        let mut state = self.state.write().await;
        if follow.follower_id == follow.followed_id {
            return Err(RepoError::Constraint("ck_follows_distinct".to_string()));
        }
        if state
            .follows
            .values()
            .any(|f| f.follower_id == follow.follower_id && f.followed_id == follow.followed_id)
        {
            return Err(RepoError::UniqueViolation(UQ_FOLLOWS_PAIR.to_string()));
        }
        let id = state.next_id();
        let edge = FollowEdge {
            id,
            follower_id: follow.follower_id,
            followed_id: follow.followed_id,
            created_at: follow.created_at,
        };
        state.follows.insert(id, edge.clone());
        Ok(edge)
    }

    async fn exists(&self, follower: AccountId, followed: AccountId) -> Result<bool, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .follows
            .values()
            .any(|f| f.follower_id == follower && f.followed_id == followed))
    }

    async fn delete_by_pair(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        let before = state.follows.len();
        state
            .follows
            .retain(|_, f| !(f.follower_id == follower && f.followed_id == followed));
        Ok(state.follows.len() < before)
    }

    async fn followed_ids(&self, follower: AccountId) -> Result<Vec<AccountId>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .follows
            .values()
            .filter(|f| f.follower_id == follower)
            .map(|f| f.followed_id)
            .collect())
    }

    async fn follower_ids(&self, followed: AccountId) -> Result<Vec<AccountId>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .follows
            .values()
            .filter(|f| f.followed_id == followed)
            .map(|f| f.follower_id)
            .collect())
    }
}

#[async_trait]
impl BatchWriter for InMemoryStore {
    async fn commit(&self, batch: WriteBatch) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        // Stage on a copy; the live state is only replaced once every op succeeded.
        let mut staged = state.clone();
        for op in batch.into_ops() {
            staged.apply(op)?;
        }
        *state = staged;
        Ok(())
    }
}
