//! Posts, replies, reshares and likes.

use std::collections::HashMap;

use chrono::Utc;

use super::{require_account, require_post, require_visible_post};
use crate::domain::{
    Account, AccountId, Authored, Like, NewLike, NewPost, NewReply, NewReshare, Post, PostId,
    Reply, ReplyId, Reshare,
};
use crate::error::{DomainError, RepoError};
use crate::ports::Stores;

#[derive(Clone)]
pub struct ContentService {
    stores: Stores,
}

impl ContentService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn publish(&self, author: AccountId, body: &str) -> Result<Post, DomainError> {
        require_account(&self.stores, author).await?;
        let draft = NewPost::new(author, body, Utc::now())?;
        let post = self.stores.posts.insert(draft).await?;
        tracing::debug!(post_id = post.id, author_id = author, "Post published");
        Ok(post)
    }

    /// A visible post with its author.
    pub async fn get_post(&self, id: PostId) -> Result<Authored<Post>, DomainError> {
        let post = require_visible_post(&self.stores, id).await?;
        let author = require_account(&self.stores, post.author_id).await?;
        Ok(Authored { author, item: post })
    }

    pub async fn reply(
        &self,
        author: AccountId,
        post: PostId,
        body: &str,
    ) -> Result<Reply, DomainError> {
        require_account(&self.stores, author).await?;
        let post = require_visible_post(&self.stores, post).await?;
        let draft = NewReply::new(author, post.id, body, Utc::now())?;
        Ok(self.stores.replies.insert(draft).await?)
    }

    /// Visible replies to a visible post, oldest first.
    pub async fn replies_of(&self, post: PostId) -> Result<Vec<Authored<Reply>>, DomainError> {
        let post = require_visible_post(&self.stores, post).await?;
        let replies = self.stores.replies.visible_for_post(post.id).await?;
        let authors = self.authors_of(replies.iter().map(|r| r.author_id)).await?;

        Ok(replies
            .into_iter()
            .filter_map(|reply| {
                let author = authors.get(&reply.author_id)?;
                reply.is_visible_with(author).then(|| Authored {
                    author: author.clone(),
                    item: reply,
                })
            })
            .collect())
    }

    /// Reshare someone else's post. Resharing twice returns the first reshare.
    pub async fn reshare(&self, actor: AccountId, post: PostId) -> Result<Reshare, DomainError> {
        let actor = require_account(&self.stores, actor).await?;
        let post = require_visible_post(&self.stores, post).await?;
        let draft = NewReshare::of(&actor, &post, Utc::now())?;

        if let Some(existing) = self.stores.reshares.find_by_pair(actor.id, post.id).await? {
            tracing::debug!(reshare_id = existing.id, "Reshare already exists");
            return Ok(existing);
        }

        match self.stores.reshares.insert(draft).await {
            Ok(reshare) => Ok(reshare),
            Err(RepoError::UniqueViolation(constraint)) => {
                let existing = self
                    .stores
                    .reshares
                    .find_by_pair(actor.id, post.id)
                    .await?
                    .ok_or(DomainError::ConflictRace(constraint))?;
                tracing::debug!(reshare_id = existing.id, "Reshare created concurrently");
                Ok(existing)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Like a post. Liking twice returns the existing like.
    pub async fn like(&self, actor: AccountId, post: PostId) -> Result<Like, DomainError> {
        require_account(&self.stores, actor).await?;
        let post = require_visible_post(&self.stores, post).await?;

        if let Some(existing) = self.stores.likes.find_by_pair(actor, post.id).await? {
            tracing::debug!(like_id = existing.id, account_id = actor, "Already liked");
            return Ok(existing);
        }

        match self.stores.likes.insert(NewLike::new(actor, post.id, Utc::now())).await {
            Ok(like) => Ok(like),
            Err(RepoError::UniqueViolation(constraint)) => {
                match self.stores.likes.find_by_pair(actor, post.id).await? {
                    Some(existing) => {
                        tracing::debug!(like_id = existing.id, "Like created concurrently");
                        Ok(existing)
                    }
                    None => Err(DomainError::ConflictRace(constraint)),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the actor's like. Unliking a post that was never liked is a no-op.
    pub async fn unlike(&self, actor: AccountId, post: PostId) -> Result<(), DomainError> {
        require_account(&self.stores, actor).await?;
        let post = require_post(&self.stores, post).await?;

        if !self.stores.likes.delete_by_pair(actor, post.id).await? {
            tracing::debug!(post_id = post.id, account_id = actor, "Nothing to unlike");
        }
        Ok(())
    }

    /// Likes of a visible post, oldest first.
    pub async fn likes_of(&self, post: PostId) -> Result<Vec<Authored<Like>>, DomainError> {
        let post = require_visible_post(&self.stores, post).await?;
        let likes = self.stores.likes.for_post(post.id).await?;
        let authors = self.authors_of(likes.iter().map(|l| l.author_id)).await?;

        Ok(likes
            .into_iter()
            .filter_map(|like| {
                let author = authors.get(&like.author_id)?.clone();
                Some(Authored { author, item: like })
            })
            .collect())
    }

    /// Soft-delete one of the actor's own posts. Reshares and likes are left in place.
    pub async fn delete_post(&self, actor: AccountId, id: PostId) -> Result<(), DomainError> {
        let post = require_post(&self.stores, id).await?;
        if !post.is_by(actor) {
            return Err(DomainError::not_owner("Post", id));
        }
        self.stores.posts.mark_deleted(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Post", id),
            other => other.into(),
        })?;
        tracing::debug!(post_id = id, "Post soft-deleted");
        Ok(())
    }

    pub async fn delete_reply(&self, actor: AccountId, id: ReplyId) -> Result<(), DomainError> {
        let reply = self
            .stores
            .replies
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reply", id))?;
        if !reply.is_by(actor) {
            return Err(DomainError::not_owner("Reply", id));
        }
        self.stores.replies.mark_deleted(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Reply", id),
            other => other.into(),
        })?;
        tracing::debug!(reply_id = id, "Reply soft-deleted");
        Ok(())
    }

    async fn authors_of(
        &self,
        ids: impl Iterator<Item = AccountId>,
    ) -> Result<HashMap<AccountId, Account>, DomainError> {
        let mut ids: Vec<AccountId> = ids.collect();
        ids.sort_unstable();
        ids.dedup();
        let accounts = self.stores.accounts.find_by_ids(&ids).await?;
        Ok(accounts.into_iter().map(|a| (a.id, a)).collect())
    }
}
