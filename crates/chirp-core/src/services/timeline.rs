//! Feed construction.

use std::collections::{BTreeSet, HashMap};

use super::require_account;
use crate::domain::{
    Account, AccountId, Post, PostId, Reshare, TimelineItem, merge_newest_first,
};
use crate::error::DomainError;
use crate::ports::Stores;

#[derive(Clone)]
pub struct TimelineService {
    stores: Stores,
}

impl TimelineService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// The viewer's home feed: their own and followed accounts' posts and reshares.
    pub async fn home(
        &self,
        viewer: AccountId,
        limit: usize,
    ) -> Result<Vec<TimelineItem>, DomainError> {
        require_account(&self.stores, viewer).await?;
        let mut authors = self.stores.follows.followed_ids(viewer).await?;
        authors.push(viewer);
        authors.sort_unstable();
        authors.dedup();

        self.collect(&authors, limit).await
    }

    /// Posts and reshares made by a single account.
    pub async fn account(
        &self,
        target: AccountId,
        limit: usize,
    ) -> Result<Vec<TimelineItem>, DomainError> {
        require_account(&self.stores, target).await?;
        self.collect(&[target], limit).await
    }

    /// Newest posts of every account. Reshares are not included.
    pub async fn global(&self, limit: usize) -> Result<Vec<TimelineItem>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let posts = self.stores.posts.visible_recent(limit).await?;
        self.assemble(posts, Vec::new(), limit).await
    }

    async fn collect(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<TimelineItem>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let (posts, reshares) = futures::try_join!(
            self.stores.posts.visible_by_authors(authors, limit),
            self.stores.reshares.by_authors(authors, limit),
        )?;
        self.assemble(posts, reshares, limit).await
    }

    /// Resolve originals and accounts, drop anything not visible, then merge.
    async fn assemble(
        &self,
        posts: Vec<Post>,
        reshares: Vec<Reshare>,
        limit: usize,
    ) -> Result<Vec<TimelineItem>, DomainError> {
        let original_ids: Vec<PostId> = reshares
            .iter()
            .map(|r| r.post_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let originals: HashMap<PostId, Post> = self
            .stores
            .posts
            .find_by_ids(&original_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let account_ids: Vec<AccountId> = posts
            .iter()
            .map(|p| p.author_id)
            .chain(reshares.iter().map(|r| r.author_id))
            .chain(originals.values().map(|p| p.author_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let accounts: HashMap<AccountId, Account> = self
            .stores
            .accounts
            .find_by_ids(&account_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let original_items: Vec<TimelineItem> = posts
            .into_iter()
            .filter_map(|post| {
                let author = accounts.get(&post.author_id)?;
                post.is_visible_with(author).then(|| TimelineItem::Original {
                    author: author.clone(),
                    post,
                })
            })
            .collect();

        let total_reshares = reshares.len();
        let reshare_items: Vec<TimelineItem> = reshares
            .into_iter()
            .filter_map(|reshare| {
                let resharer = accounts.get(&reshare.author_id).filter(|a| a.is_active())?;
                let post = originals.get(&reshare.post_id)?;
                let author = accounts.get(&post.author_id)?;
                if !post.is_visible_with(author) {
                    return None;
                }
                Some(TimelineItem::Reshare {
                    post: post.clone(),
                    author: author.clone(),
                    resharer: resharer.clone(),
                    reshare,
                })
            })
            .collect();

        if reshare_items.len() < total_reshares {
            tracing::debug!(
                dropped = total_reshares - reshare_items.len(),
                "Skipped reshares of hidden posts"
            );
        }

        Ok(merge_newest_first(original_items, reshare_items, limit))
    }
}
