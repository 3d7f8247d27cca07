//! Feed items and the merge that orders them.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::account::Account;
use super::post::Post;
use super::reshare::Reshare;

/// One entry of a feed. Built per read request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineItem {
    /// A post shown because its author is in the feed's author set.
    Original { post: Post, author: Account },
    /// Someone else's post shown because the resharer is in the author set.
    Reshare {
        reshare: Reshare,
        post: Post,
        author: Account,
        resharer: Account,
    },
}

impl TimelineItem {
    /// The post's own timestamp for originals, the reshare's for reshares.
    pub fn ordering_timestamp(&self) -> DateTime<Utc> {
        match self {
            TimelineItem::Original { post, .. } => post.created_at,
            TimelineItem::Reshare { reshare, .. } => reshare.created_at,
        }
    }

    /// Whose activity put this item in the feed.
    pub fn display_author(&self) -> &Account {
        match self {
            TimelineItem::Original { author, .. } => author,
            TimelineItem::Reshare { resharer, .. } => resharer,
        }
    }

    /// The post whose content is rendered.
    pub fn post(&self) -> &Post {
        match self {
            TimelineItem::Original { post, .. } | TimelineItem::Reshare { post, .. } => post,
        }
    }

    pub fn post_author(&self) -> &Account {
        match self {
            TimelineItem::Original { author, .. } | TimelineItem::Reshare { author, .. } => author,
        }
    }

    pub fn is_reshare(&self) -> bool {
        matches!(self, TimelineItem::Reshare { .. })
    }

    /// Timestamp, then store sequence id, then variant. Unique per item.
    fn order_key(&self) -> (DateTime<Utc>, i64, u8) {
        match self {
            TimelineItem::Original { post, .. } => (post.created_at, post.id, 0),
            TimelineItem::Reshare { reshare, .. } => (reshare.created_at, reshare.id, 1),
        }
    }

    /// Newest-first ordering used by every feed.
    pub fn newest_first(a: &TimelineItem, b: &TimelineItem) -> Ordering {
        b.order_key().cmp(&a.order_key())
    }
}

/// Merge two already-fetched item lists into one newest-first feed of at most `limit` items.
pub fn merge_newest_first(
    originals: Vec<TimelineItem>,
    reshares: Vec<TimelineItem>,
    limit: usize,
) -> Vec<TimelineItem> {
    let mut items = originals;
    items.extend(reshares);
    items.sort_by(TimelineItem::newest_first);
    items.truncate(limit);
    items
}
