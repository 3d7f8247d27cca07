//! Client-facing shape of feed items.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::{PostId, TimelineItem};

/// Flat record for one feed entry. Only the post's public id leaves the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: PostId,
    /// Handle of the post's author.
    pub author: String,
    pub body: String,
    /// Post creation time, RFC 3339 / ISO-8601 in UTC.
    pub created_at: String,
    pub visible: bool,
    pub is_reshare: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reshared_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reshared_at: Option<String>,
}

impl From<&TimelineItem> for FeedEntry {
    fn from(item: &TimelineItem) -> Self {
        let post = item.post();
        let author = item.post_author();
        let (reshared_by, reshared_at) = match item {
            TimelineItem::Original { .. } => (None, None),
            TimelineItem::Reshare {
                reshare, resharer, ..
            } => (
                Some(resharer.handle.clone()),
                Some(reshare.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ),
        };

        Self {
            id: post.id,
            author: author.handle.clone(),
            body: post.body.clone(),
            created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            visible: post.is_visible_with(author),
            is_reshare: item.is_reshare(),
            reshared_by,
            reshared_at,
        }
    }
}

pub fn feed_entries(items: &[TimelineItem]) -> Vec<FeedEntry> {
    items.iter().map(FeedEntry::from).collect()
}
