//! Domain entities - the core business objects.

mod account;
mod follow;
mod like;
mod post;
mod reply;
mod reshare;
mod timeline;

pub use account::{Account, AccountId, HANDLE_MAX_CHARS, HANDLE_MIN_CHARS, NewAccount};
pub use follow::{FollowEdge, NewFollow, ensure_distinct};
pub use like::{Like, LikeId, NewLike};
pub use post::{MAX_BODY_CHARS, NewPost, Post, PostId};
pub use reply::{NewReply, Reply, ReplyId};
pub use reshare::{NewReshare, Reshare, ReshareId};
pub use timeline::{TimelineItem, merge_newest_first};

/// A record paired with the account that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authored<T> {
    pub author: Account,
    pub item: T,
}
