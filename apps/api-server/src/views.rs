//! Domain records rendered as response DTOs.

use chrono::{DateTime, SecondsFormat, Utc};

use chirp_core::domain::{Account, Authored, Like, Post, Reply, Reshare, TimelineItem};
use chirp_core::presentation::FeedEntry;
use chirp_shared::dto::{AccountResponse, LikeResponse, ReplyResponse, ReshareResponse};

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn account(account: &Account) -> AccountResponse {
    AccountResponse {
        id: account.id,
        handle: account.handle.clone(),
        email: account.email.clone(),
        active: account.active,
        registered_at: timestamp(account.registered_at),
    }
}

pub fn accounts(accounts: &[Account]) -> Vec<AccountResponse> {
    accounts.iter().map(account).collect()
}

/// A single post, shaped like a feed entry.
pub fn post(post: Post, author: Account) -> FeedEntry {
    FeedEntry::from(&TimelineItem::Original { post, author })
}

pub fn reply(reply: &Authored<Reply>) -> ReplyResponse {
    ReplyResponse {
        id: reply.item.id,
        post_id: reply.item.post_id,
        author: reply.author.handle.clone(),
        body: reply.item.body.clone(),
        created_at: timestamp(reply.item.created_at),
    }
}

pub fn like(like: &Authored<Like>) -> LikeResponse {
    LikeResponse {
        post_id: like.item.post_id,
        liked_by: like.author.handle.clone(),
        created_at: timestamp(like.item.created_at),
    }
}

pub fn reshare(reshare: &Reshare, resharer: &Account) -> ReshareResponse {
    ReshareResponse {
        id: reshare.id,
        post_id: reshare.post_id,
        reshared_by: resharer.handle.clone(),
        created_at: timestamp(reshare.created_at),
    }
}
