//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of a new post or reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub body: String,
}

/// `?limit=` on feed endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<usize>,
}

/// Response containing an account's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub handle: String,
    pub email: String,
    pub active: bool,
    pub registered_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub post_id: i64,
    pub liked_by: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshareResponse {
    pub id: i64,
    pub post_id: i64,
    pub reshared_by: String,
    pub created_at: String,
}
