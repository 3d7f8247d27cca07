//! Feed handlers. Every feed is a JSON array of feed entries, newest first.

use actix_web::{HttpRequest, HttpResponse, web};

use chirp_core::presentation::feed_entries;
use chirp_shared::dto::FeedQuery;

use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiResult, AtPath};
use crate::state::AppState;

/// GET /api/timeline?limit=N - the caller's home timeline
pub async fn home(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let viewer = identity.account(&state).await.at(&req)?;
    let limit = state.feed.timeline(query.limit);

    let items = state.engine.timeline.home(viewer.id, limit).await.at(&req)?;
    tracing::debug!(viewer = viewer.id, limit, items = items.len(), "Home timeline built");

    Ok(HttpResponse::Ok().json(feed_entries(&items)))
}

/// GET /api/feed?limit=N - newest posts of every account
pub async fn global(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let limit = state.feed.global(query.limit);
    let items = state.engine.timeline.global(limit).await.at(&req)?;

    Ok(HttpResponse::Ok().json(feed_entries(&items)))
}

/// GET /api/accounts/{id}/posts?limit=N - one account's posts and reshares
pub async fn account(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    let limit = state.feed.timeline(query.limit);
    let items = state
        .engine
        .timeline
        .account(path.into_inner(), limit)
        .await
        .at(&req)?;

    Ok(HttpResponse::Ok().json(feed_entries(&items)))
}
