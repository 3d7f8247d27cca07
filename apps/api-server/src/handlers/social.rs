//! Follow graph handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiResult, AtPath};
use crate::state::AppState;
use crate::views;

/// POST /api/accounts/{id}/follow
pub async fn follow(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    state
        .engine
        .social
        .follow(actor.id, path.into_inner())
        .await
        .at(&req)?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/accounts/{id}/follow
pub async fn unfollow(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    state
        .engine
        .social
        .unfollow(actor.id, path.into_inner())
        .await
        .at(&req)?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/accounts/{id}/following
pub async fn following(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let accounts = state
        .engine
        .social
        .following(path.into_inner())
        .await
        .at(&req)?;
    Ok(HttpResponse::Ok().json(views::accounts(&accounts)))
}

/// GET /api/accounts/{id}/followers
pub async fn followers(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let accounts = state
        .engine
        .social
        .followers_of(path.into_inner())
        .await
        .at(&req)?;
    Ok(HttpResponse::Ok().json(views::accounts(&accounts)))
}
