//! Account handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use chirp_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiResult, AtPath};
use crate::state::AppState;
use crate::views;

/// GET /api/accounts
pub async fn list(req: HttpRequest, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let accounts = state.engine.accounts.list().await.at(&req)?;
    Ok(HttpResponse::Ok().json(views::accounts(&accounts)))
}

/// GET /api/accounts/me - creates the account on first call
pub async fn me(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
) -> ApiResult<HttpResponse> {
    let account = identity.account(&state).await.at(&req)?;
    Ok(HttpResponse::Ok().json(views::account(&account)))
}

/// DELETE /api/accounts/me - deactivate the caller's account
pub async fn deactivate_me(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
) -> ApiResult<HttpResponse> {
    let account = identity.account(&state).await.at(&req)?;
    let account = state.engine.accounts.deactivate(account.id).await.at(&req)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        views::account(&account),
        "Account deactivated",
    )))
}

/// GET /api/accounts/{id}
pub async fn get(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let account = state.engine.accounts.get(path.into_inner()).await.at(&req)?;
    Ok(HttpResponse::Ok().json(views::account(&account)))
}
