//! Post, reply, like and reshare handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use chirp_core::domain::Authored;
use chirp_shared::dto::PublishRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiResult, AtPath};
use crate::state::AppState;
use crate::views;

/// POST /api/posts
pub async fn publish(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PublishRequest>,
) -> ApiResult<HttpResponse> {
    let author = identity.account(&state).await.at(&req)?;
    let post = state
        .engine
        .content
        .publish(author.id, &body.body)
        .await
        .at(&req)?;

    Ok(HttpResponse::Created().json(views::post(post, author)))
}

/// GET /api/posts/{id}
pub async fn get(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let authored = state
        .engine
        .content
        .get_post(path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::Ok().json(views::post(authored.item, authored.author)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    state
        .engine
        .content
        .delete_post(actor.id, path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/replies
pub async fn reply(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<PublishRequest>,
) -> ApiResult<HttpResponse> {
    let author = identity.account(&state).await.at(&req)?;
    let reply = state
        .engine
        .content
        .reply(author.id, path.into_inner(), &body.body)
        .await
        .at(&req)?;

    let authored = Authored {
        author,
        item: reply,
    };
    Ok(HttpResponse::Created().json(views::reply(&authored)))
}

/// GET /api/posts/{id}/replies
pub async fn replies(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let replies = state
        .engine
        .content
        .replies_of(path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::Ok().json(replies.iter().map(views::reply).collect::<Vec<_>>()))
}

/// DELETE /api/replies/{id}
pub async fn delete_reply(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    state
        .engine
        .content
        .delete_reply(actor.id, path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/reshares - idempotent; repeats return the first reshare
pub async fn reshare(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    let reshare = state
        .engine
        .content
        .reshare(actor.id, path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::Created().json(views::reshare(&reshare, &actor)))
}

/// POST /api/posts/{id}/likes
pub async fn like(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    let like = state
        .engine
        .content
        .like(actor.id, path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::Created().json(views::like(&Authored {
        author: actor,
        item: like,
    })))
}

/// DELETE /api/posts/{id}/likes
pub async fn unlike(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = identity.account(&state).await.at(&req)?;
    state
        .engine
        .content
        .unlike(actor.id, path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/{id}/likes
pub async fn likes(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let likes = state
        .engine
        .content
        .likes_of(path.into_inner())
        .await
        .at(&req)?;

    Ok(HttpResponse::Ok().json(likes.iter().map(views::like).collect::<Vec<_>>()))
}
