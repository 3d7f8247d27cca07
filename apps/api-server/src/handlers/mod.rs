//! HTTP handlers and route configuration.

mod accounts;
mod health;
mod posts;
mod social;
mod timeline;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, error, web};

use crate::middleware::error::{ApiError, AppError};

/// Malformed JSON bodies and query strings get the same envelope as every other error.
fn bad_input(message: String, req: &HttpRequest) -> actix_web::Error {
    ApiError::new(AppError::BadRequest(message), req).into()
}

fn json_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_input(err.to_string(), req)
}

fn query_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_input(err.to_string(), req)
}

fn path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    bad_input(err.to_string(), req)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .route("/feed", web::get().to(timeline::global))
                // Caller's own feed
                .route("/timeline", web::get().to(timeline::home))
                .service(
                    web::scope("/accounts")
                        .route("", web::get().to(accounts::list))
                        .route("/me", web::get().to(accounts::me))
                        .route("/me", web::delete().to(accounts::deactivate_me))
                        .route("/{id}", web::get().to(accounts::get))
                        .route("/{id}/posts", web::get().to(timeline::account))
                        .route("/{id}/following", web::get().to(social::following))
                        .route("/{id}/followers", web::get().to(social::followers))
                        .route("/{id}/follow", web::post().to(social::follow))
                        .route("/{id}/follow", web::delete().to(social::unfollow)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::publish))
                        .route("/{id}", web::get().to(posts::get))
                        .route("/{id}", web::delete().to(posts::delete))
                        .route("/{id}/replies", web::get().to(posts::replies))
                        .route("/{id}/replies", web::post().to(posts::reply))
                        .route("/{id}/reshares", web::post().to(posts::reshare))
                        .route("/{id}/likes", web::get().to(posts::likes))
                        .route("/{id}/likes", web::post().to(posts::like))
                        .route("/{id}/likes", web::delete().to(posts::unlike)),
                )
                .route("/replies/{id}", web::delete().to(posts::delete_reply)),
        );
}
