use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use chirp_core::ports::TokenService;
use chirp_infra::{JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::config::FeedLimits;
use crate::state::AppState;

fn token_service() -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }))
}

fn bearer(jwt: &JwtTokenService, handle: &str) -> (&'static str, String) {
    let token = jwt
        .issue(&format!("kc-{handle}"), Some(handle), None)
        .unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! test_app {
    ($jwt:expr) => {{
        let state = AppState::with_stores(chirp_infra::in_memory_stores(), FeedLimits::default());
        let tokens: Arc<dyn TokenService> = $jwt.clone();
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::Data::new(tokens))
                .configure(configure_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let jwt = token_service();
    let app = test_app!(jwt);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_follower_timeline_over_http() {
    let jwt = token_service();
    let app = test_app!(jwt);
    let alice = bearer(&jwt, "alice");
    let bobby = bearer(&jwt, "bobby");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice.clone())
        .set_json(json!({ "body": "hello world" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/accounts/me")
        .insert_header(alice)
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    let alice_id = me["id"].as_i64().unwrap();
    assert_eq!(me["email"], "alice@chirp.local");

    let req = test::TestRequest::post()
        .uri(&format!("/api/accounts/{alice_id}/follow"))
        .insert_header(bobby.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/timeline")
        .insert_header(bobby)
        .to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;

    let entries = feed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["body"], "hello world");
    assert_eq!(entries[0]["author"], "alice");
    assert_eq!(entries[0]["is_reshare"], false);
    assert!(entries[0].get("reshared_by").is_none());
}

#[actix_web::test]
async fn test_missing_token_gets_error_envelope() {
    let jwt = token_service();
    let app = test_app!(jwt);

    let req = test::TestRequest::get().uri("/api/timeline").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["path"], "/api/timeline");
}

#[actix_web::test]
async fn test_rule_violations_map_to_statuses() {
    let jwt = token_service();
    let app = test_app!(jwt);
    let alice = bearer(&jwt, "alice");
    let bobby = bearer(&jwt, "bobby");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice.clone())
        .set_json(json!({ "body": "a".repeat(281) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice.clone())
        .set_json(json!({ "body": "mine" }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    let post_id = post["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/reshares"))
        .insert_header(alice.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(bobby)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri("/api/posts/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["path"], "/api/posts/9999");
}

#[actix_web::test]
async fn test_reshare_twice_returns_same_reshare() {
    let jwt = token_service();
    let app = test_app!(jwt);
    let alice = bearer(&jwt, "alice");
    let bobby = bearer(&jwt, "bobby");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice)
        .set_json(json!({ "body": "hello world" }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/posts/{}/reshares", post["id"]);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bobby.clone())
            .to_request();
        let reshare: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reshare["reshared_by"], "bobby");
        ids.push(reshare["id"].as_i64().unwrap());
    }
    assert_eq!(ids[0], ids[1]);
}

#[actix_web::test]
async fn test_like_twice_returns_the_existing_like() {
    let jwt = token_service();
    let app = test_app!(jwt);
    let alice = bearer(&jwt, "alice");
    let bobby = bearer(&jwt, "bobby");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice)
        .set_json(json!({ "body": "hello world" }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/posts/{}/likes", post["id"]);

    let mut likes = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bobby.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let like: Value = test::read_body_json(resp).await;
        assert_eq!(like["liked_by"], "bobby");
        assert_eq!(like["post_id"], post["id"]);
        likes.push(like);
    }
    assert_eq!(likes[0]["created_at"], likes[1]["created_at"]);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_feed_limit_zero_and_malformed_body() {
    let jwt = token_service();
    let app = test_app!(jwt);
    let alice = bearer(&jwt, "alice");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice.clone())
        .set_json(json!({ "body": "hello world" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/feed?limit=0").to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed, json!([]));

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice)
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["path"], "/api/posts");
}

#[actix_web::test]
async fn test_self_deactivation_hides_posts() {
    let jwt = token_service();
    let app = test_app!(jwt);
    let alice = bearer(&jwt, "alice");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(alice.clone())
        .set_json(json!({ "body": "hello world" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri("/api/accounts/me")
        .insert_header(alice)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["active"], false);

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed, json!([]));
}
