mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::{
    CREATOR_ADDRESS, SUPPORTER_ADDRESS, make_token, seed_creator, seed_membership, seed_post,
    setup_test_app,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn get_json(
    app: axum::Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    token: Option<&str>,
    payload: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let response = app
        .oneshot(
            builder
                .body(Body::from(serde_json::to_string(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

// An anonymous browser sees the locked projection of a gated post.
#[sqlx::test(migrations = "./migrations")]
async fn test_anonymous_viewer_gets_locked_posts(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;

    let app = setup_test_app(pool.clone());
    let (status, body) =
        get_json(app, &format!("/api/posts?address={}", CREATOR_ADDRESS), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "LOCKED");
    assert_eq!(body[0]["image"], serde_json::Value::Null);
    assert_eq!(body[0]["video_url"], serde_json::Value::Null);
    // Preview metadata survives.
    assert_eq!(body[0]["title"], "Gated");
    assert_eq!(body[0]["creator_address"], CREATOR_ADDRESS);
}

// An active subscriber sees the full post.
#[sqlx::test(migrations = "./migrations")]
async fn test_active_member_sees_full_content(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;
    seed_membership(
        &pool,
        SUPPORTER_ADDRESS,
        CREATOR_ADDRESS,
        Utc::now() + Duration::days(30),
    )
    .await;

    let app = setup_test_app(pool.clone());
    let token = make_token(SUPPORTER_ADDRESS);
    let (status, body) = get_json(
        app,
        &format!("/api/posts?address={}", CREATOR_ADDRESS),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "members-only body");
    assert_eq!(body[0]["image"], "https://cdn.example.com/a.png");
}

// An expired membership is as good as none.
#[sqlx::test(migrations = "./migrations")]
async fn test_expired_member_gets_locked_posts(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;
    seed_membership(
        &pool,
        SUPPORTER_ADDRESS,
        CREATOR_ADDRESS,
        Utc::now() - Duration::days(1),
    )
    .await;

    let app = setup_test_app(pool.clone());
    let token = make_token(SUPPORTER_ADDRESS);
    let (status, body) = get_json(
        app,
        &format!("/api/posts?address={}", CREATOR_ADDRESS),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "LOCKED");
}

// The owner always sees their own posts in full.
#[sqlx::test(migrations = "./migrations")]
async fn test_owner_sees_own_posts(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;

    let app = setup_test_app(pool.clone());
    let token = make_token(&CREATOR_ADDRESS.to_uppercase().replace("0X", "0x"));
    let (status, body) = get_json(
        app,
        &format!("/api/posts?address={}", CREATOR_ADDRESS),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "members-only body");
}

// A bearer token overrides a self-reported viewer parameter.
#[sqlx::test(migrations = "./migrations")]
async fn test_viewer_param_cannot_impersonate_member(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;
    seed_membership(
        &pool,
        SUPPORTER_ADDRESS,
        CREATOR_ADDRESS,
        Utc::now() + Duration::days(30),
    )
    .await;

    // Authenticated as a stranger, claiming to be the supporter.
    let app = setup_test_app(pool.clone());
    let token = make_token(common::STRANGER_ADDRESS);
    let (status, body) = get_json(
        app,
        &format!(
            "/api/posts?address={}&viewer={}",
            CREATOR_ADDRESS, SUPPORTER_ADDRESS
        ),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "LOCKED");

    // Unauthenticated preview with the same parameter still works.
    let app = setup_test_app(pool.clone());
    let (status, body) = get_json(
        app,
        &format!(
            "/api/posts?address={}&viewer={}",
            CREATOR_ADDRESS, SUPPORTER_ADDRESS
        ),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "members-only body");
}

// Public posts pass through untouched on the global feed.
#[sqlx::test(migrations = "./migrations")]
async fn test_global_feed_gates_on_is_public(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    seed_post(&pool, CREATOR_ADDRESS, "Open", true).await;
    seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;

    let app = setup_test_app(pool.clone());
    let (status, body) = get_json(app, "/api/posts", None).await;

    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    for post in posts {
        if post["title"] == "Open" {
            assert_eq!(post["content"], "members-only body");
        } else {
            assert_eq!(post["content"], "LOCKED");
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_post_requires_auth(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;

    let payload = json!({
        "creator_address": CREATOR_ADDRESS,
        "title": "New post",
        "content": "body"
    });

    let app = setup_test_app(pool.clone());
    let (status, body) = post_json(app, "/api/posts", None, &payload).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_post_for_other_creator_forbidden(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;

    let payload = json!({
        "creator_address": CREATOR_ADDRESS,
        "title": "New post",
        "content": "body"
    });

    let app = setup_test_app(pool.clone());
    let token = make_token(common::STRANGER_ADDRESS);
    let (status, _) = post_json(app, "/api/posts", Some(&token), &payload).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// Shape validation runs before the ownership check.
#[sqlx::test(migrations = "./migrations")]
async fn test_validation_runs_before_authorization(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;

    // Invalid body AND wrong principal: the response must be 400, not 403.
    let payload = json!({
        "creator_address": "not-an-address",
        "title": "",
        "content": ""
    });

    let app = setup_test_app(pool.clone());
    let token = make_token(common::STRANGER_ADDRESS);
    let (status, body) = post_json(app, "/api/posts", Some(&token), &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["errors"].as_array().unwrap().len() >= 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_creates_post_with_defaults(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;

    let payload = json!({
        "creator_address": CREATOR_ADDRESS,
        "title": "New post",
        "content": "body"
    });

    let app = setup_test_app(pool.clone());
    let token = make_token(CREATOR_ADDRESS);
    let (status, body) = post_json(app, "/api/posts", Some(&token), &payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["min_tier"], 0);
    assert_eq!(body["likes"], 0);
    assert_eq!(body["is_public"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_like_requires_auth_but_not_ownership(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    let post_id = seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;

    let app = setup_test_app(pool.clone());
    let (status, _) = post_json(
        app,
        &format!("/api/posts/{}/like", post_id),
        None,
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let app = setup_test_app(pool.clone());
    let token = make_token(common::STRANGER_ADDRESS);
    let (status, body) = post_json(
        app,
        &format!("/api/posts/{}/like", post_id),
        Some(&token),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_as_other_user_forbidden(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    let post_id = seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;

    let payload = json!({
        "user_address": SUPPORTER_ADDRESS,
        "content": "nice one"
    });

    let app = setup_test_app(pool.clone());
    let token = make_token(common::STRANGER_ADDRESS);
    let (status, _) = post_json(
        app,
        &format!("/api/posts/{}/comments", post_id),
        Some(&token),
        &payload,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let app = setup_test_app(pool.clone());
    let token = make_token(SUPPORTER_ADDRESS);
    let (status, body) = post_json(
        app,
        &format!("/api/posts/{}/comments", post_id),
        Some(&token),
        &payload,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "nice one");

    // Comments are publicly readable.
    let app = setup_test_app(pool.clone());
    let (status, body) = get_json(app, &format!("/api/posts/{}/comments", post_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_enforce_ownership(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;
    let post_id = seed_post(&pool, CREATOR_ADDRESS, "Gated", false).await;

    let update = json!({
        "creator_address": CREATOR_ADDRESS,
        "title": "Renamed"
    });

    let stranger_token = make_token(common::STRANGER_ADDRESS);
    let owner_token = make_token(CREATOR_ADDRESS);

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/posts/{}", post_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", stranger_token))
        .body(Body::from(serde_json::to_string(&update).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/posts/{}", post_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", owner_token))
        .body(Body::from(serde_json::to_string(&update).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["title"], "Renamed");
    // Content untouched by the partial update.
    assert_eq!(body["content"], "members-only body");

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/posts/{}", post_id))
        .header("authorization", format!("Bearer {}", stranger_token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/posts/{}", post_id))
        .header("authorization", format!("Bearer {}", owner_token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_post_is_not_found(pool: PgPool) {
    seed_creator(&pool, CREATOR_ADDRESS).await;

    let update = json!({
        "creator_address": CREATOR_ADDRESS,
        "title": "Renamed"
    });

    let app = setup_test_app(pool.clone());
    let token = make_token(CREATOR_ADDRESS);
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/posts/{}", uuid::Uuid::new_v4()))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&update).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
