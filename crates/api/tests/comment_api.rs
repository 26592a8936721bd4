//! Integration tests for the `/comment` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_post, delete_auth, get, post_json, post_json_auth, put_json_auth,
    user_with_token,
};
use quill_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;

async fn comment(app: &axum::Router, token: &str, post_id: i64, body: &str) -> i64 {
    let response = post_json_auth(
        app,
        &format!("/api/v1/comment/create_comment/{post_id}/"),
        token,
        json!({ "body": body }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn reply(app: &axum::Router, token: &str, comment_id: i64, body: &str) -> serde_json::Value {
    let response = post_json_auth(
        app,
        &format!("/api/v1/comment/create_reply/{comment_id}/"),
        token,
        json!({ "body": body }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comments_are_listed_with_replies(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let (_, bob) = user_with_token(&pool, &app, "bob", Role::Blogger).await;
    let post_id = create_post(&app, &alice, "Discuss", "0").await;

    let first = comment(&app, &bob, post_id, "First!").await;
    let second = comment(&app, &alice, post_id, "Thanks for reading").await;
    reply(&app, &alice, first, "Welcome").await;
    reply(&app, &bob, first, "Glad to be here").await;

    let response = get(&app, &format!("/api/v1/comment/comments/{post_id}/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let threads = json["data"].as_array().unwrap();

    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0]["id"], second);
    assert_eq!(threads[0]["replies_count"], 0);
    assert_eq!(threads[1]["id"], first);
    assert_eq!(threads[1]["author_username"], "bob");
    assert_eq!(threads[1]["replies_count"], 2);
    assert_eq!(threads[1]["replies"][0]["body"], "Welcome");
    assert_eq!(threads[1]["replies"][1]["body"], "Glad to be here");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reply_to_reply_attaches_to_top_level_comment(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let post_id = create_post(&app, &alice, "Discuss", "0").await;
    let root = comment(&app, &alice, post_id, "Root").await;

    let first_reply = reply(&app, &alice, root, "Reply").await;
    let nested = reply(&app, &alice, first_reply["id"].as_i64().unwrap(), "Nested").await;

    assert_eq!(first_reply["parent_id"], root);
    assert_eq!(nested["parent_id"], root);
    assert_eq!(nested["post_id"], post_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_on_unpublished_post_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let post_id = create_post(&app, &alice, "Hidden", "0").await;
    put_json_auth(
        &app,
        &format!("/api/v1/post/post_detail/{post_id}/"),
        &alice,
        json!({ "status": "private" }),
    )
    .await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/comment/create_comment/{post_id}/"),
        &alice,
        json!({ "body": "Hello?" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let post_id = create_post(&app, &alice, "Discuss", "0").await;

    let response = post_json(
        &app,
        &format!("/api/v1/comment/create_comment/{post_id}/"),
        json!({ "body": "anonymous" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_comment_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let post_id = create_post(&app, &alice, "Discuss", "0").await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/comment/create_comment/{post_id}/"),
        &alice,
        json!({ "body": "x".repeat(501) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_comments_of_missing_post_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/comment/comments/777/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_author_can_edit_or_delete_comment(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let (_, bob) = user_with_token(&pool, &app, "bob", Role::Blogger).await;
    let post_id = create_post(&app, &alice, "Discuss", "0").await;
    let comment_id = comment(&app, &bob, post_id, "Original").await;
    let uri = format!("/api/v1/comment/update_comment/{comment_id}/");

    let response = put_json_auth(&app, &uri, &alice, json!({ "body": "Edited" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(&app, &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(&app, &uri, &bob, json!({ "body": "Edited" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["body"], "Edited");

    let response = get(&app, &uri).await;
    assert_eq!(body_json(response).await["data"]["body"], "Edited");

    let response = delete_auth(&app, &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moderator_removes_comment_and_its_replies(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let (_, moderator) = user_with_token(&pool, &app, "mod", Role::Moderator).await;
    let post_id = create_post(&app, &alice, "Discuss", "0").await;
    let comment_id = comment(&app, &alice, post_id, "Rude remark").await;
    reply(&app, &alice, comment_id, "Even ruder").await;
    let uri = format!("/api/v1/comment/moderator_rm_comment/{comment_id}/");

    let response = delete_auth(&app, &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(&app, &uri, &moderator).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &format!("/api/v1/comment/comments/{post_id}/")).await).await;
    assert_eq!(json["data"], json!([]));

    let response = delete_auth(&app, &uri, &moderator).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
