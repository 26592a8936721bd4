//! Integration tests for registration, sessions, profile and role management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_auth, login, post_json, post_json_auth, post_raw, put_json_auth,
    user_with_token, TEST_PASSWORD,
};
use quill_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_blogger_with_lowercased_identity(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/user/register/",
        json!({ "username": "Alice", "email": "Alice@Example.com", "password": "long-enough-pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["email"], "alice@example.com");
    assert!(json["data"].get("password_hash").is_none());

    let response = post_json(
        &app,
        "/api/v1/user/login/",
        json!({ "email": "ALICE@example.com", "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "blogger");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_taken_username_and_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "alice", Some(Role::Blogger)).await;

    let response = post_json(
        &app,
        "/api/v1/user/register/",
        json!({ "username": "ALICE", "email": "new@test.com", "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Username already exists.");

    let response = post_json(
        &app,
        "/api/v1/user/register/",
        json!({ "username": "other", "email": "alice@test.com", "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Email already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/user/register/",
        json!({ "username": "alice", "email": "alice@test.com", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app,
        "/api/v1/user/register/",
        json!({ "username": "alice", "email": "not-an-email", "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_missing_field_returns_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(&app, "/api/v1/user/register/", json!({ "username": "alice" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_malformed_body_returns_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_raw(&app, "/api/v1/user/register/", "application/json", "{\"username\":").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_raw(&app, "/api/v1/user/register/", "text/plain", "username=alice").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_credentials_return_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "alice", Some(Role::Blogger)).await;

    let response = post_json(
        &app,
        "/api/v1/user/login/",
        json!({ "username": "alice", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let wrong_password = body_json(response).await;

    let response = post_json(
        &app,
        "/api/v1/user/login/",
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], wrong_password["error"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_without_identity_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(&app, "/api/v1/user/login/", json!({ "password": "whatever" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_invalidates_only_current_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, first) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let second = login(&app, "alice").await;
    assert_ne!(first, second);

    let response = post_json_auth(&app, "/api/v1/user/logout/", &first, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(&app, "/api/v1/post/my_posts/", &first).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/post/my_posts/", &second).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(&app, "/api/v1/user/logout/", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/post/my_posts/", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_ends_other_sessions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, current) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let other = login(&app, "alice").await;

    let response = put_json_auth(
        &app,
        "/api/v1/user/change_password/",
        &current,
        json!({
            "current_password": TEST_PASSWORD,
            "new_password": "brand-new-secret",
            "confirm_password": "brand-new-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        get_auth(&app, "/api/v1/post/my_posts/", &current).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        get_auth(&app, "/api/v1/post/my_posts/", &other).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let response = post_json(
        &app,
        "/api/v1/user/login/",
        json!({ "username": "alice", "password": "brand-new-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_checks_old_password_and_confirmation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = user_with_token(&pool, &app, "alice", Role::Blogger).await;

    let response = put_json_auth(
        &app,
        "/api/v1/user/change_password/",
        &token,
        json!({
            "current_password": "wrong-password",
            "new_password": "brand-new-secret",
            "confirm_password": "brand-new-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        &app,
        "/api/v1/user/change_password/",
        &token,
        json!({
            "current_password": TEST_PASSWORD,
            "new_password": "brand-new-secret",
            "confirm_password": "different-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_user_rejects_taken_username(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    create_user(&pool, "bob", Some(Role::Blogger)).await;

    let response = put_json_auth(&app, "/api/v1/user/update_user/", &token, json!({ "username": "Bob" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        put_json_auth(&app, "/api/v1/user/update_user/", &token, json!({ "username": "alicia" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["username"], "alicia");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bio_round_trip_and_users_list(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = user_with_token(&pool, &app, "alice", Role::Blogger).await;

    let response = get_auth(&app, "/api/v1/user/update_bio/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["bio"], "");

    let response = put_json_auth(
        &app,
        "/api/v1/user/update_bio/",
        &token,
        json!({ "bio": "Writes about Rust" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(&app, "/api/v1/user/users_list/").await).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[0]["bio"], "Writes about Rust");
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_role_is_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, blogger) = user_with_token(&pool, &app, "alice", Role::Blogger).await;
    let (_, moderator) = user_with_token(&pool, &app, "mod", Role::Moderator).await;
    let (_, admin) = user_with_token(&pool, &app, "root", Role::Admin).await;
    let uri = "/api/v1/user/update_role/alice/";

    for token in [&blogger, &moderator] {
        let response = put_json_auth(&app, uri, token, json!({ "role": "admin" })).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let response = put_json_auth(
        &app,
        uri,
        &admin,
        json!({ "is_moderator": true, "is_blogger": false, "is_admin": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "moderator");

    // Role changes apply to existing sessions.
    let response = get_auth(&app, "/api/v1/post/post_list/", &blogger).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_role_rejects_conflicting_flags(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "alice", Some(Role::Blogger)).await;
    let (_, admin) = user_with_token(&pool, &app, "root", Role::Admin).await;

    let response = put_json_auth(
        &app,
        "/api/v1/user/update_role/alice/",
        &admin,
        json!({ "is_moderator": true, "is_admin": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_role_creates_missing_role_record(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "legacy", None).await;
    let (_, admin) = user_with_token(&pool, &app, "root", Role::Admin).await;

    let response = put_json_auth(
        &app,
        "/api/v1/user/update_role/legacy/",
        &admin,
        json!({ "role": "blogger" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(&app, "/api/v1/user/update_role/ghost/", &admin, json!({ "role": "blogger" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
