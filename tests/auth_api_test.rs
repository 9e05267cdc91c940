//! Registration, login, logout and session-cookie checks against the full router.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use casino_catalog::auth::token::Claims;
use common::{JWT_SECRET, TestApp};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

fn forged_cookie(secret: &str, sub: &str, exp_offset: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now,
        exp: now + exp_offset,
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("token={token}")
}

#[tokio::test]
async fn register_returns_user_and_session_cookie() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "alice", "email": "alice@example.com", "password": "correct-horse"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["user"]["username"], "alice");
    assert_eq!(response.body["user"]["email"], "alice@example.com");
    assert!(response.body["user"]["id"].is_i64());
    assert!(response.body["user"].get("password_hash").is_none());
    assert!(response.body["user"].get("passwordHash").is_none());

    let cookie = response.set_cookie().expect("cookie set");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=3600"));
}

#[tokio::test]
async fn duplicate_email_conflicts_but_duplicate_username_does_not() {
    let app = TestApp::new();
    app.register("alice", "alice@example.com").await;

    let same_email = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "alice2", "email": "Alice@Example.com ", "password": "correct-horse"}),
        )
        .await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
    assert_eq!(same_email.body["success"], false);
    assert_eq!(
        same_email.body["message"],
        "User with this email already exists"
    );
    assert!(same_email.set_cookie().is_none());

    let same_username = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "alice", "email": "other@example.com", "password": "correct-horse"}),
        )
        .await;
    assert_eq!(same_username.status, StatusCode::CREATED);
}

#[tokio::test]
async fn invalid_registration_is_rejected_with_envelope() {
    let app = TestApp::new();

    let bad_email = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "bob", "email": "not-an-email", "password": "correct-horse"}),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["success"], false);

    let short_password = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "bob", "email": "bob@example.com", "password": "short"}),
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let missing_field = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "bob", "email": "bob@example.com"}),
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.body["success"], false);
    assert!(missing_field.body["message"].is_string());
}

#[tokio::test]
async fn login_sets_a_fresh_cookie() {
    let app = TestApp::new();
    app.register("alice", "alice@example.com").await;

    let response = app
        .post_json(
            "/api/v1/auth/login",
            json!({"email": "alice@example.com", "password": "correct-horse"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], "alice");
    let cookie = response.session_cookie().expect("cookie set");

    let games = app.get("/api/v1/games", &cookie).await;
    assert_eq!(games.status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_identical() {
    let app = TestApp::new();
    app.register("alice", "alice@example.com").await;

    let wrong_password = app
        .post_json(
            "/api/v1/auth/login",
            json!({"email": "alice@example.com", "password": "wrong-horse"}),
        )
        .await;
    let unknown_email = app
        .post_json(
            "/api/v1/auth/login",
            json!({"email": "nobody@example.com", "password": "wrong-horse"}),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status, unknown_email.status);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["message"], "Invalid credentials");
    assert!(wrong_password.set_cookie().is_none());
    assert!(unknown_email.set_cookie().is_none());
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = TestApp::with_numbered_games(3);

    for cookie in [
        "".to_string(),
        "token=".to_string(),
        "token=garbage".to_string(),
        forged_cookie("wrong-secret", "1", 600),
        forged_cookie(JWT_SECRET, "1", -10),
    ] {
        let response = app.get("/api/v1/games", &cookie).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "cookie: {cookie}");
        assert_eq!(response.body["success"], false);
    }

    let favorites = app.authed(Method::POST, "/api/v1/favorites/1", "").await;
    assert_eq!(favorites.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_profile_of_cookie_holder() {
    let app = TestApp::new();
    let cookie = app.register("alice", "alice@example.com").await;

    let response = app.get("/api/v1/auth/me", &cookie).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], "alice@example.com");
    assert!(response.body["user"]["createdAt"].is_string());
}

#[tokio::test]
async fn me_for_unknown_user_is_not_found() {
    let app = TestApp::new();
    let response = app
        .get("/api/v1/auth/me", &forged_cookie(JWT_SECRET, "999", 600))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::new();
    let cookie = app.register("alice", "alice@example.com").await;

    let response = app.authed(Method::POST, "/api/v1/auth/logout", &cookie).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let cleared = response.set_cookie().expect("removal cookie");
    assert!(cleared.starts_with("token=;") || cleared.starts_with("token=\"\""));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_without_a_cookie_still_expires_it() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/logout")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.set_cookie().expect("removal cookie");
    assert!(cleared.starts_with("token="));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn sixth_login_in_a_window_is_throttled() {
    let app = TestApp::new();
    let attempt = json!({"email": "nobody@example.com", "password": "wrong-password"});

    for _ in 0..5 {
        let response = app.post_json("/api/v1/auth/login", attempt.clone()).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let throttled = app.post_json("/api/v1/auth/login", attempt).await;
    assert_eq!(throttled.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(throttled.body["success"], false);
    assert!(
        throttled.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Too many login attempts")
    );

    // Other routes are not throttled.
    let register = app
        .post_json(
            "/api/v1/auth/register",
            json!({"username": "bob", "email": "bob@example.com", "password": "correct-horse"}),
        )
        .await;
    assert_eq!(register.status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_reports_store_state() {
    let app = TestApp::new();

    let up = app.get("/api/health", "").await;
    assert_eq!(up.status, StatusCode::OK);
    assert_eq!(up.body["database"], "Connected");

    app.store.set_offline(true);
    let down = app.get("/api/health", "").await;
    assert_eq!(down.status, StatusCode::OK);
    assert_eq!(down.body["database"], "Disconnected");
}
