//! Login and token-gate tests
//!
//! Cover the session state machine end to end:
//! Anonymous → (login) → Authenticated → (token expiry) → rejected.

mod common;

use axum::http::{StatusCode, header};
use axum_helpers::ErrorResponse;
use chrono::{DateTime, Duration, Utc};
use common::*;
use domain_users::auth_handlers::ValidationErrorBody;
use serde_json::json;

fn two_hours_ago() -> DateTime<Utc> {
    Utc::now() - Duration::hours(2)
}

#[tokio::test]
async fn test_login_sets_http_only_session_cookie() {
    let app = app();

    let response = send(
        &app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "abc", "password": "123456" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));

    assert_eq!(body_text(response).await, "User successfully logged in");
}

#[tokio::test]
async fn test_login_measures_length_before_trimming() {
    let app = app();

    let response = send(
        &app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "  ab  ", "password": "123456" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "User successfully logged in");
}

#[tokio::test]
async fn test_login_lists_every_failed_rule() {
    let app = app();

    let response = send(
        &app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "password": "12345" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body: ValidationErrorBody = body_json(response).await;
    assert_eq!(body.message, "Validation Error");

    let fields: Vec<_> = body.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["username", "username", "password"]);
    let messages: Vec<_> = body.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Username must be a string",
            "Username must be at least 3 characters long",
            "Password must be at least 6 characters long"
        ]
    );
}

#[tokio::test]
async fn test_user_routes_require_login() {
    let app = app();

    let response = send(&app, request("GET", "/user", None, None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.message, "User not logged in");
}

#[tokio::test]
async fn test_unknown_user_path_requires_login() {
    let app = app();

    let response = send(&app, request("GET", "/user/a/b/c", None, None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.message, "User not logged in");
}

#[tokio::test]
async fn test_unknown_user_path_is_not_found_once_logged_in() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(&app, request("GET", "/user/a/b/c", Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logged_in_session_reaches_user_routes() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(&app, request("GET", "/user", Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_is_not_authenticated() {
    // Tokens issued two hours ago expired one hour ago
    let app = app_with(jwt_auth().with_clock(two_hours_ago));
    let cookie = login(&app).await;

    let response = send(&app, request("GET", "/user", Some(&cookie), None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.message, "User not authenticated");
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let app = app();
    let cookie = login(&app).await;
    let tampered = format!("{}x", cookie);

    let response = send(&app, request("GET", "/user", Some(&tampered), None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.message, "User not logged in");
}

#[tokio::test]
async fn test_login_again_keeps_access() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(
        &app,
        request(
            "POST",
            "/login",
            Some(&cookie),
            Some(json!({ "username": "abcd", "password": "1234567" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap_or(cookie);

    let response = send(&app, request("POST", "/user", Some(&cookie), Some(json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@mail.example.com",
        "DOB": "1815-12-10"
    })))).await;
    assert_eq!(response.status(), StatusCode::OK);
}
