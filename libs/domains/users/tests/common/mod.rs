//! Shared fixtures for the users handler tests.
//!
//! Builds the directory the way the binary does (session layer outside, login
//! route next to the guarded `/user` routes) and drives it with `oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum_helpers::{JwtAuth, JwtConfig, SessionConfig, create_session_layer};
use domain_users::{InMemoryUserRepository, UserService, auth_handlers, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

pub const JWT_SECRET: &str = "handler-tests-jwt-secret-with-32-chars";

pub fn jwt_auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(JWT_SECRET))
}

/// Full user directory app around `auth`, seeded with the three fixed records.
pub fn app_with(auth: JwtAuth) -> Router {
    let service = UserService::new(InMemoryUserRepository::seeded());
    let sessions =
        create_session_layer(&SessionConfig::new("s".repeat(64)).with_secure(false)).unwrap();

    Router::new()
        .nest("/user", handlers::router(service, auth.clone()))
        .merge(auth_handlers::router(auth))
        .layer(sessions)
}

pub fn app() -> Router {
    app_with(jwt_auth())
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// `name=value` pair of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(|pair| pair.trim().to_string())
}

/// Log in as `abc` and return the session cookie to replay.
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "abc", "password": "123456" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    session_cookie(&response).expect("login should set a session cookie")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// Helper to parse JSON response body
pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
