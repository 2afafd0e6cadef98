use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    routing::get,
};
use axum_helpers::{
    ErrorResponse, JsonBody, JwtAuth, JwtClaims, errors::handlers::not_found,
    require_session_token,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "Users";

/// OpenAPI documentation for the user directory
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        users_by_last_name,
        sort_users,
    ),
    components(schemas(User, CreateUser, UpdateUser, ErrorResponse)),
    tags(
        (name = TAG, description = "User directory endpoints (login required)")
    )
)]
pub struct ApiDoc;

/// Create the user directory router, guarded by the session token gate.
///
/// Unmatched paths under the prefix fall through to a 404 behind the same
/// gate, so anonymous callers see 403 everywhere below it. The caller must
/// wrap the final app in the session layer.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{email}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/lastName/{last_name}", get(users_by_last_name))
        .route("/sort/{direction}", get(sort_users))
        .fallback(not_found)
        .with_state(shared_service)
        .layer(middleware::from_fn_with_state(auth, require_session_token))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("SessionCookie" = [])),
    responses(
        (status = 200, description = "All users in store order", body = Vec<User>),
        (status = 403, description = "Not logged in or token rejected", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Add a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("SessionCookie" = [])),
    request_body = CreateUser,
    responses(
        (status = 200, description = "User added", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    JsonBody(input): JsonBody<CreateUser>,
) -> UserResult<String> {
    let user = service.create_user(input).await?;

    tracing::info!(actor = %claims.data.username, email = %user.email, "User added");
    Ok(format!("The user {} has been added!", user.first_name))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/{email}",
    tag = TAG,
    security(("SessionCookie" = [])),
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Not an email", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(email): Path<String>,
) -> UserResult<Json<User>> {
    let user = service.get_user(&email).await?;
    Ok(Json(user))
}

/// Update a user; supplied fields overwrite, the rest are kept
#[utoipa::path(
    put,
    path = "/{email}",
    tag = TAG,
    security(("SessionCookie" = [])),
    params(
        ("email" = String, Path, description = "User email")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    Path(email): Path<String>,
    JsonBody(input): JsonBody<UpdateUser>,
) -> UserResult<String> {
    let user = service.update_user(&email, input).await?;

    tracing::info!(actor = %claims.data.username, email = %user.email, "User updated");
    Ok(format!("User with the email {} updated.", email))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{email}",
    tag = TAG,
    security(("SessionCookie" = [])),
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "User deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    Path(email): Path<String>,
) -> UserResult<String> {
    service.delete_user(&email).await?;

    tracing::info!(actor = %claims.data.username, email = %email, "User deleted");
    Ok(format!("User with the email {} deleted.", email))
}

/// Users with a given last name (case-insensitive)
#[utoipa::path(
    get,
    path = "/lastName/{last_name}",
    tag = TAG,
    security(("SessionCookie" = [])),
    params(
        ("last_name" = String, Path, description = "Last name to match")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 404, description = "No user has this last name", body = ErrorResponse)
    )
)]
async fn users_by_last_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(last_name): Path<String>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.users_by_last_name(&last_name).await?;
    Ok(Json(users))
}

/// Sort the directory by date of birth
#[utoipa::path(
    get,
    path = "/sort/{direction}",
    tag = TAG,
    security(("SessionCookie" = [])),
    params(
        ("direction" = String, Path, description = "`asc` or `desc`")
    ),
    responses(
        (status = 200, description = "Users in the new order", body = Vec<User>),
        (status = 400, description = "Unknown direction", body = ErrorResponse)
    )
)]
async fn sort_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    Path(direction): Path<String>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.sort_users(&direction).await?;

    tracing::debug!(actor = %claims.data.username, %direction, "Users sorted");
    Ok(Json(users))
}
