//! Login endpoint.
//!
//! `POST /login` checks the submitted credentials for shape only (there is no
//! user database behind them), signs a token for the username and binds it to
//! the caller's session. The token is never returned in the body.

use std::borrow::Cow;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_helpers::{JsonBody, JwtAuth, SessionUser, store_access_token};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tower_sessions::Session;
use utoipa::{OpenApi, ToSchema};
use validator::{Validate, ValidateLength, ValidationError, ValidationErrors};

pub const TAG: &str = "Auth";

pub const USERNAME_MIN_LEN: u64 = 3;
pub const PASSWORD_MIN_LEN: u64 = 6;

pub const LOGIN_SUCCESS: &str = "User successfully logged in";

/// (struct field, label, minimum length) in reporting order
const LOGIN_FIELDS: [(&str, &str, u64); 2] = [
    ("username", "Username", USERNAME_MIN_LEN),
    ("password", "Password", PASSWORD_MIN_LEN),
];

/// Rule codes in reporting order within one field
const RULE_ORDER: [&str; 2] = ["string", "length"];

/// OpenAPI documentation for the login endpoint
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(schemas(LoginRequest, FieldError, ValidationErrorBody)),
    tags(
        (name = TAG, description = "Session login")
    )
)]
pub struct ApiDoc;

/// A login field exactly as submitted.
///
/// Kept as raw JSON so that a non-string value is reported as a field error
/// rather than a malformed body. A missing field reads as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawField(pub Value);

impl RawField {
    /// Text the length rule measures: strings as sent (untrimmed), numbers and
    /// booleans as printed, anything else empty.
    pub fn as_text(&self) -> Cow<'_, str> {
        match &self.0 {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            _ => Cow::Borrowed(""),
        }
    }
}

impl From<Value> for RawField {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl ValidateLength<u64> for RawField {
    fn length(&self) -> Option<u64> {
        Some(self.as_text().chars().count() as u64)
    }
}

/// Custom validator: the field must be a JSON string
fn validate_is_string(value: &RawField) -> Result<(), ValidationError> {
    match value.0 {
        Value::String(_) => Ok(()),
        _ => Err(ValidationError::new("string")),
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "abc")]
    #[validate(custom(function = "validate_is_string"), length(min = USERNAME_MIN_LEN))]
    pub username: RawField,

    #[serde(default)]
    #[schema(value_type = String, example = "123456")]
    #[validate(custom(function = "validate_is_string"), length(min = PASSWORD_MIN_LEN))]
    pub password: RawField,
}

/// One rejected login field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Body of a 400 login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// Credentials after trimming and escaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation Error")]
    Validation(Vec<FieldError>),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Validation(errors) => {
                tracing::debug!(count = errors.len(), "Login rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody {
                        message: "Validation Error".to_string(),
                        errors,
                    }),
                )
                    .into_response()
            }
            AuthError::Token(msg) | AuthError::Session(msg) => {
                tracing::error!("Login failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Replace HTML-significant characters with entities.
pub fn escape_markup(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render(label: &str, code: &str, min_len: u64) -> String {
    match code {
        "string" => format!("{label} must be a string"),
        "length" => format!("{label} must be at least {min_len} characters long"),
        _ => format!("{label} is invalid"),
    }
}

/// Every failed rule, field by field, string check before length.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();

    LOGIN_FIELDS
        .iter()
        .flat_map(|(field, label, min_len)| {
            let failed = by_field.get(*field).copied();
            RULE_ORDER
                .iter()
                .filter(move |code| {
                    failed.is_some_and(|errs| errs.iter().any(|err| err.code == **code))
                })
                .map(move |code| FieldError {
                    field: field.to_string(),
                    message: render(label, code, *min_len),
                })
        })
        .collect()
}

fn sanitize(field: &RawField) -> String {
    escape_markup(field.as_text().trim())
}

/// Check both fields, then trim and escape them.
pub fn validate_credentials(input: &LoginRequest) -> Result<Credentials, Vec<FieldError>> {
    input.validate().map_err(|errors| field_errors(&errors))?;

    Ok(Credentials {
        username: sanitize(&input.username),
        password: sanitize(&input.password),
    })
}

/// Create the login router
pub fn router(auth: JwtAuth) -> Router {
    Router::new().route("/login", post(login)).with_state(auth)
}

/// Log in and bind a fresh access token to the session
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; the session cookie now carries the token", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error", body = ValidationErrorBody),
        (status = 500, description = "Token could not be issued")
    )
)]
pub async fn login(
    State(auth): State<JwtAuth>,
    session: Session,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Result<&'static str, AuthError> {
    let credentials = validate_credentials(&input).map_err(AuthError::Validation)?;

    let token = auth
        .issue_token(SessionUser {
            username: credentials.username.clone(),
        })
        .map_err(|e| AuthError::Token(e.to_string()))?;

    store_access_token(&session, token)
        .await
        .map_err(|e| AuthError::Session(e.to_string()))?;

    tracing::info!(username = %credentials.username, "User logged in");
    Ok(LOGIN_SUCCESS)
}
