//! JSON extractor whose rejections render as the standard error body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor.
///
/// Behaves like [`axum::Json`], but every rejection (missing content type,
/// malformed JSON, wrong field types) becomes a `400 Bad Request` carrying an
/// [`ErrorResponse`](crate::errors::ErrorResponse). Field-level rules are left
/// to the domain service, which knows how to order and word them.
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateUser>) -> String {
///     format!("{:?}", input)
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
