//! Extractors that report rejections through [`BusinessError`] so every
//! failure, including malformed bodies and bad path segments, answers with
//! the same JSON error shape.

use super::errors::BusinessError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// JSON body extractor
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BusinessError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Integer primary key taken from the `{id}` path segment
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = BusinessError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// Query string extractor
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BusinessError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for BusinessError {
    fn from(rejection: JsonRejection) -> Self {
        BusinessError::ValidationError {
            field: "body".to_string(),
            message: format!("Invalid JSON body: {}", rejection.body_text()),
        }
    }
}

impl From<PathRejection> for BusinessError {
    fn from(rejection: PathRejection) -> Self {
        BusinessError::ValidationError {
            field: "id".to_string(),
            message: format!("Invalid path parameter: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for BusinessError {
    fn from(rejection: QueryRejection) -> Self {
        BusinessError::ValidationError {
            field: "query".to_string(),
            message: format!("Invalid query string: {}", rejection.body_text()),
        }
    }
}
