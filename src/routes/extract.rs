//! Path ids that name no entity (non-numeric, out of range) are a 404, the
//! same as an id with no row behind it.

use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::services::ServiceError;
use crate::AppError;

pub struct UserId(pub i32);

pub struct PostId(pub i32);

async fn parse_id<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
    not_found: fn(&str) -> ServiceError,
) -> Result<i32, AppError> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
    raw.parse().map_err(|_| AppError::from(not_found(&raw)))
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_id(parts, state, |raw| ServiceError::user_not_found(raw)).await.map(Self)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PostId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_id(parts, state, |raw| ServiceError::post_not_found(raw)).await.map(Self)
    }
}
