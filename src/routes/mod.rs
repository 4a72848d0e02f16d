pub mod directors;
pub mod genres;
pub mod movies;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Record id taken from the `{id}` path segment. Anything that is not an
/// integer, including a segment that does not decode, names no record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecordId(pub i32);

impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        parse_id(&raw).map(RecordId)
    }
}

fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// Lists answer 404 rather than an empty array.
fn non_empty<T>(rows: Vec<T>) -> Result<Vec<T>, AppError> {
    if rows.is_empty() { Err(AppError::NotFound) } else { Ok(rows) }
}
