use std::sync::Arc;

use axum::extract::State;

use super::{RecordId, non_empty};
use crate::{
    AppState,
    entities::genre,
    error::{AppError, AppResult},
    json::PrettyJson,
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<PrettyJson<Vec<genre::Model>>> {
    Ok(PrettyJson(non_empty(state.catalog.list_genres().await?)?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> AppResult<PrettyJson<genre::Model>> {
    let genre = state.catalog.get_genre(id).await?.ok_or(AppError::NotFound)?;
    Ok(PrettyJson(genre))
}
