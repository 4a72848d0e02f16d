use std::sync::Arc;

use axum::extract::State;

use super::{RecordId, non_empty};
use crate::{
    AppState,
    entities::director,
    error::{AppError, AppResult},
    json::PrettyJson,
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<PrettyJson<Vec<director::Model>>> {
    Ok(PrettyJson(non_empty(state.catalog.list_directors().await?)?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> AppResult<PrettyJson<director::Model>> {
    let director = state.catalog.get_director(id).await?.ok_or(AppError::NotFound)?;
    Ok(PrettyJson(director))
}
