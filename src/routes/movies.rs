use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::{debug, info, warn};

use super::{RecordId, non_empty};
use crate::{
    AppState,
    entities::movie,
    error::{AppError, AppResult},
    json::PrettyJson,
    models::{MovieInput, MovieListQuery},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<PrettyJson<Vec<movie::Model>>> {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_default();
    let filter = MovieListQuery::from_pairs(pairs).filter();
    let movies = state.catalog.list_movies(filter).await?;
    debug!(?filter, count = movies.len(), "listed movies");
    Ok(PrettyJson(non_empty(movies)?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = body.map_err(|rejection| {
        warn!(error = %rejection, "rejected movie payload");
        AppError::NotFound
    })?;

    match state.catalog.create_movie(input).await {
        Ok(created) => {
            info!(id = created.id, "movie created");
            Ok(StatusCode::CREATED)
        }
        Err(err) => {
            warn!(error = %err, "movie insert failed");
            Err(AppError::NotFound)
        }
    }
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> AppResult<PrettyJson<movie::Model>> {
    let movie = state.catalog.get_movie(id).await?.ok_or(AppError::NotFound)?;
    Ok(PrettyJson(movie))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = body.map_err(|rejection| {
        warn!(id, error = %rejection, "rejected movie payload");
        AppError::NotFound
    })?;

    state.catalog.update_movie(id, input).await?.ok_or(AppError::NotFound)?;
    info!(id, "movie updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    if !state.catalog.delete_movie(id).await? {
        return Err(AppError::NotFound);
    }
    info!(id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
