pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod json;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies/", get(routes::movies::list).post(routes::movies::create))
        .route(
            "/movies/{id}",
            get(routes::movies::get).put(routes::movies::update).delete(routes::movies::delete),
        )
        .route("/directors/", get(routes::directors::list))
        .route("/directors/{id}", get(routes::directors::get))
        .route("/genres/", get(routes::genres::list))
        .route("/genres/{id}", get(routes::genres::get))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}
