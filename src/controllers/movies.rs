use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::AuthSession,
    services::movies::{self, MovieCard, MovieFilter},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie))
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub filter: MovieFilter,
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Query(params): Query<MoviesQuery>,
) -> Result<Json<Value>, AppError> {
    let cards: Vec<MovieCard> = state
        .client
        .list_movies(&session)
        .await?
        .into_iter()
        .map(MovieCard::from)
        .collect();

    // статистика всегда по всему каталогу, фильтр влияет только на список
    let stats = movies::stats(&cards);
    let movies: Vec<MovieCard> = cards
        .into_iter()
        .filter(|card| params.filter.matches(card))
        .collect();

    Ok(Json(json!({
        "success": true,
        "movies": movies,
        "stats": stats
    })))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(movie_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let movie = MovieCard::from(state.client.get_movie(&session, movie_id).await?);
    Ok(Json(json!({
        "success": true,
        "movie": movie
    })))
}
