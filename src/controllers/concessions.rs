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
    models::ConcessionDraft,
    services::concessions::{build_payload, matches_search},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/concessions", get(list_concessions).post(create_concession))
        .route("/concessions/{id}", get(get_concession).put(update_concession))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcessionsQuery {
    pub search: Option<String>,
    pub cinema_id: Option<i64>,
}

pub async fn list_concessions(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Query(params): Query<ConcessionsQuery>,
) -> Result<Json<Value>, AppError> {
    let term = params.search.as_deref().unwrap_or_default();
    let concessions: Vec<_> = state
        .client
        .list_concessions(&session)
        .await?
        .into_iter()
        .filter(|concession| matches_search(concession, term, params.cinema_id))
        .collect();

    Ok(Json(json!({
        "success": true,
        "concessions": concessions,
        "count": concessions.len()
    })))
}

pub async fn get_concession(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(concession_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let concession = state.client.get_concession(&session, concession_id).await?;
    Ok(Json(json!({
        "success": true,
        "concession": concession
    })))
}

pub async fn create_concession(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Json(draft): Json<ConcessionDraft>,
) -> Result<Json<Value>, AppError> {
    let payload = build_payload(draft, None)?;
    let created = state.client.create_concession(&session, &payload).await?;
    tracing::info!(
        "Created concession '{}' for cinema {} (combo price {:.2})",
        payload.name,
        payload.cinema_id,
        payload.combo_price
    );
    Ok(Json(json!({
        "success": true,
        "concession": created
    })))
}

pub async fn update_concession(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(concession_id): Path<i64>,
    Json(draft): Json<ConcessionDraft>,
) -> Result<Json<Value>, AppError> {
    // без cinemaId в форме набор остаётся в своём кинотеатре
    let existing_cinema = match draft.cinema_id {
        Some(_) => None,
        None => state.client.get_concession(&session, concession_id).await?.cinema_id,
    };
    let payload = build_payload(draft, existing_cinema)?;
    let updated = state
        .client
        .update_concession(&session, concession_id, &payload)
        .await?;
    Ok(Json(json!({
        "success": true,
        "concession": updated
    })))
}
