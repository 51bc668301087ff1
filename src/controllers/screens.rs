use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use crate::{error::AppError, middleware::AuthSession, models::ScreenUpsert, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cinemas/{id}/screens", get(list_screens).post(create_screen))
        .route(
            "/screens/{id}",
            get(get_screen).put(update_screen).patch(toggle_screen_status),
        )
}

pub async fn list_screens(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(cinema_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let screens = state.client.list_screens(&session, cinema_id).await?;
    Ok(Json(json!({
        "success": true,
        "screens": screens,
        "count": screens.len()
    })))
}

pub async fn create_screen(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(cinema_id): Path<i64>,
    Json(screen): Json<ScreenUpsert>,
) -> Result<Json<Value>, AppError> {
    screen.validate()?;
    let created = state.client.create_screen(&session, cinema_id, &screen).await?;
    tracing::info!(
        "Created screen '{}' in cinema {}",
        screen.name.as_deref().unwrap_or_default(),
        cinema_id
    );
    Ok(Json(json!({
        "success": true,
        "screen": created
    })))
}

pub async fn get_screen(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(screen_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let screen = state.client.get_screen(&session, screen_id).await?;
    Ok(Json(json!({
        "success": true,
        "screen": screen
    })))
}

pub async fn update_screen(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(screen_id): Path<i64>,
    Json(screen): Json<ScreenUpsert>,
) -> Result<Json<Value>, AppError> {
    screen.validate()?;
    let updated = state.client.update_screen(&session, screen_id, &screen).await?;
    Ok(Json(json!({
        "success": true,
        "screen": updated
    })))
}

pub async fn toggle_screen_status(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(screen_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let result = state.client.toggle_screen_status(&session, screen_id).await?;
    tracing::info!("Toggled status of screen {}", screen_id);
    Ok(Json(json!({
        "success": true,
        "screen": result
    })))
}
