use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::AuthSession,
    services::schedule::{MoveRequest, Timeline},
    session::Session,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cinemas/{id}/schedule", get(get_timeline))
        .route("/cinemas/{id}/schedule/move", post(preview_move))
}

async fn load_timeline(state: &AppState, session: &Session, cinema_id: i64) -> Result<Timeline, AppError> {
    let screens = state.client.get_schedules(session, cinema_id).await?;
    Ok(Timeline::from_schedules(screens)?)
}

pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(cinema_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let timeline = load_timeline(&state, &session, cinema_id).await?;
    Ok(Json(json!({
        "success": true,
        "timeline": timeline
    })))
}

/// Перенос сеанса на таймлайне. Бэкенд не умеет сохранять расписание,
/// поэтому ответ только показывает, где сеанс окажется.
pub async fn preview_move(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(cinema_id): Path<i64>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<Value>, AppError> {
    let mut timeline = load_timeline(&state, &session, cinema_id).await?;
    let moved = timeline.move_item(&request)?.clone();
    Ok(Json(json!({
        "success": true,
        "item": moved,
        "timeline": timeline
    })))
}
