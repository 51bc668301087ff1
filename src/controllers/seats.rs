use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppError,
    layout::{GridDims, LoadedLayout},
    middleware::AuthSession,
    models::{Position, ScreenDetail, SeatCell, SeatType, SeatTypeInfo},
    services::seats::SeatPaint,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seat-types", get(seat_types))
        .route("/screens/{id}/seats", get(get_layout))
        .route("/screens/{id}/seats/place", post(place_seat))
        .route("/screens/{id}/seats/initialize", post(initialize_layout))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSeatRequest {
    pub row: usize,
    pub col: usize,
    pub type_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct InitializeRequest {
    #[serde(default)]
    pub paints: Vec<SeatPaint>,
}

/// Клетка сетки для отрисовки: запись места плюс цвет и название типа.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub type_id: i32,
    pub root_row: usize,
    pub root_col: usize,
    pub name: Option<String>,
    pub type_name: &'static str,
    pub color: &'static str,
}

impl From<&SeatCell> for CellView {
    fn from(cell: &SeatCell) -> Self {
        let info = cell.seat_type.info();
        Self {
            row: cell.position.row,
            col: cell.position.col,
            type_id: info.type_id,
            root_row: cell.root.row,
            root_col: cell.root.col,
            name: cell.name.clone(),
            type_name: info.name,
            color: info.color,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LayoutView {
    pub initialized: bool,
    pub rows: usize,
    pub cols: usize,
    /// Построчно; `null` там, где бэкенд не прислал место.
    pub seats: Vec<Vec<Option<CellView>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenDetail>,
}

impl LayoutView {
    fn new(layout: &LoadedLayout, dims: GridDims, screen: Option<ScreenDetail>) -> Self {
        let seats = match layout.grid() {
            Some(grid) => grid
                .rows()
                .map(|row| row.iter().map(|cell| cell.as_ref().map(CellView::from)).collect())
                .collect(),
            None => Vec::new(),
        };
        Self {
            initialized: layout.grid().is_some(),
            rows: dims.rows,
            cols: dims.cols,
            seats,
            screen,
        }
    }
}

pub async fn seat_types() -> Json<Vec<SeatTypeInfo>> {
    Json(SeatType::ALL.iter().map(|seat_type| seat_type.info()).collect())
}

pub async fn get_layout(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(screen_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let loaded = state.seats.load(&session, screen_id).await?;
    let view = LayoutView::new(&loaded.layout, state.seats.dims(), Some(loaded.screen));
    Ok(Json(json!({
        "success": true,
        "layout": view
    })))
}

pub async fn place_seat(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(screen_id): Path<i64>,
    Json(request): Json<PlaceSeatRequest>,
) -> Result<Json<Value>, AppError> {
    let seat_type = SeatType::try_from(request.type_id)?;
    let anchor = Position::new(request.row, request.col);

    let layout = state.seats.place(&session, screen_id, anchor, seat_type).await?;
    let view = LayoutView::new(&layout, state.seats.dims(), None);
    Ok(Json(json!({
        "success": true,
        "layout": view
    })))
}

pub async fn initialize_layout(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(screen_id): Path<i64>,
    Json(request): Json<InitializeRequest>,
) -> Result<Json<Value>, AppError> {
    let layout = state.seats.initialize(&session, screen_id, &request.paints).await?;
    let view = LayoutView::new(&layout, state.seats.dims(), None);
    Ok(Json(json!({
        "success": true,
        "layout": view
    })))
}
