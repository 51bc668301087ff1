use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    api_client::ApiError,
    layout::PlacementError,
    models::UnknownSeatType,
    services::{concessions::ConcessionError, schedule::ScheduleError, seats::SeatEditError},
};

/// Ошибка HTTP-слоя. Все ошибки сервисов сводятся сюда и отдаются как
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing bearer token")]
    MissingCredential,
    #[error(transparent)]
    SeatEdit(#[from] SeatEditError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Concession(#[from] ConcessionError),
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    UnknownSeatType(#[from] UnknownSeatType),
}

fn api_status(error: &ApiError) -> StatusCode {
    match error {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::RemoteFailure { status: 404, .. } => StatusCode::NOT_FOUND,
        ApiError::RemoteFailure { .. } | ApiError::Transport(_) | ApiError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::Api(e) => api_status(e),
            AppError::SeatEdit(e) => match e {
                SeatEditError::Api(e) => api_status(e),
                SeatEditError::Placement(PlacementError::ReservedType(_)) => StatusCode::BAD_REQUEST,
                SeatEditError::Placement(_) => StatusCode::UNPROCESSABLE_ENTITY,
                // бэкенд прислал места, которые не ложатся в сетку
                SeatEditError::Grid(_) => StatusCode::BAD_GATEWAY,
                SeatEditError::UnknownSeatType(_) => StatusCode::BAD_REQUEST,
                SeatEditError::NotInitialized(_) | SeatEditError::AlreadyInitialized(_) => {
                    StatusCode::CONFLICT
                }
                SeatEditError::EditInProgress(_) => StatusCode::CONFLICT,
            },
            AppError::Schedule(ScheduleError::UnknownItem(_)) => StatusCode::NOT_FOUND,
            AppError::Schedule(ScheduleError::UnknownGroup(_))
            | AppError::Schedule(ScheduleError::DragOutOfRange(_)) => StatusCode::BAD_REQUEST,
            // расписание с бэкенда не укладывается в календарь
            AppError::Schedule(ScheduleError::EntryOutOfRange(_)) => StatusCode::BAD_GATEWAY,
            AppError::Concession(_) | AppError::Validation(_) | AppError::UnknownSeatType(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (
            status,
            Json(json!({
                "success": false,
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}
