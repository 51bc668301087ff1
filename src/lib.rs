pub mod api_client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod layout;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{api_client::ApiClient, services::seats::SeatEditorService};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub client: ApiClient,
    pub seats: SeatEditorService,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, api_client::ApiError> {
        let client = ApiClient::from_config(&config.upstream)?;
        let seats = SeatEditorService::new(
            client.clone(),
            config.layout.dims(),
            config.layout.init_emission,
        );

        Ok(Arc::new(Self {
            config,
            client,
            seats,
        }))
    }
}

/// Главный роутер: служебные маршруты и API под `/api`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cinema Admin API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
