pub mod concessions;
pub mod movies;
pub mod schedules;
pub mod screens;
pub mod seats;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(seats::routes())
        .merge(screens::routes())
        .merge(schedules::routes())
        .merge(movies::routes())
        .merge(concessions::routes())
}
