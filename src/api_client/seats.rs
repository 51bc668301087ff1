use tracing::info;

use super::{ApiClient, ApiError};
use crate::{models::SeatRecord, session::Session};

impl ApiClient {
    /// Все места экрана. Пустой список = зал ещё не размечен.
    pub async fn get_seats(&self, session: &Session, screen_id: i64) -> Result<Vec<SeatRecord>, ApiError> {
        let request = self.get(&format!("/admin/screen/{}/seat", screen_id));
        self.fetch(session, request, "Failed to fetch seats").await
    }

    /// Полная замена мест экрана.
    pub async fn update_seats(
        &self,
        session: &Session,
        screen_id: i64,
        seats: &[SeatRecord],
    ) -> Result<(), ApiError> {
        info!("Replacing {} seats for screen {}", seats.len(), screen_id);
        let request = self
            .put(&format!("/admin/screen/{}/seat", screen_id))
            .json(seats);
        self.execute(session, request, "Failed to update seats").await?;
        Ok(())
    }

    /// Первичная разметка экрана без мест.
    pub async fn initialize_seats(
        &self,
        session: &Session,
        screen_id: i64,
        seats: &[SeatRecord],
    ) -> Result<(), ApiError> {
        info!("Initializing screen {} with {} seat records", screen_id, seats.len());
        let request = self
            .post(&format!("/admin/screen/{}/seat", screen_id))
            .json(seats);
        self.execute(session, request, "Failed to initialize seats").await?;
        Ok(())
    }
}
