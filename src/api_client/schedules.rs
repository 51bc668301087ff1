use super::{ApiClient, ApiError};
use crate::{models::ScreenSchedule, session::Session};

impl ApiClient {
    /// Расписание кинотеатра, сгруппированное по экранам.
    pub async fn get_schedules(&self, session: &Session, cinema_id: i64) -> Result<Vec<ScreenSchedule>, ApiError> {
        let request = self.get(&format!("/admin/cinema/{}/schedule", cinema_id));
        self.fetch(session, request, "Failed to fetch schedules").await
    }
}
