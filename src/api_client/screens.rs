use super::{ApiClient, ApiError};
use crate::{
    models::{ScreenDetail, ScreenListItem, ScreenSummary, ScreenUpsert},
    session::Session,
};

impl ApiClient {
    /// Все экраны кинотеатра в формате списка дашборда.
    pub async fn list_screens(&self, session: &Session, cinema_id: i64) -> Result<Vec<ScreenListItem>, ApiError> {
        let request = self.get(&format!("/admin/cinema/{}/screen", cinema_id));
        let screens: Vec<ScreenSummary> = self.fetch(session, request, "Failed to fetch screens").await?;
        Ok(screens.into_iter().map(ScreenListItem::from).collect())
    }

    pub async fn get_screen(&self, session: &Session, screen_id: i64) -> Result<ScreenDetail, ApiError> {
        let request = self.get(&format!("/admin/cinema/screen/{}", screen_id));
        self.fetch(session, request, "Failed to fetch screen").await
    }

    pub async fn create_screen(
        &self,
        session: &Session,
        cinema_id: i64,
        screen: &ScreenUpsert,
    ) -> Result<serde_json::Value, ApiError> {
        let request = self
            .post(&format!("/admin/cinema/{}/screen", cinema_id))
            .json(screen);
        self.fetch_value(session, request, "Failed to create screen").await
    }

    pub async fn update_screen(
        &self,
        session: &Session,
        screen_id: i64,
        screen: &ScreenUpsert,
    ) -> Result<serde_json::Value, ApiError> {
        let request = self
            .put(&format!("/admin/cinema/screen/{}", screen_id))
            .json(screen);
        self.fetch_value(session, request, "Failed to update screen")
            .await
            .map_err(|e| match e {
                ApiError::RemoteFailure { status: 404, .. } => ApiError::RemoteFailure {
                    status: 404,
                    message: "Screen not found".to_string(),
                },
                other => other,
            })
    }

    /// Включить/выключить экран.
    pub async fn toggle_screen_status(&self, session: &Session, screen_id: i64) -> Result<serde_json::Value, ApiError> {
        let request = self.patch(&format!("/admin/cinema/screen/{}", screen_id));
        self.fetch_value(session, request, "Failed to toggle screen status").await
    }
}
