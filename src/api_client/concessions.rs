use super::{ApiClient, ApiError};
use crate::{
    models::{Concession, ConcessionPayload},
    session::Session,
};

impl ApiClient {
    pub async fn list_concessions(&self, session: &Session) -> Result<Vec<Concession>, ApiError> {
        let request = self.get("/admin/concession");
        self.fetch(session, request, "Failed to fetch concessions").await
    }

    pub async fn get_concession(&self, session: &Session, concession_id: i64) -> Result<Concession, ApiError> {
        let request = self.get(&format!("/admin/concession/{}", concession_id));
        self.fetch(session, request, "Failed to fetch concession details").await
    }

    pub async fn create_concession(
        &self,
        session: &Session,
        payload: &ConcessionPayload,
    ) -> Result<serde_json::Value, ApiError> {
        let request = self.post("/admin/concession").json(payload);
        self.fetch_value(session, request, "Failed to create concession").await
    }

    pub async fn update_concession(
        &self,
        session: &Session,
        concession_id: i64,
        payload: &ConcessionPayload,
    ) -> Result<serde_json::Value, ApiError> {
        let request = self
            .put(&format!("/admin/concession/{}", concession_id))
            .json(payload);
        self.fetch_value(session, request, "Failed to update concession").await
    }
}
