use super::{ApiClient, ApiError};
use crate::{models::Movie, session::Session};

impl ApiClient {
    pub async fn list_movies(&self, session: &Session) -> Result<Vec<Movie>, ApiError> {
        let request = self.get("/admin/movie");
        self.fetch(session, request, "Failed to fetch movies").await
    }

    pub async fn get_movie(&self, session: &Session, movie_id: i64) -> Result<Movie, ApiError> {
        let request = self.get(&format!("/admin/movie/{}", movie_id));
        self.fetch(session, request, "Failed to fetch movie details").await
    }
}
