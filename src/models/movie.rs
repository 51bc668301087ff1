use serde::{Deserialize, Serialize};

/// Фильм в том виде, в каком его отдаёт бэкенд.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub poster: Option<String>,
    /// Длительность в минутах.
    #[serde(default)]
    pub length: Option<i64>,
    /// 1 = уже в прокате, всё остальное = скоро.
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub trailer_youtube_id: Option<String>,
}
