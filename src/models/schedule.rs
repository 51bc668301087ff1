use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Сеанс на экране.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub schedule_id: i64,
    pub movie_id: i64,
    pub movie_name: String,
    pub start_date_time: NaiveDateTime,
    /// Длительность фильма в минутах.
    pub movie_length: i64,
    #[serde(default)]
    pub status: Option<i32>,
}

/// Расписание одного экрана кинотеатра.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSchedule {
    pub screen_id: i64,
    pub screen_name: String,
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
}
