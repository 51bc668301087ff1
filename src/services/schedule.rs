use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ScreenSchedule;

/// Шаг привязки сеансов при перетаскивании, в минутах.
const SNAP_MINUTES: u32 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Schedule item {0} not found")]
    UnknownItem(i64),
    #[error("No screen at timeline position {0}")]
    UnknownGroup(usize),
    /// Длина фильма из расписания не укладывается в календарь.
    #[error("Schedule item {0} ends outside the supported date range")]
    EntryOutOfRange(i64),
    #[error("Cannot move a session to {0}: outside the supported date range")]
    DragOutOfRange(NaiveDateTime),
}

/// Строка таймлайна: один экран.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineGroup {
    pub id: i64,
    pub title: String,
}

/// Сеанс на таймлайне.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub id: i64,
    pub group: i64,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub movie_id: i64,
    pub status: Option<i32>,
    pub can_move: bool,
    pub can_resize: bool,
    pub can_change_group: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub groups: Vec<TimelineGroup>,
    pub items: Vec<TimelineItem>,
}

/// Запрос на перетаскивание сеанса.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub item_id: i64,
    pub drag_time: NaiveDateTime,
    pub group_index: usize,
}

impl Timeline {
    /// Строит таймлайн из расписаний экранов: конец сеанса = начало + длина фильма.
    pub fn from_schedules(screens: Vec<ScreenSchedule>) -> Result<Self, ScheduleError> {
        let mut timeline = Timeline::default();
        for screen in screens {
            timeline.groups.push(TimelineGroup {
                id: screen.screen_id,
                title: screen.screen_name,
            });
            for entry in screen.schedules {
                let end_time = TimeDelta::try_minutes(entry.movie_length)
                    .and_then(|length| entry.start_date_time.checked_add_signed(length))
                    .ok_or(ScheduleError::EntryOutOfRange(entry.schedule_id))?;
                timeline.items.push(TimelineItem {
                    id: entry.schedule_id,
                    group: screen.screen_id,
                    title: entry.movie_name,
                    start_time: entry.start_date_time,
                    end_time,
                    movie_id: entry.movie_id,
                    status: entry.status,
                    can_move: true,
                    can_resize: false,
                    can_change_group: false,
                });
            }
        }
        Ok(timeline)
    }

    /// Переносит сеанс: начало привязывается к ближайшим 15 минутам,
    /// длительность сохраняется, экран берётся по позиции строки.
    ///
    /// Только предпросмотр, на бэкенд ничего не сохраняется.
    pub fn move_item(&mut self, request: &MoveRequest) -> Result<&TimelineItem, ScheduleError> {
        let group = self
            .groups
            .get(request.group_index)
            .map(|group| group.id)
            .ok_or(ScheduleError::UnknownGroup(request.group_index))?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == request.item_id)
            .ok_or(ScheduleError::UnknownItem(request.item_id))?;

        let length = item.end_time.signed_duration_since(item.start_time);
        let out_of_range = || ScheduleError::DragOutOfRange(request.drag_time);
        let start = snap_to_quarter_hour(request.drag_time).ok_or_else(out_of_range)?;
        let end = start.checked_add_signed(length).ok_or_else(out_of_range)?;

        item.start_time = start;
        item.end_time = end;
        item.group = group;
        Ok(item)
    }
}

/// Округляет время до ближайших 15 минут (половина вверх), секунды обнуляются.
/// 60 минут переходят в следующий час.
///
/// `None`, если результат выходит за пределы `NaiveDateTime`.
pub fn snap_to_quarter_hour(time: NaiveDateTime) -> Option<NaiveDateTime> {
    let rounded = (time.minute() + SNAP_MINUTES / 2) / SNAP_MINUTES * SNAP_MINUTES;
    let hour_start = time.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
    hour_start.checked_add_signed(TimeDelta::try_minutes(i64::from(rounded))?)
}
