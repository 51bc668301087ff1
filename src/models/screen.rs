use serde::{Deserialize, Serialize};
use validator::Validate;

/// Экран (зал) в списке кинотеатра, как его отдаёт бэкенд.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub screen_type: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
    #[serde(default)]
    pub last_modified_date: Option<String>,
    #[serde(default)]
    pub number_of_seats: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenTypeRef {
    pub id: i64,
    pub name: Option<String>,
}

/// Элемент списка экранов для дашборда.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenListItem {
    pub id: i64,
    pub name: String,
    pub screen_type: ScreenTypeRef,
    pub status: Option<i32>,
    pub last_modified_by: Option<String>,
    pub last_modified_date: Option<String>,
    pub number_of_seats: Option<i64>,
}

impl From<ScreenSummary> for ScreenListItem {
    fn from(screen: ScreenSummary) -> Self {
        Self {
            id: screen.id,
            name: screen.name,
            // id типа бэкенд в списке не присылает
            screen_type: ScreenTypeRef {
                id: 0,
                name: screen.screen_type,
            },
            status: screen.status,
            last_modified_by: screen.last_modified_by,
            last_modified_date: screen.last_modified_date,
            number_of_seats: screen.number_of_seats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinemaRef {
    pub id: i64,
    pub name: Option<String>,
}

/// Метаданные экрана для заголовка редактора мест. Только для отображения.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub screen_type: Option<ScreenTypeRef>,
    #[serde(default)]
    pub cinema: Option<CinemaRef>,
}

/// Тело запроса на создание/изменение экрана.
///
/// Поля опциональны только для разбора: пропуск любого из них ловит
/// `validate()`, и до бэкенда такой запрос не доходит.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScreenUpsert {
    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[validate(required(message = "typeId is required"))]
    pub type_id: Option<i64>,
    #[validate(required(message = "status is required"))]
    pub status: Option<i32>,
}
