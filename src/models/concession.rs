use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConcessionItem {
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

/// Комбо-набор еды и напитков, как его хранит бэкенд.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concession {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub cinema_id: Option<i64>,
    #[serde(default)]
    pub foods: Vec<ConcessionItem>,
    #[serde(default)]
    pub drinks: Vec<ConcessionItem>,
    #[serde(default)]
    pub combo_price: Option<f64>,
}

/// Черновик из формы дашборда (создание или редактирование).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConcessionDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub cinema_id: Option<i64>,
    #[serde(default)]
    #[validate(nested)]
    pub foods: Vec<ConcessionItem>,
    #[serde(default)]
    #[validate(nested)]
    pub drinks: Vec<ConcessionItem>,
}

/// Тело запроса к бэкенду на создание/изменение набора.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcessionPayload {
    pub name: String,
    pub description: String,
    pub image_base64: Option<String>,
    pub cinema_id: i64,
    pub foods: Vec<ConcessionItem>,
    pub drinks: Vec<ConcessionItem>,
    pub combo_price: f64,
}
