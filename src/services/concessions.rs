use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{Concession, ConcessionDraft, ConcessionItem, ConcessionPayload};

/// Кинотеатр по умолчанию для новых наборов.
const DEFAULT_CINEMA_ID: i64 = 1;

#[derive(Debug, Error)]
pub enum ConcessionError {
    #[error("Invalid concession: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Image is not valid base64: {0}")]
    InvalidImage(#[from] base64::DecodeError),
}

/// Убирает префикс `data:image/...;base64,` и проверяет, что остаток является base64.
pub fn normalize_image(image: Option<&str>) -> Result<Option<String>, ConcessionError> {
    let Some(image) = image.map(str::trim).filter(|image| !image.is_empty()) else {
        return Ok(None);
    };
    let encoded = match image.split_once("base64,") {
        Some((_, encoded)) => encoded,
        None => image,
    };
    general_purpose::STANDARD.decode(encoded)?;
    Ok(Some(encoded.to_string()))
}

/// Цена комбо = сумма цен всей еды и напитков.
pub fn combo_price(foods: &[ConcessionItem], drinks: &[ConcessionItem]) -> f64 {
    foods.iter().chain(drinks).map(|item| item.price).sum()
}

/// Превращает черновик из формы в тело запроса к бэкенду.
///
/// `existing_cinema`: кинотеатр редактируемого набора; у нового набора его нет.
pub fn build_payload(
    draft: ConcessionDraft,
    existing_cinema: Option<i64>,
) -> Result<ConcessionPayload, ConcessionError> {
    draft.validate()?;
    let image_base64 = normalize_image(draft.image_base64.as_deref())?;
    let combo_price = combo_price(&draft.foods, &draft.drinks);
    Ok(ConcessionPayload {
        name: draft.name,
        description: draft.description,
        image_base64,
        cinema_id: draft
            .cinema_id
            .or(existing_cinema)
            .unwrap_or(DEFAULT_CINEMA_ID),
        foods: draft.foods,
        drinks: draft.drinks,
        combo_price,
    })
}

/// Поиск без учёта регистра по названию, описанию и составу набора.
pub fn matches_search(concession: &Concession, term: &str, cinema_id: Option<i64>) -> bool {
    if let Some(cinema_id) = cinema_id {
        if concession.cinema_id != Some(cinema_id) {
            return false;
        }
    }

    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let contains = |text: Option<&str>| text.is_some_and(|text| text.to_lowercase().contains(&term));

    contains(concession.name.as_deref())
        || contains(concession.description.as_deref())
        || concession
            .foods
            .iter()
            .chain(&concession.drinks)
            .any(|item| contains(Some(item.name.as_str())) || contains(item.description.as_deref()))
}
