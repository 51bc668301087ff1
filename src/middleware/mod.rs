use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::{error::AppError, session::Session};

/// Bearer токен дашборда, который пробрасывается в бэкенд как есть.
///
/// Сам токен здесь не проверяется: это делает бэкенд. Если он его отвергнет,
/// сессия только залогирует это, а запрос вернёт 401 без повторов.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Получаем заголовок Authorization
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::MissingCredential)?;

        let path = parts.uri.path().to_string();
        let session = Session::new(token).with_unauthorized_handler(move || {
            warn!("Credential rejected by upstream while serving {}", path);
        });

        Ok(AuthSession(session))
    }
}
