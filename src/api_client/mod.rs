//! api_client
//!
//! Клиент REST API сети кинотеатров (внешний бэкенд).
//!
//! 1.  **ApiClient**: общий HTTP-клиент, базовый URL и обработка ответов.
//!     Каждый вызов получает явную [`Session`] и подставляет bearer токен.
//! 2.  **Обработка ошибок**: 401/403 превращаются в [`ApiError::Unauthorized`]
//!     (колбэк сессии вызывается один раз, повторов нет), любой другой
//!     не-2xx ответ в [`ApiError::RemoteFailure`] с сообщением бэкенда.
//! 3.  Эндпоинты разнесены по файлам так же, как разделы API: места, экраны,
//!     расписания, фильмы, наборы еды.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::{config::UpstreamConfig, session::Session};

pub mod concessions;
pub mod movies;
pub mod schedules;
pub mod screens;
pub mod seats;

/// Ошибки обращения к бэкенду.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Бэкенд отверг токен. Никогда не повторяется автоматически.
    #[error("Authentication required. Please log in again.")]
    Unauthorized,
    /// Любая другая ошибка бэкенда, сообщение показывается пользователю как есть.
    #[error("{message}")]
    RemoteFailure { status: u16, message: String },
    /// Сеть или протокол: до бэкенда не достучались.
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Бэкенд ответил, но тело не разобрать.
    #[error("Unexpected upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Тело ошибки бэкенда. Нас интересует только `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Клиент для взаимодействия с API кинотеатров.
#[derive(Clone)]
pub struct ApiClient {
    /// Базовый URL, например `http://localhost:8080/api/v1`.
    base_url: String,
    /// Асинхронный HTTP-клиент. Таймауты по умолчанию.
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder().gzip(true).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client.post(self.url(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http_client.put(self.url(path))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.http_client.patch(self.url(path))
    }

    /// Отправляет запрос с токеном сессии и разбирает статус ответа.
    ///
    /// `fallback`: сообщение для пользователя, если бэкенд не прислал своё.
    async fn execute(
        &self,
        session: &Session,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let response = request.bearer_auth(session.token()).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Upstream rejected credential with {}", status);
            session.notify_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| fallback.to_string());
            error!("Upstream request failed: status={}, message={}", status, message);
            return Err(ApiError::RemoteFailure {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Как `execute`, плюс разбор JSON тела ответа.
    async fn fetch<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = self.execute(session, request, fallback).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Для эндпоинтов, у которых тело ответа не описано: пустое тело = `null`.
    async fn fetch_value(
        &self,
        session: &Session,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.execute(session, request, fallback).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
