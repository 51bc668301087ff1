use std::fmt;
use std::sync::Arc;

type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Контекст сессии, который передаётся в каждый вызов бэкенда.
///
/// Вместо глобального токена и редиректа на логин: непрозрачный bearer токен
/// и колбэк, который вызывается, когда бэкенд отверг этот токен.
#[derive(Clone)]
pub struct Session {
    token: String,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            on_unauthorized: None,
        }
    }

    pub fn with_unauthorized_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn notify_unauthorized(&self) {
        if let Some(handler) = &self.on_unauthorized {
            handler();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .finish()
    }
}
