use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Рекомендательные блокировки правок раскладки, по одной на экран.
///
/// Живут только в памяти процесса и на время одного цикла запрос/ответ к
/// бэкенду. Между разными клиентами ничего не согласуется: побеждает
/// последняя запись.
#[derive(Debug, Clone, Default)]
pub struct EditLocks {
    held: Arc<Mutex<HashSet<i64>>>,
}

impl EditLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Захватить блокировку экрана. `None`, если правка уже идёт.
    pub fn try_acquire(&self, screen_id: i64) -> Option<EditGuard> {
        let mut held = self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !held.insert(screen_id) {
            return None;
        }
        debug!("Edit lock acquired for screen {}", screen_id);
        Some(EditGuard {
            held: self.held.clone(),
            screen_id,
        })
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self, screen_id: i64) -> bool {
        self.held
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&screen_id)
    }
}

/// Держит блокировку экрана; отпускает её при drop, в том числе на ошибке.
#[derive(Debug)]
pub struct EditGuard {
    held: Arc<Mutex<HashSet<i64>>>,
    screen_id: i64,
}

impl Drop for EditGuard {
    fn drop(&mut self) {
        let mut held = self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        held.remove(&self.screen_id);
        debug!("Edit lock released for screen {}", self.screen_id);
    }
}
