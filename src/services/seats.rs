//! Сервис редактора мест: загрузка, правка и первичная разметка зала.
//!
//! Каждая правка проходит полный цикл: свежие места с бэкенда → сетка →
//! движок размещения → полный payload → PUT → перечитать места. Кеша между
//! сохранениями нет, сетка всегда строится заново.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api_client::{ApiClient, ApiError},
    layout::{
        self, assemble, build_grid, fingerprint, GridDims, GridError, LayoutCanvas, LoadedLayout,
        PlacementError, SeatInitEmission,
    },
    models::{Position, ScreenDetail, SeatType, UnknownSeatType},
    services::edit_lock::EditLocks,
    session::Session,
};

#[derive(Debug, Error)]
pub enum SeatEditError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    UnknownSeatType(#[from] UnknownSeatType),
    #[error("Seat layout for screen {0} has not been initialized")]
    NotInitialized(i64),
    #[error("Screen {0} already has a seat layout")]
    AlreadyInitialized(i64),
    #[error("Another seat edit for screen {0} is still in progress")]
    EditInProgress(i64),
}

/// Экран вместе с его раскладкой.
#[derive(Debug, Clone)]
pub struct ScreenLayout {
    pub screen: ScreenDetail,
    pub layout: LoadedLayout,
}

/// Одна покраска холста при первичной разметке.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPaint {
    pub row: usize,
    pub col: usize,
    pub type_id: i32,
}

#[derive(Clone)]
pub struct SeatEditorService {
    client: ApiClient,
    locks: EditLocks,
    dims: GridDims,
    emission: SeatInitEmission,
}

impl SeatEditorService {
    pub fn new(client: ApiClient, dims: GridDims, emission: SeatInitEmission) -> Self {
        Self {
            client,
            locks: EditLocks::new(),
            dims,
            emission,
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Метаданные экрана и его места, запрашиваются параллельно.
    pub async fn load(&self, session: &Session, screen_id: i64) -> Result<ScreenLayout, SeatEditError> {
        let (screen, records) = futures::try_join!(
            self.client.get_screen(session, screen_id),
            self.client.get_seats(session, screen_id)
        )?;
        let layout = build_grid(&records, self.dims)?;
        Ok(ScreenLayout { screen, layout })
    }

    async fn fetch_layout(&self, session: &Session, screen_id: i64) -> Result<LoadedLayout, SeatEditError> {
        let records = self.client.get_seats(session, screen_id).await?;
        Ok(build_grid(&records, self.dims)?)
    }

    /// Ставит место типа `seat_type` с якорем `anchor` и сохраняет всю сетку.
    ///
    /// Отказы движка (`OutOfBounds`, `Blocked`) возвращаются до отправки,
    /// на бэкенд в этом случае ничего не уходит.
    pub async fn place(
        &self,
        session: &Session,
        screen_id: i64,
        anchor: Position,
        seat_type: SeatType,
    ) -> Result<LoadedLayout, SeatEditError> {
        let _guard = self
            .locks
            .try_acquire(screen_id)
            .ok_or(SeatEditError::EditInProgress(screen_id))?;

        let grid = match self.fetch_layout(session, screen_id).await? {
            LoadedLayout::Ready(grid) => grid,
            LoadedLayout::Uninitialized => return Err(SeatEditError::NotInitialized(screen_id)),
        };

        let changes = layout::place(&grid, anchor, seat_type).map_err(|e| {
            warn!("Rejected {} placement on screen {}: {}", seat_type.name(), screen_id, e);
            e
        })?;

        let payload = assemble(&grid, &changes);
        info!(
            "Submitting seat layout for screen {}: {} updated, {} total, fingerprint={}",
            screen_id,
            changes.len(),
            payload.len(),
            fingerprint(&payload)
        );
        self.client.update_seats(session, screen_id, &payload).await?;

        self.fetch_layout(session, screen_id).await
    }

    /// Первичная разметка зала без мест: проигрывает покраски на холсте и
    /// отправляет записи в выбранном режиме.
    pub async fn initialize(
        &self,
        session: &Session,
        screen_id: i64,
        paints: &[SeatPaint],
    ) -> Result<LoadedLayout, SeatEditError> {
        let _guard = self
            .locks
            .try_acquire(screen_id)
            .ok_or(SeatEditError::EditInProgress(screen_id))?;

        if let LoadedLayout::Ready(_) = self.fetch_layout(session, screen_id).await? {
            return Err(SeatEditError::AlreadyInitialized(screen_id));
        }

        let mut canvas = LayoutCanvas::new(self.dims);
        for paint in paints {
            let seat_type = SeatType::try_from(paint.type_id)?;
            canvas.paint(Position::new(paint.row, paint.col), seat_type)?;
        }

        let records = canvas.records(self.emission);
        info!(
            "Initializing screen {} ({:?}): {} records, fingerprint={}",
            screen_id,
            self.emission,
            records.len(),
            fingerprint(&records)
        );
        self.client.initialize_seats(session, screen_id, &records).await?;

        self.fetch_layout(session, screen_id).await
    }
}
