//! Сетка мест зала и все преобразования над ней.
//!
//! Поток данных редактора:
//! 1.  [`build_grid`] раскладывает плоский список мест с бэкенда в сетку.
//! 2.  [`place`] по клику на клетку считает набор изменений (или отказ).
//! 3.  [`assemble`] дополняет изменения всеми нетронутыми местами, потому что
//!     бэкенд умеет только "заменить всё".
//!
//! Для зала без мест вместо редактора работает [`LayoutCanvas`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Position, SeatCell, SeatType};

pub mod assembler;
pub mod builder;
pub mod initializer;
pub mod placement;

pub use assembler::{assemble, fingerprint};
pub use builder::build_grid;
pub use initializer::{LayoutCanvas, SeatInitEmission};
pub use placement::place;

/// Размеры сетки. Постоянны на всё время жизни раскладки зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridDims {
    fn default() -> Self {
        Self { rows: 15, cols: 10 }
    }
}

impl GridDims {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Все позиции сетки построчно.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position { row, col }))
    }

    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }
}

/// Ошибки целостности данных при построении сетки.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("seat at row {row}, col {col} lies outside the {rows}x{cols} grid")]
    SeatOutsideGrid { row: i32, col: i32, rows: usize, cols: usize },
    #[error("seat at row {row}, col {col} references root ({root_row}, {root_col}) outside the grid")]
    RootOutsideGrid { row: i32, col: i32, root_row: i32, root_col: i32 },
    #[error("more than one seat record for row {row}, col {col}")]
    DuplicateSeat { row: usize, col: usize },
}

/// Отказы при размещении места. Обрабатываются локально: сетка не меняется,
/// на бэкенд ничего не уходит.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Not enough space for a {seat} seat at row {row}, col {col}", seat = .seat_type.name())]
    OutOfBounds { row: usize, col: usize, seat_type: SeatType },
    #[error("Cannot place seat here - row {row}, col {col} is not placeable")]
    Blocked { row: usize, col: usize },
    #[error("{} cannot be assigned from the editor", .0.name())]
    ReservedType(SeatType),
}

/// Результат загрузки мест: зал ещё не размечен либо готовая сетка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedLayout {
    Uninitialized,
    Ready(Grid),
}

impl LoadedLayout {
    pub fn grid(&self) -> Option<&Grid> {
        match self {
            LoadedLayout::Ready(grid) => Some(grid),
            LoadedLayout::Uninitialized => None,
        }
    }
}

/// Плотная сетка мест. `None` = клетка ещё не назначена и считается Placeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: GridDims,
    cells: Vec<Option<SeatCell>>,
}

impl Grid {
    pub fn empty(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![None; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn get(&self, pos: Position) -> Option<&SeatCell> {
        self.dims.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Тип места в клетке; пустая клетка считается Placeable.
    pub fn seat_type_at(&self, pos: Position) -> SeatType {
        self.get(pos)
            .map(|cell| cell.seat_type)
            .unwrap_or(SeatType::Placeable)
    }

    /// Применить набор изменений от движка размещения.
    pub fn apply(&mut self, changes: &PendingChangeSet) {
        for cell in changes.iter() {
            if let Some(i) = self.dims.index(cell.position) {
                self.cells[i] = Some(cell.clone());
            }
        }
    }

    /// Занятые клетки построчно.
    pub fn occupied(&self) -> impl Iterator<Item = &SeatCell> {
        self.cells.iter().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Строки сетки для отрисовки.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<SeatCell>]> {
        self.cells.chunks(self.dims.cols.max(1))
    }

    pub(crate) fn insert(&mut self, cell: SeatCell) -> Result<(), GridError> {
        let pos = cell.position;
        let Some(i) = self.dims.index(pos) else {
            return Err(GridError::SeatOutsideGrid {
                row: pos.row as i32,
                col: pos.col as i32,
                rows: self.dims.rows,
                cols: self.dims.cols,
            });
        };
        if self.cells[i].is_some() {
            return Err(GridError::DuplicateSeat {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[i] = Some(cell);
        Ok(())
    }
}

/// Упорядоченный набор обновлённых клеток для одной правки.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChangeSet {
    updates: Vec<SeatCell>,
}

impl PendingChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: SeatCell) {
        self.updates.push(cell);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatCell> {
        self.updates.iter()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn touches(&self, pos: Position) -> bool {
        self.updates.iter().any(|cell| cell.position == pos)
    }
}
