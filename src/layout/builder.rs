use tracing::warn;

use super::{Grid, GridDims, GridError, LoadedLayout};
use crate::models::{Position, SeatCell, SeatRecord, SeatType};

/// Раскладывает плоский список мест в сетку.
///
/// Пустой список означает, что зал ещё не размечен: вызывающий должен
/// показать инициализацию вместо редактора. Записи за пределами сетки и
/// повторы координат считаются ошибкой данных и не отбрасываются молча.
pub fn build_grid(records: &[SeatRecord], dims: GridDims) -> Result<LoadedLayout, GridError> {
    if records.is_empty() {
        return Ok(LoadedLayout::Uninitialized);
    }

    let mut grid = Grid::empty(dims);
    for record in records {
        let position = to_position(record.row, record.col, dims).ok_or(GridError::SeatOutsideGrid {
            row: record.row,
            col: record.col,
            rows: dims.rows,
            cols: dims.cols,
        })?;

        let (root_row, root_col) = record.root();
        let root = to_position(root_row, root_col, dims).ok_or(GridError::RootOutsideGrid {
            row: record.row,
            col: record.col,
            root_row,
            root_col,
        })?;

        let seat_type = SeatType::try_from(record.type_id).unwrap_or_else(|unknown| {
            warn!("Seat at ({}, {}) has {}, shown as Placeable", record.row, record.col, unknown);
            SeatType::Placeable
        });

        grid.insert(SeatCell {
            position,
            seat_type,
            root,
            name: record.name.clone(),
        })?;
    }

    Ok(LoadedLayout::Ready(grid))
}

fn to_position(row: i32, col: i32, dims: GridDims) -> Option<Position> {
    let position = Position {
        row: usize::try_from(row).ok()?,
        col: usize::try_from(col).ok()?,
    };
    dims.contains(position).then_some(position)
}
