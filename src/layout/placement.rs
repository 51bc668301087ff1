use super::{Grid, PendingChangeSet, PlacementError};
use crate::models::{Position, SeatCell, SeatType};

/// Считает изменения для размещения места типа `seat_type` с якорем `anchor`.
///
/// Все клетки footprint'а получают новый тип и корень `anchor`. Клетки, которые
/// принадлежали тем же размещениям, что и прежние владельцы footprint'а, но в
/// новый footprint не попали, становятся Placeable и сами себе корнем, чтобы не
/// оставалось ссылок на чужой корень. Для 1x1 footprint'ом является сам якорь,
/// поэтому задевается только его прежнее размещение.
///
/// Сетку не меняет: применять и отправлять изменения должен вызывающий.
pub fn place(
    grid: &Grid,
    anchor: Position,
    seat_type: SeatType,
) -> Result<PendingChangeSet, PlacementError> {
    if seat_type == SeatType::NotPlaceable {
        return Err(PlacementError::ReservedType(seat_type));
    }

    let dims = grid.dims();
    let targets: Vec<Position> = seat_type.footprint().cells_from(anchor).collect();

    if targets.iter().any(|pos| !dims.contains(*pos)) {
        return Err(PlacementError::OutOfBounds {
            row: anchor.row,
            col: anchor.col,
            seat_type,
        });
    }

    if let Some(blocked) = targets
        .iter()
        .find(|pos| grid.seat_type_at(**pos) == SeatType::NotPlaceable)
    {
        return Err(PlacementError::Blocked {
            row: blocked.row,
            col: blocked.col,
        });
    }

    // Размещения, которые затирает новый footprint: (корень, тип)
    let mut displaced: Vec<(Position, SeatType)> = Vec::new();
    for cell in targets.iter().filter_map(|pos| grid.get(*pos)) {
        let key = (cell.root, cell.seat_type);
        if !displaced.contains(&key) {
            displaced.push(key);
        }
    }

    let mut changes = PendingChangeSet::new();
    for pos in &targets {
        changes.push(SeatCell::rooted_at(*pos, seat_type, anchor));
    }

    for cell in grid.occupied() {
        if targets.contains(&cell.position) {
            continue;
        }
        if displaced.contains(&(cell.root, cell.seat_type)) {
            changes.push(SeatCell::single(cell.position, SeatType::Placeable));
        }
    }

    Ok(changes)
}
