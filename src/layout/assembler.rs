use sha2::{Digest, Sha256};

use super::{Grid, PendingChangeSet};
use crate::models::SeatRecord;

/// Собирает полный payload для PUT: бэкенд не умеет частичных обновлений.
///
/// Сначала идут записи из набора изменений в их порядке, затем построчно все
/// занятые клетки, которых изменения не коснулись, в текущем состоянии.
/// Порядок детерминирован, так что повторная сборка из того же состояния
/// даёт тот же payload.
pub fn assemble(grid: &Grid, changes: &PendingChangeSet) -> Vec<SeatRecord> {
    let mut payload: Vec<SeatRecord> = changes.iter().map(|cell| cell.to_record()).collect();

    payload.extend(
        grid.occupied()
            .filter(|cell| !changes.touches(cell.position))
            .map(|cell| cell.to_record()),
    );

    payload
}

/// SHA-256 отпечаток payload'а для логов.
pub fn fingerprint(records: &[SeatRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        let (root_row, root_col) = record.root();
        for value in [record.row, record.col, record.type_id, root_row, root_col] {
            hasher.update(value.to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{place, GridDims};
    use crate::models::{Position, SeatCell, SeatType};

    fn sample_grid() -> Grid {
        let mut grid = Grid::empty(GridDims::new(3, 3));
        let mut seed = PendingChangeSet::new();
        seed.push(SeatCell::single(Position::new(0, 0), SeatType::Standard));
        seed.push(SeatCell::single(Position::new(0, 1), SeatType::Vip));
        seed.push(SeatCell::rooted_at(Position::new(1, 0), SeatType::Lovers, Position::new(1, 0)));
        seed.push(SeatCell::rooted_at(Position::new(1, 1), SeatType::Lovers, Position::new(1, 0)));
        seed.push(SeatCell::single(Position::new(2, 2), SeatType::NotPlaceable));
        grid.apply(&seed);
        grid
    }

    #[test]
    fn unchanged_grid_is_replayed_row_major() {
        let grid = sample_grid();
        let payload = assemble(&grid, &PendingChangeSet::new());

        assert_eq!(payload.len(), grid.occupied_count());
        let coords: Vec<_> = payload.iter().map(|r| (r.row, r.col)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 2)]);
        assert_eq!(payload[3].root(), (1, 0));
    }

    #[test]
    fn changes_come_first_and_replace_their_cells() {
        let grid = sample_grid();
        let changes = place(&grid, Position::new(1, 1), SeatType::Standard).unwrap();
        let payload = assemble(&grid, &changes);

        assert_eq!(payload.len(), 5);
        assert_eq!((payload[0].row, payload[0].col, payload[0].type_id), (1, 1, 1));
        // вторая половина дивана разжалована
        assert_eq!((payload[1].row, payload[1].col, payload[1].type_id), (1, 0, 0));
        assert_eq!(payload.iter().filter(|r| r.row == 1 && r.col == 0).count(), 1);
    }

    #[test]
    fn payload_covers_newly_occupied_cells() {
        let grid = sample_grid();
        let changes = place(&grid, Position::new(2, 0), SeatType::Lovers).unwrap();
        let payload = assemble(&grid, &changes);

        let mut applied = grid.clone();
        applied.apply(&changes);
        assert_eq!(payload.len(), applied.occupied_count());
    }

    #[test]
    fn assembling_twice_is_byte_equal() {
        let grid = sample_grid();
        let changes = place(&grid, Position::new(0, 1), SeatType::Bed).unwrap();

        let first = assemble(&grid, &changes);
        let second = assemble(&grid, &changes);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(fingerprint(&first), fingerprint(&second));
        assert_ne!(fingerprint(&first), fingerprint(&assemble(&grid, &PendingChangeSet::new())));
    }
}
